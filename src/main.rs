mod config;
mod fixtures;
mod http;
mod report;
mod scenario;
mod suite;

use std::process::ExitCode;

use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use http::client::HttpTransport;
use report::ReportSink;
use report::html::HtmlReport;
use scenario::runner::run_suite;

const REPORT_DIR: &str = "test-output";

const EXIT_SCENARIO_FAILURES: u8 = 1;
const EXIT_RUN_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(EXIT_RUN_ERROR);
        }
    };

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(EXIT_RUN_ERROR);
        }
    };

    let scenarios = suite::scenarios();
    let mut html = HtmlReport::new(REPORT_DIR);

    let summary = {
        let mut sinks: Vec<&mut dyn ReportSink> = vec![&mut html];
        run_suite(suite::SUITE_NAME, &scenarios, &transport, &mut sinks).await
    };

    info!(
        total = summary.outcomes.len(),
        passed = summary.passed(),
        failed = summary.failed(),
        "suite finished"
    );

    if !summary.sink_failures.is_empty() {
        for failure in &summary.sink_failures {
            error!("report sink failure: {failure}");
        }
        return ExitCode::from(EXIT_RUN_ERROR);
    }

    if let Some(path) = html.path() {
        info!(report = %path.display(), "report written");
    }

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_SCENARIO_FAILURES)
    }
}
