//! Sequential suite execution. Each scenario makes exactly one network round
//! trip and yields exactly one [`Outcome`]; lifecycle events stream to every
//! registered sink in emission order.

use tracing::{error, info};

use crate::http::Transport;
use crate::report::ReportSink;

use super::{FailureDetail, Outcome, OutcomeStatus, Scenario, evaluate};

/// Everything a finished run produced. Scenario outcomes and sink failures
/// are kept apart: a report that could not be written does not change any
/// scenario's result, and vice versa.
#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<Outcome>,
    pub sink_failures: Vec<String>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(Outcome::passed)
    }
}

/// Run every scenario in order against the given transport. A scenario's
/// failure, whether assertion or transport, never affects another scenario's
/// execution.
pub async fn run_suite<T: Transport>(
    suite_name: &str,
    scenarios: &[Scenario],
    transport: &T,
    sinks: &mut [&mut dyn ReportSink],
) -> RunSummary {
    for sink in sinks.iter_mut() {
        sink.on_suite_start(suite_name);
    }

    let mut outcomes = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        for sink in sinks.iter_mut() {
            sink.on_scenario_start(&scenario.name);
        }

        let outcome = run_scenario(scenario, transport).await;

        match &outcome.detail {
            None => {
                info!(scenario = %scenario.name, latency_ms = outcome.latency_ms, "scenario passed");
                for sink in sinks.iter_mut() {
                    sink.on_scenario_pass(&scenario.name);
                }
            }
            Some(detail) => {
                let detail = detail.to_string();
                error!(scenario = %scenario.name, %detail, "scenario failed");
                for sink in sinks.iter_mut() {
                    sink.on_scenario_fail(&scenario.name, &detail);
                }
            }
        }

        outcomes.push(outcome);
    }

    let mut sink_failures = Vec::new();
    for sink in sinks.iter_mut() {
        if let Err(err) = sink.on_suite_finish() {
            sink_failures.push(err);
        }
    }

    RunSummary {
        outcomes,
        sink_failures,
    }
}

async fn run_scenario<T: Transport>(scenario: &Scenario, transport: &T) -> Outcome {
    match transport.send(&scenario.request).await {
        Ok(response) => match evaluate(&scenario.expect, &response) {
            None => Outcome {
                scenario: scenario.name.clone(),
                status: OutcomeStatus::Passed,
                latency_ms: Some(response.time_ms),
                detail: None,
            },
            Some(detail) => Outcome {
                scenario: scenario.name.clone(),
                status: OutcomeStatus::Failed,
                latency_ms: Some(response.time_ms),
                detail: Some(detail),
            },
        },
        Err(err) => Outcome {
            scenario: scenario.name.clone(),
            status: OutcomeStatus::Failed,
            latency_ms: None,
            detail: Some(FailureDetail::Transport(err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::{Credential, GeolocateRequest};
    use crate::http::response::ApiResponse;
    use crate::http::{TransportError, TransportErrorKind};
    use crate::scenario::Expectation;

    struct StubTransport {
        status: u16,
        time_ms: u64,
    }

    impl Transport for StubTransport {
        async fn send(&self, _request: &GeolocateRequest) -> Result<ApiResponse, TransportError> {
            Ok(ApiResponse {
                status: self.status,
                status_text: "Stub".to_string(),
                body: String::new(),
                time_ms: self.time_ms,
                size_bytes: 0,
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn send(&self, _request: &GeolocateRequest) -> Result<ApiResponse, TransportError> {
            Err(TransportError::new(
                TransportErrorKind::Connect,
                "connection refused",
            ))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
    }

    impl ReportSink for RecordingSink {
        fn on_suite_start(&mut self, suite_name: &str) {
            self.events.push(format!("suite-start:{suite_name}"));
        }

        fn on_scenario_start(&mut self, name: &str) {
            self.events.push(format!("start:{name}"));
        }

        fn on_scenario_pass(&mut self, name: &str) {
            self.events.push(format!("pass:{name}"));
        }

        fn on_scenario_fail(&mut self, name: &str, detail: &str) {
            self.events.push(format!("fail:{name}:{detail}"));
        }

        fn on_suite_finish(&mut self) -> Result<(), String> {
            self.events.push("suite-finish".to_string());
            Ok(())
        }
    }

    struct UnwritableSink;

    impl ReportSink for UnwritableSink {
        fn on_suite_start(&mut self, _suite_name: &str) {}
        fn on_scenario_start(&mut self, _name: &str) {}
        fn on_scenario_pass(&mut self, _name: &str) {}
        fn on_scenario_fail(&mut self, _name: &str, _detail: &str) {}
        fn on_suite_finish(&mut self) -> Result<(), String> {
            Err("Failed to write report file".to_string())
        }
    }

    fn scenario(name: &str, credential: Credential, expect: Expectation) -> Scenario {
        Scenario::new(name, GeolocateRequest::new("{}", credential), expect)
    }

    #[tokio::test]
    async fn rejection_code_passes_only_when_expected() {
        let transport = StubTransport {
            status: 403,
            time_ms: 20,
        };
        let scenarios = vec![
            scenario("no credential", Credential::None, Expectation::status(403)),
            scenario("expects success", Credential::Valid, Expectation::status(200)),
        ];

        let summary = run_suite("suite", &scenarios, &transport, &mut []).await;

        assert!(summary.outcomes[0].passed());
        assert!(!summary.outcomes[1].passed());
        match summary.outcomes[1].detail.as_ref().expect("failure detail") {
            FailureDetail::StatusMismatch { expected, actual } => {
                assert_eq!(*expected, 200);
                assert_eq!(*actual, 403);
            }
            other => panic!("unexpected detail: {other}"),
        }
    }

    #[tokio::test]
    async fn client_error_for_malformed_body_passes_when_expected() {
        let transport = StubTransport {
            status: 400,
            time_ms: 15,
        };
        let scenarios = vec![scenario(
            "malformed payload",
            Credential::Valid,
            Expectation::status(400),
        )];

        let summary = run_suite("suite", &scenarios, &transport, &mut []).await;
        assert!(summary.all_passed());
    }

    #[tokio::test]
    async fn slow_response_fails_the_latency_bound_regardless_of_status() {
        let transport = StubTransport {
            status: 200,
            time_ms: 3000,
        };
        let scenarios = vec![scenario(
            "response time",
            Credential::Valid,
            Expectation::status_within(200, 2000),
        )];

        let summary = run_suite("suite", &scenarios, &transport, &mut []).await;

        let outcome = &summary.outcomes[0];
        assert!(!outcome.passed());
        assert!(matches!(
            outcome.detail,
            Some(FailureDetail::LatencyExceeded {
                ceiling_ms: 2000,
                actual_ms: 3000,
            })
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_isolated_to_its_scenario() {
        let transport = FailingTransport;
        let scenarios = vec![
            scenario("first", Credential::Valid, Expectation::status(200)),
            scenario("second", Credential::Valid, Expectation::status(200)),
        ];

        let summary = run_suite("suite", &scenarios, &transport, &mut []).await;

        assert_eq!(summary.outcomes.len(), 2);
        for outcome in &summary.outcomes {
            assert!(!outcome.passed());
            assert!(outcome.latency_ms.is_none());
            match outcome.detail.as_ref().expect("failure detail") {
                FailureDetail::Transport(err) => {
                    assert_eq!(err.kind, TransportErrorKind::Connect);
                }
                other => panic!("unexpected detail: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn every_scenario_yields_exactly_one_outcome_in_order() {
        let transport = StubTransport {
            status: 200,
            time_ms: 10,
        };
        let scenarios = vec![
            scenario("a", Credential::Valid, Expectation::status(200)),
            scenario("b", Credential::Valid, Expectation::status(400)),
            scenario("c", Credential::Valid, Expectation::status(200)),
        ];

        let summary = run_suite("suite", &scenarios, &transport, &mut []).await;

        let names: Vec<&str> = summary
            .outcomes
            .iter()
            .map(|o| o.scenario.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);
    }

    #[tokio::test]
    async fn sinks_observe_lifecycle_events_in_emission_order() {
        let transport = StubTransport {
            status: 200,
            time_ms: 10,
        };
        let scenarios = vec![
            scenario("ok", Credential::Valid, Expectation::status(200)),
            scenario("bad", Credential::Valid, Expectation::status(400)),
        ];

        let mut first = RecordingSink::default();
        let mut second = RecordingSink::default();
        {
            let mut sinks: Vec<&mut dyn ReportSink> = vec![&mut first, &mut second];
            run_suite("geolocation", &scenarios, &transport, &mut sinks).await;
        }

        let expected = [
            "suite-start:geolocation",
            "start:ok",
            "pass:ok",
            "start:bad",
            "fail:bad:Expected status 400 but received 200",
            "suite-finish",
        ];
        assert_eq!(first.events, expected);
        assert_eq!(second.events, expected);
    }

    #[tokio::test]
    async fn html_report_records_every_outcome_exactly_once() {
        use crate::report::html::HtmlReport;

        let transport = StubTransport {
            status: 403,
            time_ms: 25,
        };
        let scenarios = vec![
            scenario("no credential", Credential::None, Expectation::status(403)),
            scenario("expects success", Credential::Valid, Expectation::status(200)),
            scenario("also rejected", Credential::Invalid, Expectation::status(403)),
        ];

        let dir = tempfile::tempdir().expect("tempdir");
        let mut html = HtmlReport::new(dir.path());
        let summary = {
            let mut sinks: Vec<&mut dyn ReportSink> = vec![&mut html];
            run_suite("geolocation", &scenarios, &transport, &mut sinks).await
        };

        assert_eq!(summary.outcomes.len(), 3);
        assert!(summary.sink_failures.is_empty());

        let contents = std::fs::read_to_string(html.path().expect("artifact path"))
            .expect("read artifact");
        for outcome in &summary.outcomes {
            assert_eq!(contents.matches(&outcome.scenario).count(), 1);
        }
        assert_eq!(contents.matches("class=\"failed\"").count(), 1);
    }

    #[tokio::test]
    async fn sink_write_failure_is_reported_apart_from_outcomes() {
        let transport = StubTransport {
            status: 200,
            time_ms: 10,
        };
        let scenarios = vec![scenario("ok", Credential::Valid, Expectation::status(200))];

        let mut sink = UnwritableSink;
        let mut sinks: Vec<&mut dyn ReportSink> = vec![&mut sink];
        let summary = run_suite("suite", &scenarios, &transport, &mut sinks).await;

        assert!(summary.all_passed());
        assert_eq!(summary.sink_failures.len(), 1);
        assert!(summary.sink_failures[0].contains("Failed to write"));
    }
}
