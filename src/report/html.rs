//! Self-contained HTML report, one artifact per suite run.
//!
//! Entries accumulate in memory in lifecycle-event order; nothing touches the
//! filesystem until `on_suite_finish`, which writes the whole document in one
//! shot. A run interrupted before finish therefore leaves no artifact behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::ReportSink;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d.%H.%M.%S";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }\n\
table { border-collapse: collapse; width: 100%; }\n\
th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; }\n\
tr.passed td.result { color: #1a7f37; font-weight: bold; }\n\
tr.failed td.result { color: #b42318; font-weight: bold; }\n\
p.meta { color: #666; }\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryStatus {
    Pending,
    Passed,
    Failed,
}

impl EntryStatus {
    fn label(self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Passed => "PASS",
            EntryStatus::Failed => "FAIL",
        }
    }

    fn class(self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Passed => "passed",
            EntryStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    status: EntryStatus,
    detail: Option<String>,
}

/// HTML report sink. Each suite start opens a fresh report keyed by the
/// current timestamp, so repeated runs never collide on the same file.
pub struct HtmlReport {
    dir: PathBuf,
    title: String,
    run_key: Option<String>,
    entries: Vec<Entry>,
    written: Option<PathBuf>,
}

impl HtmlReport {
    pub fn new(dir: impl Into<PathBuf>) -> HtmlReport {
        HtmlReport {
            dir: dir.into(),
            title: String::new(),
            run_key: None,
            entries: Vec::new(),
            written: None,
        }
    }

    /// Path of the written artifact, available once the suite has finished.
    pub fn path(&self) -> Option<&Path> {
        self.written.as_deref()
    }

    fn resolve(&mut self, name: &str, status: EntryStatus, detail: Option<String>) {
        let open = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.name == name && entry.status == EntryStatus::Pending);

        match open {
            Some(entry) => {
                entry.status = status;
                entry.detail = detail;
            }
            None => self.entries.push(Entry {
                name: name.to_string(),
                status,
                detail,
            }),
        }
    }

    fn render(&self, run_key: &str) -> String {
        let total = self.entries.len();
        let passed = self
            .entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Passed)
            .count();
        let failed = self
            .entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Failed)
            .count();

        let mut rows = String::new();
        for entry in &self.entries {
            let detail = entry.detail.as_deref().unwrap_or("");
            rows.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td class=\"result\">{}</td><td>{}</td></tr>\n",
                entry.status.class(),
                escape_html(&entry.name),
                entry.status.label(),
                escape_html(detail),
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
             <h1>{title}</h1>\n\
             <p class=\"meta\">Run {run_key} &middot; {total} scenarios, {passed} passed, {failed} failed</p>\n\
             <table>\n<tr><th>Scenario</th><th>Result</th><th>Detail</th></tr>\n{rows}</table>\n\
             </body>\n</html>\n",
            title = escape_html(&self.title),
        )
    }
}

impl ReportSink for HtmlReport {
    fn on_suite_start(&mut self, suite_name: &str) {
        self.title = suite_name.to_string();
        self.run_key = Some(Local::now().format(TIMESTAMP_FORMAT).to_string());
        self.entries.clear();
        self.written = None;
    }

    fn on_scenario_start(&mut self, name: &str) {
        self.entries.push(Entry {
            name: name.to_string(),
            status: EntryStatus::Pending,
            detail: None,
        });
    }

    fn on_scenario_pass(&mut self, name: &str) {
        self.resolve(name, EntryStatus::Passed, None);
    }

    fn on_scenario_fail(&mut self, name: &str, detail: &str) {
        self.resolve(name, EntryStatus::Failed, Some(detail.to_string()));
    }

    fn on_suite_finish(&mut self) -> Result<(), String> {
        let run_key = self
            .run_key
            .clone()
            .ok_or_else(|| "Report finish without a suite start".to_string())?;

        fs::create_dir_all(&self.dir).map_err(|err| {
            format!(
                "Failed to create report directory `{}`: {err}",
                self.dir.display()
            )
        })?;

        let path = self.dir.join(format!("Test-Report-{run_key}.html"));
        fs::write(&path, self.render(&run_key))
            .map_err(|err| format!("Failed to write report file `{}`: {err}", path.display()))?;

        self.written = Some(path);
        Ok(())
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
