//! Report sinks observe the suite lifecycle and materialize run artifacts.

pub mod html;

/// Ordered lifecycle events emitted by the scenario runner. Any number of
/// sinks may be registered for a run; each observes every event in emission
/// order. Only `on_suite_finish` can fail: a sink that cannot persist its
/// artifact reports that as a run-level error, never as a scenario outcome.
pub trait ReportSink {
    fn on_suite_start(&mut self, suite_name: &str);
    fn on_scenario_start(&mut self, name: &str);
    fn on_scenario_pass(&mut self, name: &str);
    fn on_scenario_fail(&mut self, name: &str, detail: &str);
    fn on_suite_finish(&mut self) -> Result<(), String>;
}
