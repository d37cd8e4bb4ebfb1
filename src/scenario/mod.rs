//! Scenario model: a named request, its expected assertions, and the outcome
//! of running it once.

pub mod runner;

use std::fmt::{self, Display};

use crate::http::TransportError;
use crate::http::request::GeolocateRequest;
use crate::http::response::ApiResponse;

/// One named probe: a request plus the assertions evaluated against its
/// response. Immutable once defined.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub request: GeolocateRequest,
    pub expect: Expectation,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        request: GeolocateRequest,
        expect: Expectation,
    ) -> Scenario {
        Scenario {
            name: name.into(),
            request,
            expect,
        }
    }
}

/// Declared assertions: an exact status code and, optionally, a latency
/// ceiling in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Expectation {
    pub status: u16,
    pub max_latency_ms: Option<u64>,
}

impl Expectation {
    pub fn status(status: u16) -> Expectation {
        Expectation {
            status,
            max_latency_ms: None,
        }
    }

    pub fn status_within(status: u16, max_latency_ms: u64) -> Expectation {
        Expectation {
            status,
            max_latency_ms: Some(max_latency_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Passed,
    Failed,
}

/// The result of running one scenario. Exactly one is produced per executed
/// scenario and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub scenario: String,
    pub status: OutcomeStatus,
    pub latency_ms: Option<u64>,
    pub detail: Option<FailureDetail>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }
}

/// Why a scenario failed.
#[derive(Debug, Clone)]
pub enum FailureDetail {
    StatusMismatch { expected: u16, actual: u16 },
    LatencyExceeded { ceiling_ms: u64, actual_ms: u64 },
    Transport(TransportError),
}

impl Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureDetail::StatusMismatch { expected, actual } => {
                write!(f, "Expected status {expected} but received {actual}")
            }
            FailureDetail::LatencyExceeded {
                ceiling_ms,
                actual_ms,
            } => {
                write!(
                    f,
                    "Response time {actual_ms} ms exceeded the {ceiling_ms} ms ceiling"
                )
            }
            FailureDetail::Transport(err) => write!(f, "Transport failure: {err}"),
        }
    }
}

/// Evaluate a scenario's assertions against a response. `None` means pass.
/// A latency violation is reported ahead of any status mismatch, so a
/// latency-bounded scenario fails on timing regardless of the returned code.
pub fn evaluate(expect: &Expectation, response: &ApiResponse) -> Option<FailureDetail> {
    if let Some(ceiling_ms) = expect.max_latency_ms {
        if response.time_ms >= ceiling_ms {
            return Some(FailureDetail::LatencyExceeded {
                ceiling_ms,
                actual_ms: response.time_ms,
            });
        }
    }

    if response.status != expect.status {
        return Some(FailureDetail::StatusMismatch {
            expected: expect.status,
            actual: response.status,
        });
    }

    None
}
