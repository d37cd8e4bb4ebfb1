//! HTTP transport seam for the scenario runner.
//!
//! The runner only needs "POST this body with this credential and tell me the
//! status and how long it took", so that is the whole trait. The production
//! implementation lives in [`client`]; tests substitute stubs.

pub mod client;
pub mod request;
pub mod response;

use std::fmt::{self, Display};

use request::GeolocateRequest;
use response::ApiResponse;

/// Issues one geolocation call per invocation.
pub trait Transport {
    async fn send(&self, request: &GeolocateRequest) -> Result<ApiResponse, TransportError>;
}

/// Coarse classification of a failed round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Dns,
    Connect,
    Tls,
    Timeout,
    Read,
}

impl TransportErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            TransportErrorKind::Dns => "DNS_ERROR",
            TransportErrorKind::Connect => "CONNECT_ERROR",
            TransportErrorKind::Tls => "TLS_ERROR",
            TransportErrorKind::Timeout => "TIMEOUT",
            TransportErrorKind::Read => "READ_ERROR",
        }
    }
}

/// A network-level failure: the call never produced a usable response.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> TransportError {
        TransportError {
            kind,
            message: message.into(),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}
