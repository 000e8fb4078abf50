use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// Request body sent to the journey endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyRequest {
    pub start_url: String,
    pub stop_url: String,
}

/// One article of a journey as the service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub title: String,
    pub url: String,
    pub image: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JourneyCompleted {
        request_id: RequestId,
        result: Result<Vec<Waypoint>, JourneyError>,
    },
    ProbeCompleted {
        result: Result<(), JourneyError>,
    },
}

/// A failed journey request. Displays as the message alone so it can be
/// shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct JourneyError {
    pub kind: FailureKind,
    pub message: String,
}

impl JourneyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Articles the service walked through before failing.
    pub fn visited(&self) -> &[Waypoint] {
        match &self.kind {
            FailureKind::Service { visited } => visited,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedBody,
    /// The service answered with an `error` field.
    Service { visited: Vec<Waypoint> },
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Service { visited } => {
                write!(f, "service error after {} articles", visited.len())
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
