//! Wikiloop engine: journey client and background request execution.
mod client;
mod engine;
mod types;
mod wire;

pub use client::{ClientSettings, JourneyClient, ReqwestJourneyClient, DEFAULT_ENDPOINT};
pub use engine::{EngineControl, EngineHandle};
pub use types::{EngineEvent, FailureKind, JourneyError, JourneyRequest, RequestId, Waypoint};
pub use wire::parse_reply;
