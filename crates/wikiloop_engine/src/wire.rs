use serde::Deserialize;

use crate::{FailureKind, JourneyError, Waypoint};

#[derive(Debug, Deserialize)]
struct JourneyReply {
    journey: Option<Vec<Waypoint>>,
    error: Option<String>,
}

/// Interprets a journey endpoint body.
///
/// An `error` field wins over `journey`; the journey then holds the partial
/// path. Bodies with neither field, or that are not JSON, are malformed.
pub fn parse_reply(body: &[u8]) -> Result<Vec<Waypoint>, JourneyError> {
    let reply: JourneyReply = serde_json::from_slice(body)
        .map_err(|err| JourneyError::new(FailureKind::MalformedBody, err.to_string()))?;

    match reply {
        JourneyReply {
            error: Some(message),
            journey,
        } => Err(JourneyError::new(
            FailureKind::Service {
                visited: journey.unwrap_or_default(),
            },
            message,
        )),
        JourneyReply {
            journey: Some(journey),
            error: None,
        } => Ok(journey),
        JourneyReply {
            journey: None,
            error: None,
        } => Err(JourneyError::new(
            FailureKind::MalformedBody,
            "response has neither a journey nor an error",
        )),
    }
}
