use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestJourney {
        request_id: RequestId,
        request: JourneyRequest,
    },
}

/// Start and goal article URLs, taken from the normalized field values at
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyRequest {
    pub start_url: String,
    pub stop_url: String,
}
