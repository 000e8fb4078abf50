use crate::effect::JourneyRequest;
use crate::msg::FieldId;
use crate::validate::{validate, UrlField};
use crate::view_model::{present, AppViewModel, FieldView};

/// Start article offered when the page opens.
pub const DEFAULT_START_URL: &str = "https://en.wikipedia.org/wiki/Watermelon";
/// Goal article offered when the page opens.
pub const DEFAULT_STOP_URL: &str = "https://en.wikipedia.org/wiki/philosophy";

/// Monotonic identifier of an issued journey request; the first one is 1.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A journey request is in flight.
    Pending,
    /// The last request came back, successfully or not.
    Settled,
}

/// One article on a computed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    pub title: String,
    pub url: String,
    pub image: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyResult {
    /// Path from start to goal, in traversal order.
    Ok { journey: Vec<Waypoint> },
    /// The service or the transport failed. `visited` holds the articles the
    /// service walked through before giving up, when it reported any.
    Failed {
        message: String,
        visited: Vec<Waypoint>,
    },
}

impl JourneyResult {
    pub fn failed(message: impl Into<String>) -> Self {
        JourneyResult::Failed {
            message: message.into(),
            visited: Vec::new(),
        }
    }
}

/// Everything one page view knows about the journey form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    start_field: UrlField,
    stop_field: UrlField,
    phase: Phase,
    result: Option<JourneyResult>,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session seeded with the default start and goal articles.
    pub fn new() -> Self {
        Self::with_seeds(DEFAULT_START_URL, DEFAULT_STOP_URL)
    }

    pub fn with_seeds(start: &str, stop: &str) -> Self {
        Self {
            start_field: validate(start),
            stop_field: validate(stop),
            phase: Phase::Idle,
            result: None,
            in_flight: None,
            last_request_id: 0,
            dirty: false,
        }
    }

    pub fn start_field(&self) -> &UrlField {
        &self.start_field
    }

    pub fn stop_field(&self) -> &UrlField {
        &self.stop_field
    }

    pub fn field(&self, field: FieldId) -> &UrlField {
        match field {
            FieldId::Start => &self.start_field,
            FieldId::Stop => &self.stop_field,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&JourneyResult> {
        self.result.as_ref()
    }

    /// Id of the request whose completion is still awaited.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Number of journey requests issued during this session.
    pub fn requests_issued(&self) -> u64 {
        self.last_request_id
    }

    /// Submission guard: both fields submittable and no request in flight.
    pub fn can_submit(&self) -> bool {
        self.start_field.is_submittable()
            && self.stop_field.is_submittable()
            && self.phase != Phase::Pending
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            start: FieldView::from_field(&self.start_field),
            stop: FieldView::from_field(&self.stop_field),
            can_submit: self.can_submit(),
            phase: self.phase,
            render: present(self.phase, self.result.as_ref()),
            requests_issued: self.requests_issued(),
        }
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn set_field(&mut self, field: FieldId, value: UrlField) {
        let slot = match field {
            FieldId::Start => &mut self.start_field,
            FieldId::Stop => &mut self.stop_field,
        };
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
    }

    /// Moves to `Pending` and allocates the next request id.
    ///
    /// Callers check `can_submit` first.
    pub(crate) fn begin_request(&mut self) -> (RequestId, JourneyRequest) {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.phase = Phase::Pending;
        self.result = None;
        self.in_flight = Some(request_id);
        self.dirty = true;
        let request = JourneyRequest {
            start_url: self.start_field.normalized().to_string(),
            stop_url: self.stop_field.normalized().to_string(),
        };
        (request_id, request)
    }

    /// Stores the result of the in-flight request. Completions for any other
    /// id are dropped and `false` is returned.
    pub(crate) fn settle(&mut self, request_id: RequestId, result: JourneyResult) -> bool {
        if self.phase != Phase::Pending || self.in_flight != Some(request_id) {
            return false;
        }
        self.phase = Phase::Settled;
        self.result = Some(result);
        self.in_flight = None;
        self.dirty = true;
        true
    }
}
