use crate::{JourneyResult, RequestId};

/// Which of the two URL inputs an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a URL input box; carries the full new text.
    FieldEdited { field: FieldId, text: String },
    /// User pressed "Compute path".
    SubmitClicked,
    /// Journey client finished a request.
    JourneyResolved {
        request_id: RequestId,
        result: JourneyResult,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
