use crate::{validate, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, text } => {
            // Edits never touch the phase; an in-flight request keeps running.
            state.set_field(field, validate(&text));
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let (request_id, request) = state.begin_request();
            vec![Effect::RequestJourney {
                request_id,
                request,
            }]
        }
        Msg::JourneyResolved { request_id, result } => {
            state.settle(request_id, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
