//! Wikiloop core: pure journey state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, JourneyRequest};
pub use msg::{FieldId, Msg};
pub use state::{
    JourneyResult, Phase, RequestId, SessionState, Waypoint, DEFAULT_START_URL, DEFAULT_STOP_URL,
};
pub use update::update;
pub use validate::{validate, UrlField, WIKIPEDIA_URL_MSG};
pub use view_model::{card_keys, present, AppViewModel, FieldView, RenderModel};
