use std::collections::HashSet;

use crate::{JourneyResult, Phase, UrlField, Waypoint};

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderModel {
    #[default]
    Empty,
    Waiting,
    Error {
        message: String,
        visited: Vec<Waypoint>,
    },
    Journey(Vec<Waypoint>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldView {
    pub text: String,
    pub is_valid: bool,
    pub error_message: String,
}

impl FieldView {
    pub(crate) fn from_field(field: &UrlField) -> Self {
        Self {
            text: field.normalized().to_string(),
            is_valid: field.is_valid(),
            error_message: field.error_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub start: FieldView,
    pub stop: FieldView,
    /// The submit control is enabled only when this is set.
    pub can_submit: bool,
    pub phase: Phase,
    pub render: RenderModel,
    pub requests_issued: u64,
}

/// Derives the results area from the phase and the stored result.
pub fn present(phase: Phase, result: Option<&JourneyResult>) -> RenderModel {
    match (phase, result) {
        (Phase::Idle, _) => RenderModel::Empty,
        (Phase::Pending, _) => RenderModel::Waiting,
        (Phase::Settled, Some(JourneyResult::Ok { journey })) => {
            RenderModel::Journey(journey.clone())
        }
        (Phase::Settled, Some(JourneyResult::Failed { message, visited })) => RenderModel::Error {
            message: message.clone(),
            visited: visited.clone(),
        },
        (Phase::Settled, None) => RenderModel::Empty,
    }
}

/// One stable key per card. Titles are used as-is; a repeated title gets its
/// position appended.
pub fn card_keys(journey: &[Waypoint]) -> Vec<String> {
    let mut taken = HashSet::with_capacity(journey.len());
    journey
        .iter()
        .enumerate()
        .map(|(index, waypoint)| {
            let mut key = waypoint.title.clone();
            while !taken.insert(key.clone()) {
                key = format!("{key}#{index}");
            }
            key
        })
        .collect()
}
