use std::sync::mpsc;
use std::thread;

use wikiloop_core::{Effect, JourneyResult, Msg, RequestId, Waypoint};
use wikiloop_engine::{EngineControl, EngineEvent, EngineHandle, FailureKind, JourneyError};
use wikiloop_logging::{wl_info, wl_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineControl,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (engine, event_rx) = engine.into_parts();
        spawn_event_loop(event_rx, event_tx);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestJourney {
                    request_id,
                    request,
                } => {
                    wl_info!(
                        "RequestJourney request_id={} start_url={} stop_url={}",
                        request_id,
                        request.start_url,
                        request.stop_url
                    );
                    self.engine.request_journey(
                        request_id,
                        wikiloop_engine::JourneyRequest {
                            start_url: request.start_url,
                            stop_url: request.stop_url,
                        },
                    );
                }
            }
        }
    }

    pub fn probe(&self) {
        self.engine.probe();
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            match event {
                EngineEvent::JourneyCompleted { request_id, result } => {
                    let msg = Msg::JourneyResolved {
                        request_id,
                        result: map_result(request_id, result),
                    };
                    if event_tx.send(AppEvent::Msg(msg)).is_err() {
                        break;
                    }
                }
                EngineEvent::ProbeCompleted { result: Ok(()) } => {
                    wl_info!("Journey service is reachable");
                }
                EngineEvent::ProbeCompleted { result: Err(err) } => {
                    wl_warn!("Journey service is not reachable: {}", err);
                }
            }
        }
    });
}

fn map_result(
    request_id: RequestId,
    result: Result<Vec<wikiloop_engine::Waypoint>, JourneyError>,
) -> JourneyResult {
    match result {
        Ok(journey) => {
            wl_info!(
                "Journey {} found with {} articles",
                request_id,
                journey.len()
            );
            JourneyResult::Ok {
                journey: journey.into_iter().map(map_waypoint).collect(),
            }
        }
        Err(JourneyError { kind, message }) => {
            wl_warn!("Journey {} failed ({}): {}", request_id, kind, message);
            let visited = match kind {
                FailureKind::Service { visited } => {
                    visited.into_iter().map(map_waypoint).collect()
                }
                _ => Vec::new(),
            };
            JourneyResult::Failed { message, visited }
        }
    }
}

fn map_waypoint(waypoint: wikiloop_engine::Waypoint) -> Waypoint {
    Waypoint {
        title: waypoint.title,
        url: waypoint.url,
        image: waypoint.image,
        text: waypoint.text,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn engine_waypoint(title: &str) -> wikiloop_engine::Waypoint {
        wikiloop_engine::Waypoint {
            title: title.to_string(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
            image: "img".to_string(),
            text: "text".to_string(),
        }
    }

    #[test]
    fn successful_journey_keeps_order() {
        let result = map_result(
            1,
            Ok(vec![engine_waypoint("Watermelon"), engine_waypoint("Philosophy")]),
        );

        match result {
            JourneyResult::Ok { journey } => {
                let titles: Vec<_> = journey.iter().map(|w| w.title.as_str()).collect();
                assert_eq!(titles, vec!["Watermelon", "Philosophy"]);
                assert_eq!(journey[1].url, "https://en.wikipedia.org/wiki/Philosophy");
            }
            other => panic!("expected a journey, got {other:?}"),
        }
    }

    #[test]
    fn service_failure_keeps_message_and_partial_path() {
        let result = map_result(
            2,
            Err(JourneyError {
                kind: FailureKind::Service {
                    visited: vec![engine_waypoint("Watermelon")],
                },
                message: "no path found".to_string(),
            }),
        );

        assert_eq!(
            result,
            JourneyResult::Failed {
                message: "no path found".to_string(),
                visited: vec![Waypoint {
                    title: "Watermelon".to_string(),
                    url: "https://en.wikipedia.org/wiki/Watermelon".to_string(),
                    image: "img".to_string(),
                    text: "text".to_string(),
                }],
            }
        );
    }

    #[test]
    fn transport_failure_uses_the_stringified_cause() {
        let result = map_result(
            3,
            Err(JourneyError {
                kind: FailureKind::Network,
                message: "error sending request for url (http://127.0.0.1:5000/api/wikiloop)"
                    .to_string(),
            }),
        );

        assert_eq!(
            result,
            JourneyResult::failed(
                "error sending request for url (http://127.0.0.1:5000/api/wikiloop)"
            )
        );
    }
}
