use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wikiloop_engine::{
    EngineEvent, EngineHandle, FailureKind, JourneyClient, JourneyError, JourneyRequest, Waypoint,
};

const WAIT: Duration = Duration::from_secs(5);

struct EchoClient {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl JourneyClient for EchoClient {
    async fn request_journey(
        &self,
        request: &JourneyRequest,
    ) -> Result<Vec<Waypoint>, JourneyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            Waypoint {
                title: "start".to_string(),
                url: request.start_url.clone(),
                image: String::new(),
                text: String::new(),
            },
            Waypoint {
                title: "stop".to_string(),
                url: request.stop_url.clone(),
                image: String::new(),
                text: String::new(),
            },
        ])
    }
}

struct StuckClient;

#[async_trait::async_trait]
impl JourneyClient for StuckClient {
    async fn request_journey(
        &self,
        _request: &JourneyRequest,
    ) -> Result<Vec<Waypoint>, JourneyError> {
        std::future::pending().await
    }
}

fn request() -> JourneyRequest {
    JourneyRequest {
        start_url: "https://en.wikipedia.org/wiki/watermelon".to_string(),
        stop_url: "https://en.wikipedia.org/wiki/philosophy".to_string(),
    }
}

#[test]
fn completion_carries_the_request_id() {
    let client = Arc::new(EchoClient {
        calls: AtomicUsize::new(0),
    });
    let engine = EngineHandle::with_client(client.clone());

    engine.request_journey(7, request());

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::JourneyCompleted { request_id, result }) => {
            assert_eq!(request_id, 7);
            let journey = result.expect("journey");
            assert_eq!(journey[0].url, "https://en.wikipedia.org/wiki/watermelon");
            assert_eq!(journey[1].url, "https://en.wikipedia.org/wiki/philosophy");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    assert!(engine.try_recv().is_none());
}

#[test]
fn default_probe_succeeds() {
    let engine = EngineHandle::with_client(Arc::new(EchoClient {
        calls: AtomicUsize::new(0),
    }));

    engine.probe();

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ProbeCompleted { result: Ok(()) })
    );
}

#[test]
fn shutdown_cancels_in_flight_requests() {
    let engine = EngineHandle::with_client(Arc::new(StuckClient));

    engine.request_journey(1, request());
    assert!(engine.recv_timeout(Duration::from_millis(100)).is_none());
    engine.shutdown();

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::JourneyCompleted { request_id, result }) => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn try_recv_returns_immediately_while_a_request_is_stuck() {
    let engine = EngineHandle::with_client(Arc::new(StuckClient));
    engine.request_journey(1, request());

    let started = std::time::Instant::now();
    assert!(engine.try_recv().is_none());
    assert!(engine.recv_timeout(Duration::from_millis(50)).is_none());
    assert!(started.elapsed() < Duration::from_secs(2));

    engine.shutdown();
}

#[test]
fn control_clones_work_while_the_receiver_blocks_elsewhere() {
    let engine = EngineHandle::with_client(Arc::new(StuckClient));
    let (control, event_rx) = engine.into_parts();

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let waiter = std::thread::spawn(move || {
        let event = event_rx.recv().ok();
        let _ = done_tx.send(event);
    });

    let submitter = control.clone();
    std::thread::spawn(move || submitter.request_journey(3, request()))
        .join()
        .expect("submitter thread");
    assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());

    control.clone().shutdown();
    match done_rx.recv_timeout(WAIT).expect("waiter woke up") {
        Some(EngineEvent::JourneyCompleted { request_id, result }) => {
            assert_eq!(request_id, 3);
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
    waiter.join().expect("waiter thread");
}
