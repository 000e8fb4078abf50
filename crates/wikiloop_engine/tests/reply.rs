use pretty_assertions::assert_eq;
use wikiloop_engine::{parse_reply, FailureKind};

#[test]
fn journey_reply_keeps_array_order() {
    let body = br#"{"journey":[
        {"title":"Zebra","url":"u1","image":"i1","text":"t1"},
        {"title":"Apple","url":"u2","image":"i2","text":"t2"}
    ]}"#;

    let journey = parse_reply(body).expect("journey");
    let titles: Vec<_> = journey.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["Zebra", "Apple"]);
}

#[test]
fn error_reply_maps_to_service_failure() {
    let err = parse_reply(br#"{"error":"no path found"}"#).unwrap_err();

    assert_eq!(err.kind, FailureKind::Service { visited: vec![] });
    assert_eq!(err.to_string(), "no path found");
}

#[test]
fn error_wins_over_journey() {
    let body = br#"{"error":"Cannot continue because the page x is missing.",
        "journey":[{"title":"A","url":"u","image":"i","text":"t"}]}"#;

    let err = parse_reply(body).unwrap_err();
    assert_eq!(err.message, "Cannot continue because the page x is missing.");
    assert_eq!(err.visited().len(), 1);
}

#[test]
fn bodies_matching_neither_shape_are_malformed() {
    let bodies: [&[u8]; 6] = [
        b"{}",
        b"[]",
        b"not json",
        b"",
        br#"{"journey":[{"title":"missing fields"}]}"#,
        br#"{"journey":"nope"}"#,
    ];
    for body in bodies {
        let err = parse_reply(body).unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::MalformedBody,
            "body {:?}",
            String::from_utf8_lossy(body)
        );
        assert!(!err.message.is_empty());
    }
}
