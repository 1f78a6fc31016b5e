use chrono::{TimeZone, Utc};
use review_core::{Decision, Metadata, ReviewItem, SaveError};
use review_engine::{RemoteSink, ResultSink};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn item() -> ReviewItem {
    let metadata: Metadata = [("bend".to_string(), Some(0.5)), ("depth".to_string(), None)]
        .into_iter()
        .collect();
    ReviewItem::new("variation_07.png", "images/variation_07.png").with_metadata(metadata)
}

fn sink_for(server: &MockServer) -> RemoteSink {
    RemoteSink::new(format!("{}/api/decision", server.uri()))
}

#[tokio::test]
async fn save_posts_json_record_and_accepts_ok_ack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decision"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    sink_for(&server)
        .save("alice", &item(), Decision::Deny, at)
        .await
        .expect("save ok");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "timestamp": "2026-01-02T03:04:05.000Z",
            "username": "alice",
            "image": "images/variation_07.png",
            "filename": "variation_07.png",
            "decision": "reposition",
            "bend": 0.5,
            "depth": null,
        })
    );
}

#[tokio::test]
async fn backend_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": false, "error": "Database unavailable" })),
        )
        .mount(&server)
        .await;

    let err = sink_for(&server)
        .save("alice", &item(), Decision::Accept, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, SaveError::Rejected("Database unavailable".to_string()));
}

#[tokio::test]
async fn http_failure_without_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = sink_for(&server)
        .save("alice", &item(), Decision::Accept, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, SaveError::Rejected("Save failed (HTTP 502)".to_string()));
    assert_eq!(err.to_string(), "Save failed (HTTP 502)");
}

#[tokio::test]
async fn ok_body_with_error_status_is_still_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = sink_for(&server)
        .save("alice", &item(), Decision::Accept, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, SaveError::Rejected("Save failed (HTTP 500)".to_string()));
}

#[tokio::test]
async fn success_status_without_ack_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
        .mount(&server)
        .await;

    let err = sink_for(&server)
        .save("alice", &item(), Decision::Accept, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, SaveError::Rejected("Save failed (HTTP 200)".to_string()));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let endpoint = format!("http://127.0.0.1:{port}/api/decision");

    let err = RemoteSink::new(endpoint)
        .save("alice", &item(), Decision::Accept, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Transport(_)));
}

#[tokio::test]
async fn one_sink_serves_consecutive_saves() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decision"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&server)
        .await;

    let sink = sink_for(&server);
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    sink.save("alice", &item(), Decision::Accept, at)
        .await
        .expect("first save ok");
    sink.save("alice", &item(), Decision::Deny, at)
        .await
        .expect("second save ok");

    let requests = server.received_requests().await.expect("recording enabled");
    let decisions: Vec<String> = requests
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["decision"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(decisions, vec!["accept", "reposition"]);
}
