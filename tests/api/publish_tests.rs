//! Publish API Tests
//!
//! Publishing goes through the real hub; listeners are registered directly
//! on it so delivery can be observed without a socket.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use school_chat_hub::domain::Role;
use school_chat_hub::infrastructure::realtime::{Endpoint, Mailbox};

use crate::common::{json_body, token_for, TestApp};

fn listen(app: &TestApp, user_id: &str, room: &str) -> Mailbox {
    let (endpoint, mailbox) = Endpoint::new(user_id, room, 16);
    app.state.hub.register(endpoint);
    mailbox
}

async fn next_envelope(mailbox: &mut Mailbox) -> Value {
    let payload = tokio::time::timeout(Duration::from_secs(1), mailbox.recv())
        .await
        .expect("no payload within a second")
        .expect("mailbox closed");
    serde_json::from_slice(&payload).unwrap()
}

#[tokio::test]
async fn test_message_reaches_room_members_only() {
    let app = TestApp::new().await;
    let mut member = listen(&app, "s1", "grade-5");
    let mut outsider = listen(&app, "s2", "grade-6");

    let response = app
        .post_json_auth(
            "/api/rooms/grade-5/messages",
            &json!({ "content": "Homework is on page 12" }),
            &token_for("t1", Role::Teacher),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["type"], "regular");
    assert_eq!(body["group_id"], "grade-5");
    assert_eq!(body["sender_id"], "t1");

    let envelope = next_envelope(&mut member).await;
    assert_eq!(envelope["type"], "new_message");
    assert_eq!(envelope["message"]["id"], body["id"]);
    assert_eq!(envelope["message"]["content"], "Homework is on page 12");

    app.state.hub.snapshot().await.unwrap();
    assert!(outsider.try_recv().is_none());
}

#[tokio::test]
async fn test_publish_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/rooms/grade-5/messages", &json!({ "content": "hi" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_json_auth(
            "/api/rooms/grade-5/messages",
            &json!({ "content": "hi" }),
            "not-a-jwt",
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], "Invalid token");
}

#[tokio::test]
async fn test_empty_content_fails_validation() {
    let app = TestApp::new().await;

    let response = app
        .post_json_auth(
            "/api/rooms/grade-5/messages",
            &json!({ "content": "" }),
            &token_for("s1", Role::Student),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 10007);
    assert_eq!(body["errors"][0]["field"], "content");
}

#[tokio::test]
async fn test_blank_room_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json_auth(
            "/api/rooms/%20/messages",
            &json!({ "content": "hi" }),
            &token_for("s1", Role::Student),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Room ID is required");
}

#[tokio::test]
async fn test_student_cannot_announce() {
    let app = TestApp::new().await;

    let response = app
        .post_json_auth(
            "/api/rooms/grade-5/announcements",
            &json!({ "title": "Trip", "content": "Bring lunch" }),
            &token_for("s1", Role::Student),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_teacher_announcement_is_delivered() {
    let app = TestApp::new().await;
    let mut member = listen(&app, "p1", "grade-5");

    let response = app
        .post_json_auth(
            "/api/rooms/grade-5/announcements",
            &json!({ "title": "Trip", "content": "Bring lunch" }),
            &token_for("t1", Role::Teacher),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let envelope = next_envelope(&mut member).await;
    assert_eq!(envelope["type"], "announcement");
    assert_eq!(envelope["message"]["title"], "Trip");
    assert_eq!(envelope["message"]["read_by"], json!([]));
    assert_eq!(envelope["message"]["sender"]["role"], "teacher");
}

#[tokio::test]
async fn test_system_notice_reaches_everyone() {
    let app = TestApp::new().await;
    let mut in_room = listen(&app, "s1", "grade-5");
    let mut roomless = listen(&app, "s2", "");

    let response = app
        .post_json_auth(
            "/api/broadcast",
            &json!({ "content": "School closes at noon", "level": "warning" }),
            &token_for("p1", Role::Principal),
        )
        .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(json_body(response).await["notice"]["level"], "warning");

    for mailbox in [&mut in_room, &mut roomless] {
        let envelope = next_envelope(mailbox).await;
        assert_eq!(envelope["type"], "system_notice");
        assert_eq!(envelope["notice"]["content"], "School closes at noon");
    }
}

#[tokio::test]
async fn test_teacher_cannot_send_system_notice() {
    let app = TestApp::new().await;

    let response = app
        .post_json_auth(
            "/api/broadcast",
            &json!({ "content": "School closes at noon" }),
            &token_for("t1", Role::Teacher),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
