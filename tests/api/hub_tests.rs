//! Hub Stats API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use school_chat_hub::domain::Role;
use school_chat_hub::infrastructure::realtime::Endpoint;

use crate::common::{json_body, token_for, TestApp};

#[tokio::test]
async fn test_stats_count_clients_and_rooms() {
    let app = TestApp::new().await;
    let mut mailboxes = Vec::new();
    for (user, room) in [("a", "grade-5"), ("b", "grade-5"), ("c", "grade-6"), ("d", "")] {
        let (endpoint, mailbox) = Endpoint::new(user, room, 4);
        app.state.hub.register(endpoint);
        mailboxes.push(mailbox);
    }

    let response = app
        .get_auth("/api/hub/stats", &token_for("admin", Role::Admin))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "connected_clients": 4,
            "active_rooms": 2,
            "rooms": [
                { "room_id": "grade-5", "members": 2 },
                { "room_id": "grade-6", "members": 1 },
            ],
        })
    );
}

#[tokio::test]
async fn test_stats_require_administrative_role() {
    let app = TestApp::new().await;

    let response = app
        .get_auth("/api/hub/stats", &token_for("t1", Role::Teacher))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
