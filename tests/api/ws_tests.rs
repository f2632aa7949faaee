//! WebSocket Endpoint Tests
//!
//! Pre-upgrade checks go through the in-process router; the connection
//! lifecycle tests serve the router on a loopback port and connect a real
//! websocket client.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream,
};

use school_chat_hub::infrastructure::realtime::{Hub, HubSnapshot};
use school_chat_hub::startup::{build_router, AppState};

use crate::common::{json_body, test_settings, TestApp};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serve the full router on an ephemeral loopback port
async fn serve() -> (SocketAddr, Hub) {
    let state = AppState::new(test_settings());
    let hub = state.hub.clone();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    (addr, hub)
}

async fn connect(addr: SocketAddr, query: &str) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws?{}", addr, query))
        .await
        .unwrap();
    client
}

/// Poll the hub until `done` holds; registration happens after the upgrade
/// response, so it is not visible the instant the handshake completes.
async fn wait_for(hub: &Hub, done: impl Fn(&HubSnapshot) -> bool) -> HubSnapshot {
    for _ in 0..200 {
        let snapshot = hub.snapshot().await.unwrap();
        if done(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("hub never reached the expected state");
}

/// Next text or binary frame, skipping control frames
async fn next_data(client: &mut Client) -> WsMessage {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .expect("no frame within two seconds")
            .expect("connection ended")
            .unwrap();
        match message {
            WsMessage::Text(_) | WsMessage::Binary(_) => return message,
            _ => continue,
        }
    }
}

#[tokio::test]
async fn test_missing_user_id_is_rejected_before_upgrade() {
    let app = TestApp::new().await;

    let response = app.get("/ws?roomId=grade-5").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "User ID is required");

    let snapshot = app.state.hub.snapshot().await.unwrap();
    assert_eq!(snapshot.clients, 0);
}

#[tokio::test]
async fn test_request_without_upgrade_headers_registers_nothing() {
    let app = TestApp::new().await;

    let response = app.get("/ws?userId=u1&roomId=grade-5").await;

    assert!(response.status().is_client_error());
    let snapshot = app.state.hub.snapshot().await.unwrap();
    assert_eq!(snapshot.clients, 0);
}

#[tokio::test]
async fn test_connection_joins_room_and_receives_in_order() {
    let (addr, hub) = serve().await;
    let mut client = connect(addr, "userId=u1&roomId=r1").await;

    let snapshot = wait_for(&hub, |s| s.clients == 1).await;
    assert_eq!(snapshot.room_size("r1"), 1);

    hub.broadcast_to_room("r1", "hello");
    hub.broadcast_all(Bytes::from_static(&[0xff, 0x00]));
    hub.broadcast_to_room("r1", "again");

    match next_data(&mut client).await {
        WsMessage::Text(text) => assert_eq!(text.as_str(), "hello"),
        other => panic!("expected text frame, got {:?}", other),
    }
    match next_data(&mut client).await {
        WsMessage::Binary(data) => assert_eq!(&data[..], &[0xff, 0x00]),
        other => panic!("expected binary frame, got {:?}", other),
    }
    match next_data(&mut client).await {
        WsMessage::Text(text) => assert_eq!(text.as_str(), "again"),
        other => panic!("expected text frame, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_close_unregisters_and_prunes_room() {
    let (addr, hub) = serve().await;
    let mut client = connect(addr, "userId=u1&roomId=r1").await;
    wait_for(&hub, |s| s.clients == 1).await;

    client.close(None).await.unwrap();

    let snapshot = wait_for(&hub, |s| s.clients == 0).await;
    assert!(snapshot.rooms.is_empty());
}

#[tokio::test]
async fn test_roomless_connection_gets_only_global_traffic() {
    let (addr, hub) = serve().await;
    let mut client = connect(addr, "userId=u1").await;

    let snapshot = wait_for(&hub, |s| s.clients == 1).await;
    assert!(snapshot.rooms.is_empty());

    hub.broadcast_to_room("r1", "room only");
    hub.broadcast_all("everyone");

    match next_data(&mut client).await {
        WsMessage::Text(text) => assert_eq!(text.as_str(), "everyone"),
        other => panic!("expected text frame, got {:?}", other),
    }
}
