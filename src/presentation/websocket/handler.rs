//! WebSocket Connection Handler
//!
//! Upgrades a request into a hub endpoint and runs its two pumps until the
//! connection ends.

use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};
use futures::StreamExt;

use crate::infrastructure::realtime::{inbound_pump, outbound_pump, Endpoint, PumpTiming};
use crate::presentation::http::extractors::ConnectParams;
use crate::startup::AppState;

/// WebSocket upgrade handler
///
/// `ConnectParams` runs first so a missing user id fails with 400 before any
/// upgrade is attempted.
pub async fn ws_handler(
    params: ConnectParams,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    let max_message_size = state.settings.websocket.max_message_size;
    let max_frame_size = state.settings.websocket.max_frame_size;

    ws.max_message_size(max_message_size)
        .max_frame_size(max_frame_size)
        .on_upgrade(move |socket| handle_socket(socket, state, params))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState, params: ConnectParams) {
    let websocket = &state.settings.websocket;
    let timing = PumpTiming::from(websocket);

    let (endpoint, mailbox) = Endpoint::new(
        params.user_id,
        params.room_id.unwrap_or_default(),
        websocket.mailbox_capacity,
    );
    let id = endpoint.id();
    state.hub.register(endpoint);

    // Split socket for concurrent read/write
    let (sink, stream) = socket.split();

    let outbound = tokio::spawn(outbound_pump(mailbox, sink, state.hub.clone(), id, timing));
    let inbound_exit = inbound_pump(stream, state.hub.clone(), id, timing).await;

    match outbound.await {
        Ok(outbound_exit) => tracing::debug!(
            endpoint_id = %id,
            inbound = ?inbound_exit,
            outbound = ?outbound_exit,
            "WebSocket connection closed"
        ),
        Err(e) => tracing::warn!(endpoint_id = %id, error = %e, "Outbound pump task failed"),
    }
}
