//! WebSocket upgrade handler.
//!
//! The socket is receive-only from the client's point of view: the server
//! pushes `FILE_CREATED` frames and ignores anything the client sends.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// GET /ws
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.realtime.connections.register();
    let conn_id = handle.id;
    let ping_interval = state.realtime.ping_interval;

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Outbound forwarder with keepalive pings
    let mut outbound_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                msg = outbound_rx.recv() => {
                    let Some(text) = msg else { break };
                    if ws_tx.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    loop {
        tokio::select! {
            inbound = ws_rx.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = &mut outbound_task => {
                debug!(conn_id = %conn_id, "Outbound forwarder finished");
                break;
            }
        }
    }

    // Cleanup
    outbound_task.abort();
    handle.mark_closed();
    state.realtime.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, "WebSocket connection closed");
}
