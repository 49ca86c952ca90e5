//! Websocket endpoint for the realtime channel. Every connected client
//! is a listener on the hub; a text frame received from a client is
//! parsed and re-broadcast to everyone else, never echoed back.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::StreamExt;
use std::sync::Arc;

use super::AppState;
use crate::realtime::Frame;

pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let (id, mut rx) = state.hub().connect();

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                let Some(frame) = outbound else {
                    // Hub closed our channel (shutdown).
                    break;
                };
                let Ok(text) = serde_json::to_string(&frame) else {
                    continue;
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            inbound = socket.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<Frame>(&text) {
                            Ok(frame) => {
                                let delivered = state.hub().publish(Some(id), &frame);
                                tracing::debug!(
                                    "Relayed '{}' from listener {} to {} peers",
                                    frame.event, id, delivered
                                );
                            }
                            Err(err) => {
                                // Malformed frames are dropped without
                                // killing the connection.
                                tracing::debug!("Ignoring malformed frame from listener {}: {}", id, err);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!("Websocket error on listener {}: {}", id, err);
                        break;
                    }
                }
            }
        }
    }

    state.hub().disconnect(id);
}
