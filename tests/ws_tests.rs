use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use plantwatch::api::AppState;
use plantwatch::config::Config;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serve the app on an ephemeral port and return the state handle plus
/// the websocket URL of the realtime endpoint.
async fn spawn_server() -> (Arc<AppState>, String) {
    let db_path = std::env::temp_dir().join(format!("plantwatch-ws-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());

    let state = plantwatch::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = plantwatch::api::router(state.clone()).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, format!("ws://{addr}/api/events"))
}

async fn connect(url: &str) -> WsClient {
    let (socket, _response) = connect_async(url).await.expect("Websocket handshake failed");
    socket
}

/// The handshake response races the hub registration, so poll before
/// publishing anything.
async fn wait_for_listeners(state: &AppState, expected: usize) {
    for _ in 0..200 {
        if state.hub().listener_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "Hub never reached {} listeners (currently {})",
        expected,
        state.hub().listener_count()
    );
}

async fn recv_frame(socket: &mut WsClient) -> Value {
    let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("Timed out waiting for a frame")
        .expect("Stream ended before a frame arrived")
        .expect("Websocket error while receiving");

    match message {
        Message::Text(text) => serde_json::from_str(&text).expect("Relayed frame was not JSON"),
        other => panic!("Expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn new_data_frames_reach_every_listener_except_the_sender() {
    let (state, url) = spawn_server().await;

    let mut sender = connect(&url).await;
    let mut peer = connect(&url).await;
    wait_for_listeners(&state, 2).await;

    let frame = json!({"event": "new_data", "payload": {"machine": "presse-3", "valeur": 42}});
    sender
        .send(Message::Text(frame.to_string().into()))
        .await
        .unwrap();

    // The other listener gets the frame unchanged.
    assert_eq!(recv_frame(&mut peer).await, frame);

    // The sender never hears its own frame back.
    let echo = tokio::time::timeout(Duration::from_millis(300), sender.next()).await;
    assert!(echo.is_err(), "Sender received its own frame: {echo:?}");
}

#[tokio::test]
async fn malformed_frames_are_dropped_without_closing_the_connection() {
    let (state, url) = spawn_server().await;

    let mut sender = connect(&url).await;
    let mut peer = connect(&url).await;
    wait_for_listeners(&state, 2).await;

    sender
        .send(Message::Text("definitely not json".into()))
        .await
        .unwrap();
    sender
        .send(Message::Text(json!({"event": "x"}).to_string().into()))
        .await
        .unwrap();

    let frame = json!({"event": "new_data", "payload": {"ok": true}});
    sender
        .send(Message::Text(frame.to_string().into()))
        .await
        .unwrap();

    // Only the well-formed frame comes through, and the sender's
    // connection survived the garbage.
    assert_eq!(recv_frame(&mut peer).await, frame);
    assert_eq!(state.hub().listener_count(), 2);
}

#[tokio::test]
async fn closed_listener_is_removed_from_the_registry() {
    let (state, url) = spawn_server().await;

    let mut socket = connect(&url).await;
    wait_for_listeners(&state, 1).await;

    socket.close(None).await.unwrap();
    wait_for_listeners(&state, 0).await;
}
