//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::{self, state::AppState},
};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// How long a test waits for a single frame
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// In-process server bound to an ephemeral port; stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            let _ = ui::serve(listener, Arc::new(AppState::new())).await;
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a WebSocket and consume the `connect` ack, returning the assigned id
    pub async fn connect(&self) -> (WsClient, String) {
        let (mut ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        match next_event(&mut ws).await {
            ServerEvent::Connect(payload) => (ws, payload.id),
            other => panic!("expected connect event, got {other:?}"),
        }
    }

    /// Number of users the presence endpoint reports
    pub async fn presence_count(&self) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/api/presence", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body.as_array().expect("presence should be an array").len()
    }

    /// Poll the presence endpoint until it reports `expected` users
    pub async fn wait_for_presence_count(&self, expected: usize) {
        for _ in 0..50 {
            if self.presence_count().await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!(
            "presence count never reached {expected} (last: {})",
            self.presence_count().await
        );
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Read the next server event, skipping control frames
pub async fn next_event(ws: &mut WsClient) -> ServerEvent {
    loop {
        let frame = tokio::time::timeout(FRAME_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Failed to parse server event");
        }
    }
}

/// Assert that no text frame arrives within `wait`
pub async fn assert_no_event(ws: &mut WsClient, wait: Duration) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(wait, ws.next()).await {
        panic!("unexpected frame: {}", text.as_str());
    }
}

pub async fn send_event(ws: &mut WsClient, event: &ClientEvent) {
    let json = serde_json::to_string(event).expect("Failed to serialize event");
    send_raw(ws, &json).await;
}

pub async fn send_raw(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}
