//! Interactive client loop.

use chrono::{DateTime, Local};
use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{ReceiveMessagePayload, ServerEvent};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{error::ClientError, session::ClientSession};

/// Server endpoint used when none is given
pub const DEFAULT_URL: &str = "ws://127.0.0.1:3001/ws";

/// Connect to `url` and chat until either side closes.
pub async fn run_client(url: &str) -> Result<(), ClientError> {
    let mut session = ClientSession::new();
    session.begin_connect()?;

    tracing::info!("Connecting to {}", url);
    let (ws, _) = connect_async(url).await?;
    let (mut write, mut read) = ws.split();

    // rustyline blocks, so it runs on its own thread and feeds lines through a channel
    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_lines(line_tx));

    loop {
        tokio::select! {
            frame = read.next() => {
                let Some(frame) = frame else { break };
                match frame? {
                    Message::Text(text) => {
                        let event: ServerEvent = serde_json::from_str(text.as_str())?;
                        let connected = matches!(event, ServerEvent::Connect(_));
                        let received = session.handle_event(event)?.cloned();
                        if let Some(message) = received {
                            println!("{}", render(&message, session.is_mine(&message)));
                        }
                        if connected {
                            tracing::info!(
                                "Connected as '{}'",
                                session.own_id().unwrap_or_default()
                            );
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    _ => {}
                }
            }
            line = line_rx.recv() => {
                let Some(line) = line else {
                    // Editor finished (Ctrl+C / Ctrl+D)
                    let _ = write.close().await;
                    break;
                };
                if let Some(event) = session.compose(&line) {
                    let json = serde_json::to_string(&event)?;
                    write.send(Message::Text(json.into())).await?;
                }
            }
        }
    }

    session.disconnect()?;
    tracing::info!("Disconnected");
    Ok(())
}

/// Read lines until EOF or interrupt
fn read_lines(tx: mpsc::UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to start line editor: {}", e);
            return;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                break;
            }
        }
    }
}

/// One-line rendering of a received message
fn render(message: &ReceiveMessagePayload, mine: bool) -> String {
    let time = DateTime::parse_from_rfc3339(&message.timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| message.timestamp.clone());
    let who = if mine {
        format!("{} (you)", message.user.name)
    } else {
        message.user.name.clone()
    };
    format!("[{time}] {who}: {}", message.content)
}
