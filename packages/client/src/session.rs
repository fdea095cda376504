//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tsunagi_server::infrastructure::dto::websocket::EventFrame;
use tsunagi_shared::time::get_timestamp;

use crate::{domain::parse_input, error::ClientError};

use super::{
    formatter::EventFormatter,
    ui::{PROMPT, redisplay_prompt},
};

/// How a session ended without error
pub enum SessionEnd {
    /// The user closed the input (Ctrl+C / Ctrl+D)
    UserExit,
}

/// Spawn the blocking readline thread; lines are forwarded on the returned channel.
///
/// The thread outlives individual sessions so that history survives reconnects.
pub fn spawn_input_reader() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one WebSocket client session until the user exits or the connection drops.
pub async fn run_client_session(
    url: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to signaling relay at {}", url);
    println!(
        "\nType JSON payloads or `offer <sdp>`, `answer <sdp>`, `candidate <c>`, `hangup`. Press Ctrl+C to exit.\n"
    );

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<EventFrame>(text.as_str()) {
                        Ok(frame) => EventFormatter::format_event(&frame, get_timestamp()),
                        Err(_) => EventFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    return ClientError::ConnectionLost("server closed the connection".to_string());
                }
                Err(e) => {
                    return ClientError::ConnectionLost(e.to_string());
                }
                _ => {}
            }
        }
        ClientError::ConnectionLost("stream ended".to_string())
    });

    loop {
        tokio::select! {
            result = &mut read_task => {
                return Err(result.unwrap_or_else(|e| ClientError::ConnectionLost(e.to_string())));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    read_task.abort();
                    write.send(Message::Close(None)).await.ok();
                    return Ok(SessionEnd::UserExit);
                };

                let payload = match parse_input(&line) {
                    Ok(payload) => payload,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt();
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::text(payload.to_string())).await {
                    read_task.abort();
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }

                print!("{}", EventFormatter::format_sent_confirmation(&payload, get_timestamp()));
                redisplay_prompt();
            }
        }
    }
}
