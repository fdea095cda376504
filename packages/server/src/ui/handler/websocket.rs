//! WebSocket connection handlers.
//!
//! Each socket is split into a reader loop and a writer task. The reader turns
//! frames into `InboundEvent`s for the dispatcher and enforces the keep-alive;
//! the writer drains the connection's outbox into the socket. When the writer
//! stops first, the reader is asked to stop between frames so that a relay in
//! progress is never cut short.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::{
    sync::{mpsc, oneshot},
    time::Instant,
};

use crate::{
    config::KeepAliveConfig,
    domain::{ConnectionId, InboundEvent, OutboundEvent},
    infrastructure::dto::websocket::{decode_payload, encode_event},
    ui::state::AppState,
    usecase::{DispatchOutcome, RelayDispatcher},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that writes the connection's outbound traffic to the socket.
///
/// Relay events arrive on `rx` and are encoded as JSON text frames; control
/// frames (pings) arrive on `control_rx` and are written as is.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
    mut control_rx: mpsc::UnboundedReceiver<Message>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                Some(event) = rx.recv() => match encode_event(&event) {
                    Ok(text) => Message::Text(text.into()),
                    Err(e) => {
                        tracing::error!(event = event.name(), "Failed to encode event: {}", e);
                        continue;
                    }
                },
                Some(control) = control_rx.recv() => control,
                else => break,
            };

            if sender.send(message).await.is_err() {
                break;
            }
        }
    })
}

/// Reads frames until the client closes, the socket fails, the keep-alive
/// expires or `stop` fires.
///
/// Each frame is dispatched to completion before `stop` is looked at.
async fn receive_loop<S>(
    mut receiver: S,
    dispatcher: Arc<RelayDispatcher>,
    connection_id: ConnectionId,
    control_tx: mpsc::UnboundedSender<Message>,
    keepalive: KeepAliveConfig,
    mut stop: oneshot::Receiver<()>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let mut ping_interval = tokio::time::interval_at(
        Instant::now() + keepalive.ping_interval,
        keepalive.ping_interval,
    );
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            biased;

            frame = receiver.next() => {
                let msg = match frame {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        dispatcher
                            .dispatch(InboundEvent::TransportError {
                                id: connection_id.clone(),
                                reason: e.to_string(),
                            })
                            .await;
                        break;
                    }
                    None => {
                        tracing::debug!(sid = %connection_id, "Socket stream ended");
                        break;
                    }
                };
                last_seen = Instant::now();

                match msg {
                    Message::Text(text) => match decode_payload(text.as_str()) {
                        Ok(payload) => {
                            dispatcher
                                .dispatch(InboundEvent::Message {
                                    id: connection_id.clone(),
                                    payload,
                                })
                                .await;
                        }
                        Err(e) => {
                            dispatcher
                                .dispatch(InboundEvent::TransportError {
                                    id: connection_id.clone(),
                                    reason: format!("malformed payload: {e}"),
                                })
                                .await;
                        }
                    },
                    Message::Binary(data) => {
                        tracing::warn!(sid = %connection_id, len = data.len(), "Ignoring binary frame");
                    }
                    Message::Ping(_) | Message::Pong(_) => {
                        // Pong replies are sent automatically by the WebSocket protocol
                        tracing::trace!(sid = %connection_id, "Heartbeat");
                    }
                    Message::Close(_) => {
                        tracing::info!(sid = %connection_id, "Client requested close");
                        break;
                    }
                }
            }
            _ = &mut stop => {
                tracing::debug!(sid = %connection_id, "Writer stopped, closing reader");
                break;
            }
            _ = ping_interval.tick() => {
                let idle = last_seen.elapsed();
                if idle > keepalive.idle_limit() {
                    tracing::warn!(sid = %connection_id, ?idle, "Keep-alive expired");
                    break;
                }
                if control_tx.send(Message::Ping(Bytes::new())).is_err() {
                    break;
                }
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, receiver) = socket.split();

    // Channel for relay events addressed to this client
    let (tx, rx) = mpsc::unbounded_channel();
    // Channel for keep-alive pings
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    // Asks the reader to stop once the writer is gone
    let (stop_tx, stop_rx) = oneshot::channel();

    // Tell the client its own id before any relay event
    if tx
        .send(OutboundEvent::Connected {
            sid: connection_id.clone(),
        })
        .is_err()
    {
        return;
    }

    match state
        .dispatcher
        .dispatch(InboundEvent::Connect {
            id: connection_id.clone(),
            outbox: tx,
        })
        .await
    {
        DispatchOutcome::Connected { .. } => {}
        outcome => {
            tracing::warn!(sid = %connection_id, ?outcome, "Connection was not registered, closing");
            return;
        }
    }

    let mut send_task = pusher_loop(rx, control_rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.dispatcher.clone(),
        connection_id.clone(),
        control_tx,
        state.keepalive,
        stop_rx,
    ));

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            stop_tx.send(()).ok();
            if let Err(e) = (&mut recv_task).await {
                tracing::warn!(sid = %connection_id, "Reader task failed: {}", e);
            }
        }
    };

    state
        .dispatcher
        .dispatch(InboundEvent::Disconnect { id: connection_id })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::SignalingPayload,
        infrastructure::{registry::InMemoryConnectionRegistry, transport::WebSocketTransport},
    };
    use futures_util::stream;
    use serde_json::json;
    use std::time::Duration;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::try_from(value).unwrap()
    }

    fn quiet_keepalive() -> KeepAliveConfig {
        KeepAliveConfig {
            ping_interval: Duration::from_secs(60),
            ping_timeout: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn test_stop_request_lets_pending_frames_finish() {
        // テスト項目: 停止要求を受けても、受信済みのフレームはすべて中継されてから受信ループが終わる
        // given (前提条件): A, B が接続済みで、A のソケットに 2 フレームが届いている
        let dispatcher = Arc::new(RelayDispatcher::new(
            Arc::new(InMemoryConnectionRegistry::new()),
            Arc::new(WebSocketTransport::new()),
        ));
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        for (name, tx) in [("A", tx_a), ("B", tx_b)] {
            dispatcher
                .dispatch(InboundEvent::Connect { id: id(name), outbox: tx })
                .await;
        }
        while rx_b.try_recv().is_ok() {}

        let frames = stream::iter(vec![
            Ok(Message::Text(r#"{"offer":"x"}"#.to_string().into())),
            Ok(Message::Text(r#"{"hangup":true}"#.to_string().into())),
        ])
        .chain(stream::pending());
        let (control_tx, _control_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        stop_tx.send(()).unwrap();

        // when (操作):
        let finished = tokio::time::timeout(
            Duration::from_secs(5),
            receive_loop(
                Box::pin(frames),
                dispatcher.clone(),
                id("A"),
                control_tx,
                quiet_keepalive(),
                stop_rx,
            ),
        )
        .await;

        // then (期待する結果): ループは終了し、B は両方のメッセージを順番どおりに受け取る
        assert!(finished.is_ok());
        assert_eq!(
            rx_b.try_recv(),
            Ok(OutboundEvent::Message(SignalingPayload::new(json!({"offer": "x"}))))
        );
        assert_eq!(
            rx_b.try_recv(),
            Ok(OutboundEvent::Message(SignalingPayload::new(json!({"hangup": true}))))
        );
        // 切断処理は受信ループの外で行われる
        assert_eq!(dispatcher.connections().await.len(), 2);
    }
}
