//! WebSocket transport for the echo channel.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::TextCommand;

/// Run the echo loop for one accepted channel until the peer disconnects.
///
/// Each message is handled independently and in arrival order; the channel
/// holds no state between messages. Disconnect or transport error ends the
/// channel, there is no reconnection.
pub async fn run_channel(socket: WebSocket, remote: SocketAddr) {
    let channel_id = Uuid::new_v4();
    tracing::info!("+++ websocket client {channel_id} connected from {remote}");

    let (mut sender, mut receiver) = socket.split();

    // Outbound frames go through a queue so replies never block the
    // receive loop.
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(frame).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let reply = handle_text(&text);
                let _ = tx.send(Message::Text(reply.into()));
            }
            Ok(Message::Binary(payload)) => {
                tracing::info!("received binary message of {} bytes", payload.len());
                let _ = tx.send(Message::Binary(payload));
            }
            Ok(Message::Close(_)) => break,
            // Ping/pong control frames are answered by the transport itself.
            Ok(_) => {}
            Err(err) => {
                tracing::error!("websocket error on channel {channel_id}: {err}");
                break;
            }
        }
    }

    send_task.abort();
    tracing::info!("peer {remote} disconnected (channel {channel_id})");
}

/// Reply for one text frame.
fn handle_text(payload: &str) -> String {
    let command = TextCommand::parse(payload);
    tracing::info!(
        "msg=\"{}\" value=\"{}\"",
        command.command,
        command.value.unwrap_or_default()
    );
    command.reply()
}
