use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::room::ConnectionId;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text frame to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next text frame from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handler for incoming text frames
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, connection: ConnectionId, message: String);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                // Binary, ping and pong frames carry nothing for us
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// One managed socket: pumps outbound frames queued by the connection
/// manager and hands inbound frames to the message handler.
pub struct Connection {
    pub id: ConnectionId,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            id,
            socket,
            outbound_receiver,
            message_handler,
        }
    }

    /// Run the connection - handles both sending and receiving until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => {
                            self.socket.send_message(message).await?
                        }
                        None => break,
                    }
                }

                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            self.message_handler
                                .handle_message(self.id, message)
                                .await;
                        }
                        Ok(None) => break,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
