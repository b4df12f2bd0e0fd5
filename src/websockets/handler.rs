use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::room::ConnectionId;
use crate::shared::AppState;

use super::socket::{Connection, MessageHandler};

/// WebSocket endpoint for signaling clients
/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Drive one upgraded socket from accept to cleanup
async fn handle_websocket_connection(socket: WebSocket, app_state: AppState) {
    let connection_id = ConnectionId::new();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Outbound channel (router -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .router
        .connect(connection_id, outbound_sender)
        .await;

    let message_handler: Arc<dyn MessageHandler> = app_state.router.clone();
    let connection = Connection::new(
        connection_id,
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    // Membership cleanup runs however the socket ended
    app_state.router.disconnect(connection_id).await;
}
