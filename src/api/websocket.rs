//! WebSocket handler for real-time quote changes.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use tracing::{debug, error, info};

use super::state::AppState;
use crate::db::Database;
use crate::service::Subscription;

/// WebSocket upgrade handler.
///
/// Accepts WebSocket upgrade requests and establishes a connection.
/// Once upgraded, streams every QuoteChange to the client as JSON.
pub async fn ws_handler<D: Database>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<D>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.service().subscribe()))
}

/// Handle an active WebSocket connection.
///
/// The subscription lives exactly as long as the connection.
async fn handle_socket(mut socket: WebSocket, mut subscription: Subscription) {
    info!("WebSocket client connected");

    loop {
        tokio::select! {
            // Receive messages from client
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received from client: {}", text.as_str());
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Client closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }

            // Send changes to client
            change = subscription.next() => {
                let Some(change) = change else {
                    break;
                };

                let json = match serde_json::to_string(&change) {
                    Ok(j) => j,
                    Err(e) => {
                        error!("Failed to serialize change: {}", e);
                        continue;
                    }
                };

                if let Err(e) = socket.send(Message::Text(json.into())).await {
                    error!("Failed to send change: {}", e);
                    break;
                }
            }
        }
    }

    subscription.close();
    info!("WebSocket client disconnected");
}
