//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::ConnectionId,
    infrastructure::dto::conversion::parse_client_event,
    ui::state::AppState,
    usecase::EventRouter,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and writes them to the WebSocket.
///
/// Everything the server sends to this connection goes through the channel
/// registered with the MessagePusher.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Parse one text frame and hand it to the router.
async fn handle_frame(event_router: &EventRouter, sender: ConnectionId, text: &str) {
    match parse_client_event(text) {
        Ok(event) => event_router.dispatch(sender, event).await,
        Err(error) => event_router.reject(sender, error).await,
    }
}

/// Wait until either loop ends, then stop the other and wait for it as well.
///
/// Returns only once both tasks are gone, so no event from this connection
/// can be dispatched after its disconnect.
async fn wait_for_either(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive outbound events
    let (tx, rx) = mpsc::unbounded_channel();
    state.event_router.connect(connection_id, tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let (sender, mut receiver) = socket.split();
    let event_router = state.event_router.clone();

    // Spawn a task to receive events from this connection
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id, text.as_str());
                    handle_frame(&event_router, connection_id, text.as_str()).await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to deliver outbound events to this connection
    let send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    wait_for_either(recv_task, send_task).await;

    // disconnect
    match state.event_router.disconnect(&connection_id).await {
        Some(departure) if departure.room_closed => tracing::info!(
            "Connection '{}' closed, room '{}' destroyed",
            connection_id,
            departure.room_id
        ),
        Some(departure) => tracing::info!(
            "Connection '{}' closed, left room '{}'",
            connection_id,
            departure.room_id
        ),
        None => tracing::info!("Connection '{}' closed", connection_id),
    }
}
