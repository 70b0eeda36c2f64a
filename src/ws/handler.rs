//! WebSocket handler for client connections

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::game::game_loop::{spawn_session, Session};
use crate::game::Game;
use crate::outbox::ChannelOutbox;
use crate::protocol::ClientMessage;
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection: one connection, one game
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    state.sessions.insert(session_id, Instant::now());
    info!("Session {} connected ({} active)", session_id, state.session_count());

    state.event_logger.log_session_start(&session_id.to_string());

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    let (outbox, mut outbound) = ChannelOutbox::channel();

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let game = Game::new(GameConfig::default(), state.ledger.clone());
    let session = Session::new(session_id, game, Arc::new(outbox), state.event_logger.clone());
    let session_task = spawn_session(session, command_rx);

    // Task to forward session output to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            let json = msg.to_json();
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Task to receive commands from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => match ClientMessage::parse(&text) {
                    Some(msg) => {
                        if command_tx.send(msg).is_err() {
                            break;
                        }
                    }
                    None => debug!("Session {} sent unknown command {:?}", session_id, text.as_str()),
                },
                Ok(Message::Close(_)) => {
                    info!("Session {} sent close frame", session_id);
                    break;
                }
                Ok(_) => {
                    // Ignore binary, ping, pong frames
                }
                Err(e) => {
                    error!("WebSocket error for session {}: {}", session_id, e);
                    break;
                }
            }
        }
        // Dropping the command sender stops the session
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    session_task.abort();

    state.event_logger.log_session_end(&session_id.to_string());
    if let Some((_, joined)) = state.sessions.remove(&session_id) {
        info!("Session {} disconnected after {:?}", session_id, joined.elapsed());
    }
}
