//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::QuizError;
use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage, SessionOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "mathquiz_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "mathquiz_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "mathquiz_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "mathquiz_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "mathquiz_backend", "WebSocket disconnected");
}

fn session_reply(r: Result<SessionOut, QuizError>) -> ServerWsMessage {
  match r {
    Ok(session) => ServerWsMessage::Session { session },
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartSession { widget, level } => {
      let r = start_session(state, &widget, level).await;
      if let Ok(s) = &r {
        info!(target: "quiz", id = %s.session_id, %widget, level = s.level, "WS session started");
      }
      session_reply(r)
    }

    ClientWsMessage::SubmitAnswer { session_id, answers } => {
      session_reply(submit_answers(state, &session_id, answers).await)
    }

    ClientWsMessage::Hint { session_id } => match show_hint(state, &session_id).await {
      Ok(_) => session_reply(session_view(state, &session_id).await),
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::RevealSolution { session_id } => session_reply(reveal_solution(state, &session_id).await),

    ClientWsMessage::NextQuestion { session_id, level } => {
      session_reply(next_question(state, &session_id, level).await)
    }

    ClientWsMessage::Check(input) => ServerWsMessage::Check(check_answer(state, &input)),
  }
}
