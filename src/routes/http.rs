//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; engine errors become a status code plus
//! a JSON `{ "error": ... }` body.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::error::QuizError;
use crate::logic::*;
use crate::protocol::*;
use crate::seeds::catalogue;
use crate::state::AppState;

impl IntoResponse for QuizError {
  fn into_response(self) -> Response {
    let status = match &self {
      QuizError::UnknownSession(_) => StatusCode::NOT_FOUND,
      QuizError::UnknownWidget(_) | QuizError::UnknownMode(_) => StatusCode::NOT_FOUND,
      QuizError::EmptyAnswer
      | QuizError::InvalidNumber(_)
      | QuizError::AnswerCount { .. }
      | QuizError::UnsupportedLevel { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      QuizError::AlreadySubmitted | QuizError::NothingToReveal => StatusCode::CONFLICT,
      QuizError::EmptyBank(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    warn!(target: "mathquiz_backend", %status, error = %self, "Request rejected");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_widgets() -> impl IntoResponse { Json(catalogue()) }

#[instrument(level = "info", skip(state, body), fields(widget = %body.widget))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartIn>,
) -> Result<Json<SessionOut>, QuizError> {
  let out = start_session(&state, &body.widget, body.level).await?;
  info!(target: "quiz", id = %out.session_id, widget = %out.widget, level = out.level, "HTTP session started");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, QuizError> {
  Ok(Json(session_view(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, blanks = body.answers.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<SessionOut>, QuizError> {
  Ok(Json(submit_answers(&state, &body.session_id, body.answers).await?))
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<HintOut>, QuizError> {
  let text = show_hint(&state, &q.session_id).await?;
  info!(target: "quiz", id = %q.session_id, has_hint = text.is_some(), "HTTP hint served");
  Ok(Json(HintOut { text }))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_post_solution(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionQuery>,
) -> Result<Json<SessionOut>, QuizError> {
  Ok(Json(reveal_solution(&state, &body.session_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_post_next(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NextIn>,
) -> Result<Json<SessionOut>, QuizError> {
  Ok(Json(next_question(&state, &body.session_id, body.level).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_check(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> impl IntoResponse {
  Json(check_answer(&state, &body))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_angle(Json(body): Json<AngleIn>) -> impl IntoResponse {
  Json(angle(body))
}

#[instrument(level = "info", skip(q), fields(%mode))]
pub async fn http_get_circle(
  Path(mode): Path<String>,
  Query(q): Query<CircleQuery>,
) -> Result<impl IntoResponse, QuizError> {
  Ok(Json(circle(&mode, &q)?))
}
