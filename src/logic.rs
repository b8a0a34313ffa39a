//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Starting sessions and stepping them (submit, hint, solution, next)
//!   - Stateless answer checks
//!   - Geometry helpers for the angle and circle-theorem widgets

use tracing::{debug, info, instrument};

use crate::answer::normalize_and_compare;
use crate::domain::{BlankAnswer, Widget};
use crate::error::QuizError;
use crate::geometry::{angle_figure, AngleFigure, CircleFigure, CircleScene, Point, TheoremMode};
use crate::protocol::{session_out, AngleIn, CheckIn, CheckOut, CircleQuery, SessionOut};
use crate::render::{input_to_latex, render_or_plain};
use crate::session::Action;
use crate::state::AppState;
use crate::util::trunc_for_log;

const DEFAULT_ARC_RADIUS: f64 = 30.0;

#[instrument(level = "info", skip(state), fields(%widget))]
pub async fn start_session(state: &AppState, widget: &str, level: Option<u8>) -> Result<SessionOut, QuizError> {
  let w = Widget::from_slug(widget).ok_or_else(|| QuizError::UnknownWidget(widget.to_string()))?;
  let s = state.create_session(w, level.unwrap_or(1)).await?;
  Ok(session_out(&s, state.renderer.as_ref()))
}

#[instrument(level = "debug", skip(state), fields(%session_id))]
pub async fn session_view(state: &AppState, session_id: &str) -> Result<SessionOut, QuizError> {
  let s = state.get_session(session_id).await?;
  Ok(session_out(&s, state.renderer.as_ref()))
}

#[instrument(level = "info", skip(state, answers), fields(%session_id, blanks = answers.len()))]
pub async fn submit_answers(state: &AppState, session_id: &str, answers: Vec<BlankAnswer>) -> Result<SessionOut, QuizError> {
  for a in &answers {
    if let BlankAnswer::Text(t) = a {
      debug!(target: "quiz", %session_id, answer = %trunc_for_log(t, 64), "Answer received");
    }
  }
  let s = state.apply(session_id, Action::Submit(answers)).await?;
  if let Some(fb) = &s.feedback {
    info!(target: "quiz", %session_id, correct = fb.correct, points = fb.points, score = s.score, streak = s.streak, "Answer evaluated");
  }
  Ok(session_out(&s, state.renderer.as_ref()))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn show_hint(state: &AppState, session_id: &str) -> Result<Option<String>, QuizError> {
  let s = state.apply(session_id, Action::ShowHint).await?;
  Ok(if s.hint_shown { s.question.hint } else { None })
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn reveal_solution(state: &AppState, session_id: &str) -> Result<SessionOut, QuizError> {
  let s = state.apply(session_id, Action::RevealSolution).await?;
  Ok(session_out(&s, state.renderer.as_ref()))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn next_question(state: &AppState, session_id: &str, level: Option<u8>) -> Result<SessionOut, QuizError> {
  let s = state.advance(session_id, level).await?;
  Ok(session_out(&s, state.renderer.as_ref()))
}

#[instrument(level = "debug", skip(state, input), fields(answer_len = input.answer.len(), accepted = input.accepted.len()))]
pub fn check_answer(state: &AppState, input: &CheckIn) -> CheckOut {
  let verdict = normalize_and_compare(&input.answer, &input.accepted, input.profile, input.permute_terms);
  CheckOut {
    correct: verdict.correct,
    expected: verdict.expected,
    preview: render_or_plain(state.renderer.as_ref(), &input_to_latex(&input.answer), false),
  }
}

pub fn angle(input: AngleIn) -> AngleFigure {
  let labels = input.labels.unwrap_or_else(|| ["A".into(), "B".into(), "C".into()]);
  angle_figure(input.vertex, input.arm1, input.arm2, input.radius.unwrap_or(DEFAULT_ARC_RADIUS), labels)
}

/// Default scene for `mode`, after the optional drag in `q`.
pub fn circle(mode: &str, q: &CircleQuery) -> Result<CircleFigure, QuizError> {
  let mode = TheoremMode::parse(mode)?;
  let mut scene = CircleScene::new(mode);
  if let (Some(name), Some(x), Some(y)) = (&q.point, q.x, q.y) {
    scene.drag(name, Point::new(x, y));
  }
  Ok(scene.measure())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::NormalizeProfile;

  #[test]
  fn stateless_check_uses_profile() {
    let state = AppState::from_config(Default::default());
    let v = check_answer(&state, &CheckIn {
      answer: "x >= 3".into(),
      accepted: vec!["x≥3".into()],
      profile: NormalizeProfile::Inequality,
      permute_terms: false,
    });
    assert!(v.correct);
    assert_eq!(v.expected, "x≥3");
    assert!(v.preview.contains("x &gt;= 3"));

    let v = check_answer(&state, &CheckIn {
      answer: "x^5/y^2".into(),
      accepted: vec!["x^5/y^2".into()],
      profile: NormalizeProfile::Index,
      permute_terms: false,
    });
    assert!(v.correct);
    assert!(v.preview.contains("\\frac{x^{5}}{y^{2}}"));
  }

  #[test]
  fn angle_defaults_and_right_angle() {
    let fig = angle(AngleIn {
      vertex: Point::new(0.0, 0.0),
      arm1: Point::new(10.0, 0.0),
      arm2: Point::new(0.0, 10.0),
      radius: None,
      labels: None,
    });
    assert_eq!(fig.degrees, 90.0);
    assert_eq!(fig.labels[1], "B");
  }

  #[test]
  fn circle_modes_parse_and_drag() {
    assert_eq!(circle("nope", &CircleQuery::default()).unwrap_err(), QuizError::UnknownMode("nope".into()));
    let fig = circle("semicircle", &CircleQuery { point: Some("P".into()), x: Some(350.0), y: Some(100.0) }).unwrap();
    assert_eq!(fig.value("∠APB"), Some(90.0));
  }

  #[tokio::test]
  async fn unknown_widget_is_reported() {
    let state = AppState::from_config(Default::default());
    let err = start_session(&state, "algebra", None).await.unwrap_err();
    assert_eq!(err, QuizError::UnknownWidget("algebra".into()));
    let out = start_session(&state, "index-laws", Some(2)).await.unwrap();
    assert_eq!(out.level, 2);
    assert!(show_hint(&state, &out.session_id).await.unwrap().is_some());
  }
}
