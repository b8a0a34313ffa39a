//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Accepted answers never leave the server: questions are sent as
//! `QuestionOut`, which carries only what the widget needs to draw inputs.

use serde::{Deserialize, Serialize};

use crate::answer::NormalizeProfile;
use crate::domain::{AnswerCheck, Blank, BlankAnswer, BlankRole, Feedback, Figure, Question, Segment, Widget};
use crate::geometry::Point;
use crate::render::{render_or_plain, FormulaRenderer};
use crate::session::{Phase, Session};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  StartSession {
    widget: String,
    level: Option<u8>,
  },
  SubmitAnswer {
    #[serde(rename = "sessionId")]
    session_id: String,
    answers: Vec<BlankAnswer>,
  },
  Hint {
    #[serde(rename = "sessionId")]
    session_id: String,
  },
  RevealSolution {
    #[serde(rename = "sessionId")]
    session_id: String,
  },
  NextQuestion {
    #[serde(rename = "sessionId")]
    session_id: String,
    level: Option<u8>,
  },
  Check(CheckIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Session { session: SessionOut },
  Check(CheckOut),
  Error { message: String },
}

/// What the widget draws for one blank.
#[derive(Debug, Serialize, PartialEq)]
pub struct BlankOut {
  pub label: String,
  pub role: BlankRole,
  /// Input style: "text", "number", "integer" or "number_set".
  pub input: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub segment: Option<Segment>,
  /// Keyword occurrences that take a fill, in reading order.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub slots: Vec<usize>,
}

impl From<&Blank> for BlankOut {
  fn from(b: &Blank) -> Self {
    let input = match b.check {
      AnswerCheck::Text { .. } | AnswerCheck::ContainsAll { .. } => "text",
      AnswerCheck::Numeric { .. } => "number",
      AnswerCheck::Integer { .. } => "integer",
      AnswerCheck::NumberSet { .. } => "number_set",
    };
    BlankOut {
      label: b.label.clone(),
      role: b.role,
      input,
      slots: b.segment.as_ref().map(Segment::slot_indices).unwrap_or_default(),
      segment: b.segment.clone(),
    }
  }
}

/// DTO used by both WS and HTTP for question delivery.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
  pub id: String,
  pub widget: Widget,
  pub level: u8,
  pub prompt: String,
  pub markup: Option<String>,
  /// `markup` rendered for display, or escaped plain text.
  pub rendered: Option<String>,
  pub blanks: Vec<BlankOut>,
  pub figure: Option<Figure>,
  pub has_hint: bool,
}

pub fn question_out(q: &Question, renderer: &dyn FormulaRenderer) -> QuestionOut {
  QuestionOut {
    id: q.id.clone(),
    widget: q.widget,
    level: q.level,
    prompt: q.prompt.clone(),
    rendered: q.markup.as_deref().map(|m| render_or_plain(renderer, m, true)),
    markup: q.markup.clone(),
    blanks: q.blanks.iter().map(BlankOut::from).collect(),
    figure: q.figure.clone(),
    has_hint: q.hint.is_some(),
  }
}

#[derive(Debug, Serialize)]
pub struct StepOut {
  pub label: String,
  pub math: String,
  pub rendered: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
  #[serde(rename = "sessionId")]
  pub session_id: String,
  pub widget: Widget,
  pub level: u8,
  #[serde(flatten)]
  pub phase: Phase,
  pub score: u32,
  pub streak: u32,
  pub answered: u32,
  pub question: QuestionOut,
  pub feedback: Option<Feedback>,
  pub hint: Option<String>,
  /// Worked solution, once revealed.
  pub solution: Option<Vec<StepOut>>,
}

pub fn session_out(s: &Session, renderer: &dyn FormulaRenderer) -> SessionOut {
  let solution = s.feedback.as_ref().and_then(|f| f.solution.as_ref()).map(|steps| {
    steps
      .iter()
      .map(|st| StepOut {
        label: st.label.clone(),
        math: st.math.clone(),
        rendered: render_or_plain(renderer, &st.math, false),
      })
      .collect()
  });
  SessionOut {
    session_id: s.id.clone(),
    widget: s.widget,
    level: s.level,
    phase: s.phase,
    score: s.score,
    streak: s.streak,
    answered: s.answered,
    question: question_out(&s.question, renderer),
    feedback: s.feedback.clone(),
    hint: if s.hint_shown { s.question.hint.clone() } else { None },
    solution,
  }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct StartIn {
  pub widget: String,
  pub level: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
  #[serde(rename = "sessionId")]
  pub session_id: String,
  pub answers: Vec<BlankAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
  #[serde(rename = "sessionId")]
  pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct NextIn {
  #[serde(rename = "sessionId")]
  pub session_id: String,
  pub level: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct HintOut {
  pub text: Option<String>,
}

/// Stateless answer check against an explicit accepted list.
#[derive(Debug, Deserialize)]
pub struct CheckIn {
  pub answer: String,
  pub accepted: Vec<String>,
  #[serde(default)]
  pub profile: NormalizeProfile,
  #[serde(default)]
  pub permute_terms: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckOut {
  pub correct: bool,
  pub expected: String,
  /// The typed answer as LaTeX, rendered for a live preview.
  pub preview: String,
}

#[derive(Debug, Deserialize)]
pub struct AngleIn {
  pub vertex: Point,
  pub arm1: Point,
  pub arm2: Point,
  pub radius: Option<f64>,
  pub labels: Option<[String; 3]>,
}

/// Optional drag applied to the default scene of a circle theorem.
#[derive(Debug, Default, Deserialize)]
pub struct CircleQuery {
  pub point: Option<String>,
  pub x: Option<f64>,
  pub y: Option<f64>,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
  pub error: String,
}
