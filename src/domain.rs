//! Domain models used by the backend: widgets, questions, blanks, answer checks and feedback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::NormalizeProfile;
use crate::geometry::{AngleFigure, CircleFigure};
use crate::quiz::compound::NumberLine;
use crate::quiz::dispersion::DatasetFigure;

/// Every quiz screen the frontend can route to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
  AngleQuiz,
  CircleTheorems,
  IdentityQuiz,
  SimultaneousEq,
  Inequality,
  CompoundInequality,
  Dispersion,
  IndexLaws,
}

impl Widget {
  pub const ALL: [Widget; 8] = [
    Widget::AngleQuiz,
    Widget::CircleTheorems,
    Widget::IdentityQuiz,
    Widget::SimultaneousEq,
    Widget::Inequality,
    Widget::CompoundInequality,
    Widget::Dispersion,
    Widget::IndexLaws,
  ];

  pub fn slug(&self) -> &'static str {
    match self {
      Widget::AngleQuiz => "angle-quiz",
      Widget::CircleTheorems => "circle-theorems",
      Widget::IdentityQuiz => "identity-quiz",
      Widget::SimultaneousEq => "simultaneous-eq",
      Widget::Inequality => "inequality",
      Widget::CompoundInequality => "compound-inequality",
      Widget::Dispersion => "dispersion",
      Widget::IndexLaws => "index-laws",
    }
  }

  pub fn from_slug(slug: &str) -> Option<Widget> {
    Widget::ALL.iter().copied().find(|w| w.slug() == slug)
  }

  /// Number of selectable levels (1-based).
  pub fn levels(&self) -> u8 {
    match self {
      Widget::IdentityQuiz => 3,
      Widget::SimultaneousEq | Widget::Inequality | Widget::IndexLaws => 2,
      _ => 1,
    }
  }

  /// Points awarded for each correct answer blank.
  pub fn points_per_blank(&self) -> u32 {
    match self {
      Widget::IdentityQuiz | Widget::CompoundInequality => 10,
      _ => 1,
    }
  }
}

impl fmt::Display for Widget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.slug())
  }
}

/// How a blank decides whether an answer is acceptable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerCheck {
  /// Normalized string equality against the accepted list; `permute_terms`
  /// additionally tolerates reordered additive terms (expand mode only).
  Text { profile: NormalizeProfile, permute_terms: bool },
  Numeric { expected: f64, tolerance: f64 },
  /// Unordered comma separated numbers; an empty set means "no such value".
  NumberSet { expected: Vec<f64> },
  Integer { expected: i64 },
  /// Working-step credit: every keyword must appear in the normalized input.
  ContainsAll { keywords: Vec<String>, profile: NormalizeProfile },
}

/// Answer blanks decide correctness; working blanks only earn a remark.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlankRole {
  #[default]
  Answer,
  Working,
}

/// A templated sentence with keywords that become input slots.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Segment {
  pub text: String,
  pub keywords: Vec<String>,
  /// Keyword indices shown as plain text instead of a slot.
  #[serde(default)] pub skip: Vec<usize>,
  /// Keyword indices in the order their fills are joined; default is reading order.
  #[serde(default)] pub preview_order: Option<Vec<usize>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Blank {
  pub label: String,
  /// Author-curated canonical answers; the first one is shown as "the" answer.
  pub accepted: Vec<String>,
  pub check: AnswerCheck,
  #[serde(default)] pub role: BlankRole,
  #[serde(default)] pub segment: Option<Segment>,
}

impl Blank {
  pub fn text(label: impl Into<String>, accepted: Vec<String>, profile: NormalizeProfile) -> Self {
    Self {
      label: label.into(),
      accepted,
      check: AnswerCheck::Text { profile, permute_terms: false },
      role: BlankRole::Answer,
      segment: None,
    }
  }

  pub fn numeric(label: impl Into<String>, expected: f64, display: String, tolerance: f64) -> Self {
    Self {
      label: label.into(),
      accepted: vec![display],
      check: AnswerCheck::Numeric { expected, tolerance },
      role: BlankRole::Answer,
      segment: None,
    }
  }

  pub fn integer(label: impl Into<String>, expected: i64) -> Self {
    Self {
      label: label.into(),
      accepted: vec![expected.to_string()],
      check: AnswerCheck::Integer { expected },
      role: BlankRole::Answer,
      segment: None,
    }
  }

  pub fn permuting(mut self) -> Self {
    if let AnswerCheck::Text { permute_terms, .. } = &mut self.check {
      *permute_terms = true;
    }
    self
  }

  pub fn with_segment(mut self, segment: Segment) -> Self {
    self.segment = Some(segment);
    self
  }
}

/// What the user typed for one blank: a full string, or one fill per segment slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BlankAnswer {
  Text(String),
  Slots(Vec<String>),
}

impl From<&str> for BlankAnswer {
  fn from(s: &str) -> Self { BlankAnswer::Text(s.to_string()) }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SolutionStep {
  pub label: String,
  pub math: String,
}

impl SolutionStep {
  pub fn new(label: impl Into<String>, math: impl Into<String>) -> Self {
    Self { label: label.into(), math: math.into() }
  }
}

/// Diagram data the frontend draws next to the prompt.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
  Angle(AngleFigure),
  Circle(CircleFigure),
  NumberLine(NumberLine),
  Dataset(DatasetFigure),
}

/// Immutable once generated; replaced wholesale on advance.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Question {
  pub id: String,
  pub widget: Widget,
  pub level: u8,
  pub prompt: String,
  /// LaTeX for the expression under question, when there is one.
  pub markup: Option<String>,
  pub blanks: Vec<Blank>,
  pub hint: Option<String>,
  pub solution: Vec<SolutionStep>,
  pub figure: Option<Figure>,
}

impl Question {
  pub fn new(widget: Widget, level: u8, prompt: impl Into<String>) -> Self {
    Self {
      id: uuid::Uuid::new_v4().to_string(),
      widget,
      level,
      prompt: prompt.into(),
      markup: None,
      blanks: Vec::new(),
      hint: None,
      solution: Vec::new(),
      figure: None,
    }
  }

  /// Identity used by the recent-prompt window; ids are always fresh so
  /// the prompt, markup and first answer stand in for "the same question".
  pub fn repeat_key(&self) -> String {
    let first = self.blanks.first().and_then(|b| b.accepted.first()).map(String::as_str).unwrap_or("");
    format!("{}|{}|{}", self.prompt, self.markup.as_deref().unwrap_or(""), first)
  }

  pub fn answer_blanks(&self) -> impl Iterator<Item = &Blank> {
    self.blanks.iter().filter(|b| b.role == BlankRole::Answer)
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BlankResult {
  pub label: String,
  pub role: BlankRole,
  pub correct: bool,
  pub expected: String,
}

/// Result of checking a submission; exactly one is active per session.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Feedback {
  pub correct: bool,
  pub message: String,
  pub points: u32,
  pub blanks: Vec<BlankResult>,
  /// Filled once the worked solution is revealed.
  pub solution: Option<Vec<SolutionStep>>,
}
