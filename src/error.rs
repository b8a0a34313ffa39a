//! Error types shared by the quiz engine and the transport layer.

use thiserror::Error;

use crate::domain::Widget;

/// Everything a session or a request against the engine can trip over.
/// None of these are fatal: they are reported back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
  #[error("unknown session: {0}")]
  UnknownSession(String),

  #[error("unknown widget: {0}")]
  UnknownWidget(String),

  #[error("please enter an answer")]
  EmptyAnswer,

  #[error("please enter a number for {0}")]
  InvalidNumber(String),

  #[error("expected {expected} answers, got {got}")]
  AnswerCount { expected: usize, got: usize },

  #[error("the current question has already been answered")]
  AlreadySubmitted,

  #[error("no worked solution to reveal before an incorrect answer")]
  NothingToReveal,

  #[error("level {level} is not available for {widget}")]
  UnsupportedLevel { widget: Widget, level: u8 },

  #[error("no questions in the bank for {0}")]
  EmptyBank(Widget),

  #[error("unknown circle theorem mode: {0}")]
  UnknownMode(String),
}
