//! Procedural question generation, one submodule per widget.
//!
//! Generators are pure functions of the RNG (and, for the word-problem
//! widget, the bank). The only memory is per session: a small window of
//! recently shown questions and the bank deck.

use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use crate::config::QuizSettings;
use crate::domain::{Question, Widget};
use crate::error::QuizError;

pub mod angle;
pub mod circle;
pub mod compound;
pub mod dispersion;
pub mod identity;
pub mod index_laws;
pub mod inequality;
pub mod simultaneous;

use simultaneous::{BankQuestion, Deck};

/// Redraws allowed when a generated question is still in the recent window.
const REPEAT_REDRAWS: usize = 8;

pub struct QuizContext<'a> {
  pub settings: &'a QuizSettings,
  pub bank: &'a [BankQuestion],
}

/// Per-session generator memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
  recent: VecDeque<String>,
  deck: Deck,
}

impl History {
  pub fn seen(&self, key: &str) -> bool {
    self.recent.iter().any(|k| k == key)
  }

  pub fn remember(&mut self, key: String, window: usize) {
    if window == 0 {
      return;
    }
    self.recent.push_back(key);
    while self.recent.len() > window {
      self.recent.pop_front();
    }
  }

  pub fn recent_len(&self) -> usize {
    self.recent.len()
  }
}

fn draw<R: Rng>(
  widget: Widget,
  level: u8,
  rng: &mut R,
  ctx: &QuizContext<'_>,
  deck: &mut Deck,
) -> Result<Question, QuizError> {
  let q = match widget {
    Widget::AngleQuiz => angle::generate(rng),
    Widget::CircleTheorems => circle::generate(rng),
    Widget::IdentityQuiz => identity::generate(rng, level),
    Widget::SimultaneousEq => {
      let idx = deck.draw(rng, ctx.bank.len()).ok_or(QuizError::EmptyBank(widget))?;
      debug!(target: "quiz", idx, remaining = deck.remaining(), "Drew word problem from deck");
      simultaneous::build(&ctx.bank[idx], level)
    }
    Widget::Inequality => inequality::generate(rng, level),
    Widget::CompoundInequality => compound::generate(rng),
    Widget::Dispersion => {
      dispersion::generate(rng, ctx.settings.dispersion_tolerance, ctx.settings.mode_attempts)
    }
    Widget::IndexLaws => index_laws::generate(rng, level),
  };
  Ok(q)
}

/// Next question for `widget` at `level`, avoiding the recent window.
/// Bank questions come off the deck, which already never repeats within a round.
pub fn generate<R: Rng>(
  widget: Widget,
  level: u8,
  rng: &mut R,
  ctx: &QuizContext<'_>,
  history: &mut History,
) -> Result<Question, QuizError> {
  if level == 0 || level > widget.levels() {
    return Err(QuizError::UnsupportedLevel { widget, level });
  }

  let mut question = draw(widget, level, rng, ctx, &mut history.deck)?;
  if widget != Widget::SimultaneousEq {
    let mut redraws = 0;
    while history.seen(&question.repeat_key()) && redraws < REPEAT_REDRAWS {
      question = draw(widget, level, rng, ctx, &mut history.deck)?;
      redraws += 1;
    }
    if redraws > 0 {
      debug!(target: "quiz", %widget, redraws, "Redrew recently seen question");
    }
  }

  history.remember(question.repeat_key(), ctx.settings.recent_window);
  debug!(target: "quiz", %widget, level, id = %question.id, recent = history.recent_len(), "Question generated");
  Ok(question)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds::simultaneous_bank;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn every_widget_generates_at_every_level() {
    let settings = QuizSettings::default();
    let bank = simultaneous_bank();
    let ctx = QuizContext { settings: &settings, bank: &bank };
    let mut rng = StdRng::seed_from_u64(1);
    for widget in Widget::ALL {
      let mut history = History::default();
      for level in 1..=widget.levels() {
        let q = generate(widget, level, &mut rng, &ctx, &mut history).unwrap();
        assert_eq!(q.widget, widget);
        assert_eq!(q.level, level);
        assert!(q.answer_blanks().count() >= 1, "{widget}");
        assert!(!q.solution.is_empty(), "{widget}");
      }
    }
  }

  #[test]
  fn out_of_range_levels_are_rejected() {
    let settings = QuizSettings::default();
    let ctx = QuizContext { settings: &settings, bank: &[] };
    let mut rng = StdRng::seed_from_u64(1);
    let mut history = History::default();
    let err = generate(Widget::AngleQuiz, 2, &mut rng, &ctx, &mut history).unwrap_err();
    assert_eq!(err, QuizError::UnsupportedLevel { widget: Widget::AngleQuiz, level: 2 });
    assert!(generate(Widget::SimultaneousEq, 1, &mut rng, &ctx, &mut history).is_err());
  }

  #[test]
  fn recent_window_is_bounded() {
    let mut history = History::default();
    for i in 0..10 {
      history.remember(format!("q{i}"), 5);
    }
    assert_eq!(history.recent_len(), 5);
    assert!(history.seen("q9"));
    assert!(!history.seen("q4"));
  }

  #[test]
  fn consecutive_questions_avoid_recent_repeats() {
    let settings = QuizSettings::default();
    let ctx = QuizContext { settings: &settings, bank: &[] };
    let mut rng = StdRng::seed_from_u64(77);
    let mut history = History::default();
    let mut last = String::new();
    for _ in 0..30 {
      let q = generate(Widget::IndexLaws, 1, &mut rng, &ctx, &mut history).unwrap();
      assert_ne!(q.repeat_key(), last);
      last = q.repeat_key();
    }
  }
}
