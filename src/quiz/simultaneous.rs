//! Word problems modelled by a pair of simultaneous equations.
//!
//! Questions come from a curated bank. Level 1 turns each equation's key
//! phrases into fill-in slots; level 2 asks for the whole equation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::answer::NormalizeProfile;
use crate::domain::{Blank, Question, Segment, SolutionStep, Widget};

/// One equation of a bank question: the sentence it is read from and the
/// accepted ways to write it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BankEquation {
  pub segment: Segment,
  pub accepted: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BankQuestion {
  pub title: String,
  pub text: String,
  /// Definition of the unknowns, e.g. "設 x 為…，y 為…。"
  pub vars: String,
  pub equations: Vec<BankEquation>,
}

impl BankQuestion {
  /// First reason this item cannot be served at every level, if any.
  pub fn defect(&self) -> Option<String> {
    if self.equations.is_empty() {
      return Some("no equations".into());
    }
    for (n, eq) in self.equations.iter().enumerate().map(|(i, eq)| (i + 1, eq)) {
      if eq.accepted.is_empty() {
        return Some(format!("equation {n} has no accepted answer"));
      }
      let total = eq.segment.occurrences().len();
      if total == 0 {
        return Some(format!("equation {n}: no keyword occurs in the segment text"));
      }
      if eq.segment.skip.iter().any(|i| *i >= total) {
        return Some(format!("equation {n}: skip index beyond {total} keyword occurrences"));
      }
      if eq.segment.preview_order.as_ref().is_some_and(|o| o.iter().any(|i| *i >= total)) {
        return Some(format!("equation {n}: preview_order index beyond {total} keyword occurrences"));
      }
      if eq.segment.slot_indices().is_empty() {
        return Some(format!("equation {n}: every keyword occurrence is skipped"));
      }
    }
    None
  }
}

const CHEATSHEET: &str = "「和」「共」表示相加，「…倍」表示相乘，「之比為 a:b」可寫成 x/y=a/b，「相同」「相等」「為」表示等號。";

/// Shuffled order over the bank; reshuffled when it runs out, never
/// starting the new round with the question that ended the last one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deck {
  pending: Vec<usize>,
  last: Option<usize>,
}

impl Deck {
  pub fn draw<R: Rng>(&mut self, rng: &mut R, size: usize) -> Option<usize> {
    if size == 0 {
      return None;
    }
    if self.pending.is_empty() || self.pending.iter().any(|i| *i >= size) {
      let mut order: Vec<usize> = (0..size).collect();
      order.shuffle(rng);
      if size > 1 && order.last() == self.last.as_ref() {
        order.swap(0, size - 1);
      }
      self.pending = order;
    }
    let next = self.pending.pop();
    self.last = next;
    next
  }

  pub fn remaining(&self) -> usize {
    self.pending.len()
  }
}

pub fn build(item: &BankQuestion, level: u8) -> Question {
  let mut q = Question::new(Widget::SimultaneousEq, level, format!("{}\n{}", item.title, item.text));
  for (i, eq) in item.equations.iter().enumerate() {
    let label = format!("方程 ({})", i + 1);
    let blank = Blank::text(label, eq.accepted.clone(), NormalizeProfile::Equation);
    q.blanks.push(if level == 1 { blank.with_segment(eq.segment.clone()) } else { blank });
  }
  q.hint = Some(format!("{} {}", item.vars, CHEATSHEET));
  q.solution = std::iter::once(SolutionStep::new("設未知數", item.vars.clone()))
    .chain(item.equations.iter().enumerate().map(|(i, eq)| {
      SolutionStep::new(format!("由「{}」", eq.segment.text), eq.accepted.first().cloned().unwrap_or_else(|| format!("({})", i + 1)))
    }))
    .collect();
  q
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::{answer_text, check_blank};
  use crate::domain::BlankAnswer;
  use crate::seeds::simultaneous_bank;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn deck_visits_every_question_before_repeating() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut deck = Deck::default();
    let mut seen: Vec<usize> = (0..14).filter_map(|_| deck.draw(&mut rng, 14)).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..14).collect::<Vec<_>>());
    assert_eq!(deck.remaining(), 0);
  }

  #[test]
  fn reshuffle_never_repeats_back_to_back() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut deck = Deck::default();
    let mut prev = None;
    for _ in 0..100 {
      let next = deck.draw(&mut rng, 3);
      assert_ne!(next, prev);
      prev = next;
    }
    assert_eq!(Deck::default().draw(&mut rng, 0), None);
  }

  #[test]
  fn bank_segments_are_well_formed() {
    for item in simultaneous_bank() {
      assert_eq!(item.equations.len(), 2, "{}", item.title);
      assert_eq!(item.defect(), None, "{}", item.title);
    }
  }

  #[test]
  fn defects_name_the_broken_equation() {
    let mut item = simultaneous_bank().remove(0);
    item.equations[1].segment.keywords = vec!["NOT-PRESENT".into()];
    assert_eq!(item.defect().as_deref(), Some("equation 2: no keyword occurs in the segment text"));

    let mut item = simultaneous_bank().remove(0);
    item.equations[0].segment.skip = vec![9];
    assert!(item.defect().is_some_and(|d| d.starts_with("equation 1: skip index")));

    let mut item = simultaneous_bank().remove(0);
    item.equations[0].segment.preview_order = Some(vec![0, 9]);
    assert!(item.defect().is_some_and(|d| d.contains("preview_order")));

    let mut item = simultaneous_bank().remove(0);
    item.equations[0].segment.skip = (0..item.equations[0].segment.occurrences().len()).collect();
    assert!(item.defect().is_some_and(|d| d.ends_with("is skipped")));
  }

  #[test]
  fn level_one_composes_slots_into_an_equation() {
    let bank = simultaneous_bank();
    let oranges = bank.iter().find(|q| q.title == "橙與蘋果").unwrap();
    let q = build(oranges, 1);
    let second = &q.blanks[1];
    let fills: Vec<String> = ["=46", "", "2x", "+", "3y"].iter().map(|s| s.to_string()).collect();
    let composed = answer_text(second, &BlankAnswer::Slots(fills));
    assert_eq!(composed, "2x+3y=46");
    assert!(check_blank(second, &composed).correct);
  }

  #[test]
  fn level_two_takes_whole_equations() {
    let bank = simultaneous_bank();
    let q = build(&bank[0], 2);
    assert!(q.blanks.iter().all(|b| b.segment.is_none()));
    assert!(check_blank(&q.blanks[0], "y + x = 600").correct);
    assert!(check_blank(&q.blanks[1], "y=3×x").correct);
  }
}
