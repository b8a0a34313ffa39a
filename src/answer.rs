//! Answer normalization and equivalence checking.
//!
//! Free-text answers are canonicalized (whitespace, case, operator glyphs)
//! and compared against author-curated accepted strings. Expand-mode
//! polynomial answers additionally tolerate reordering of additive terms
//! and of the variable factors inside a term.
//!
//! This is string equivalence, not symbolic algebra: an equivalent answer
//! the accepted list does not anticipate is marked wrong.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{AnswerCheck, Blank, BlankAnswer, Segment};

/// Extra steps layered over the base normalization, one per answer style.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeProfile {
  #[default]
  Plain,
  /// Ratio colon becomes a fraction slash (`7:6` == `7/6`).
  Equation,
  /// Redundant parentheses around the whole answer are dropped.
  Polynomial,
  /// `^1` exponents and explicit `*` signs are dropped.
  Index,
  /// ASCII comparison pairs become their glyphs; connective words unify.
  Inequality,
  /// The angle sign and the word "angle" are dropped.
  AngleName,
}

/// Outcome of comparing one answer against an accepted set.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Verdict {
  pub correct: bool,
  /// First accepted answer, shown as "the" correct answer.
  pub expected: String,
}

/// Deterministic text canonicalization applied to user input and accepted answers alike.
pub fn normalize(input: &str, profile: NormalizeProfile) -> String {
  let base: String = input
    .chars()
    .filter(|c| !c.is_whitespace())
    .collect::<String>()
    .to_lowercase()
    .replace('×', "*")
    .replace('÷', "/");

  match profile {
    NormalizeProfile::Plain => base,
    NormalizeProfile::Equation => base.replace(':', "/"),
    NormalizeProfile::Polynomial => strip_outer_parens(&base).to_string(),
    NormalizeProfile::Index => drop_unit_exponent(&base.replace('*', "")),
    NormalizeProfile::Inequality => base
      .replace(">=", "≥")
      .replace("<=", "≤")
      .replace("and", "及")
      .replace('和', "及")
      .replace("or", "或"),
    NormalizeProfile::AngleName => base.replace('∠', "").replace("angle", ""),
  }
}

/// Removes parentheses that enclose the entire string, repeatedly.
/// `(a+b)(a-b)` is left alone because its first pair closes early.
pub fn strip_outer_parens(s: &str) -> &str {
  let mut cur = s;
  while cur.len() >= 2 && cur.starts_with('(') && cur.ends_with(')') {
    let mut depth = 0i32;
    let mut encloses = true;
    for (i, c) in cur.char_indices() {
      if i == cur.len() - 1 {
        break;
      }
      match c {
        '(' => depth += 1,
        ')' => depth -= 1,
        _ => {}
      }
      if depth == 0 {
        encloses = false;
        break;
      }
    }
    if !encloses {
      break;
    }
    cur = &cur[1..cur.len() - 1];
  }
  cur
}

/// `x^1` → `x`, while `x^12` is kept.
fn drop_unit_exponent(s: &str) -> String {
  let chars: Vec<char> = s.chars().collect();
  let mut out = String::with_capacity(s.len());
  let mut i = 0;
  while i < chars.len() {
    let unit = chars[i] == '^'
      && chars.get(i + 1) == Some(&'1')
      && !chars.get(i + 2).is_some_and(|c| c.is_ascii_digit());
    if unit {
      i += 2;
      continue;
    }
    out.push(chars[i]);
    i += 1;
  }
  out
}

fn term_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"[+-][0-9a-z^]+").expect("term pattern is valid"))
}

/// Canonical form of one signed term: sign, coefficient, then variable
/// factors (`x`, `y^2`, ...) in alphabetical order.
fn canonical_term(term: &str) -> String {
  let (sign, body) = match term.chars().next() {
    Some(c @ ('+' | '-')) => (c.to_string(), &term[1..]),
    _ => (String::new(), term),
  };
  let digits_end = body
    .char_indices()
    .find(|(_, c)| !c.is_ascii_digit())
    .map(|(i, _)| i)
    .unwrap_or(body.len());
  let (coeff, rest) = body.split_at(digits_end);

  let chars: Vec<char> = rest.chars().collect();
  let mut factors: Vec<String> = Vec::new();
  let mut i = 0;
  while i < chars.len() {
    let c = chars[i];
    if c.is_ascii_alphabetic() {
      let mut factor = c.to_string();
      if chars.get(i + 1) == Some(&'^') {
        let mut j = i + 2;
        while j < chars.len() && chars[j].is_ascii_digit() {
          j += 1;
        }
        factor.extend(&chars[i + 1..j]);
        i = j;
      } else {
        i += 1;
      }
      factors.push(factor);
    } else {
      // stray exponent marks or digits between letters carry no meaning here
      i += 1;
    }
  }
  factors.sort();
  format!("{}{}{}", sign, coeff, factors.concat())
}

/// Splits an already-normalized polynomial into sorted canonical terms.
/// Returns `None` when the terms do not cover the whole string.
pub fn polynomial_terms(normalized: &str) -> Option<Vec<String>> {
  if normalized.is_empty() {
    return None;
  }
  let signed = if normalized.starts_with('-') || normalized.starts_with('+') {
    normalized.to_string()
  } else {
    format!("+{}", normalized)
  };
  let raw: Vec<&str> = term_regex().find_iter(&signed).map(|m| m.as_str()).collect();
  let covered: usize = raw.iter().map(|t| t.len()).sum();
  if covered != signed.len() {
    return None;
  }
  let mut terms: Vec<String> = raw.into_iter().map(canonical_term).collect();
  terms.sort();
  Some(terms)
}

/// Normalize `input` and compare it with every accepted answer; with
/// `permute_terms`, fall back to a term-permutation match against the first one.
pub fn normalize_and_compare<S: AsRef<str>>(
  input: &str,
  accepted: &[S],
  profile: NormalizeProfile,
  permute_terms: bool,
) -> Verdict {
  let expected = accepted.first().map(|a| a.as_ref().to_string()).unwrap_or_default();
  let user = normalize(input, profile);
  if user.is_empty() {
    return Verdict { correct: false, expected };
  }

  let direct = accepted.iter().any(|a| normalize(a.as_ref(), profile) == user);
  let permuted = !direct
    && permute_terms
    && match polynomial_terms(&normalize(&expected, profile)) {
      Some(canonical) => polynomial_terms(&user).is_some_and(|terms| terms == canonical),
      None => false,
    };

  Verdict { correct: direct || permuted, expected }
}

const NONE_WORDS: [&str; 4] = ["無", "none", "nomode", "no"];

fn parse_number(s: &str) -> Option<f64> {
  s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether the rule can grade `answer` at all: numeric rules need a number,
/// every other rule takes any text.
pub fn is_gradable(blank: &Blank, answer: &str) -> bool {
  match &blank.check {
    AnswerCheck::Numeric { .. } | AnswerCheck::Integer { .. } => {
      parse_number(&normalize(answer, NormalizeProfile::Plain)).is_some()
    }
    _ => true,
  }
}

/// Checks one blank's answer according to its rule.
pub fn check_blank(blank: &Blank, answer: &str) -> Verdict {
  let expected = blank.accepted.first().cloned().unwrap_or_default();
  let correct = match &blank.check {
    AnswerCheck::Text { profile, permute_terms } => {
      return normalize_and_compare(answer, &blank.accepted, *profile, *permute_terms);
    }
    AnswerCheck::Numeric { expected, tolerance } => {
      parse_number(&normalize(answer, NormalizeProfile::Plain))
        .is_some_and(|v| (v - expected).abs() < *tolerance)
    }
    AnswerCheck::Integer { expected } => {
      normalize(answer, NormalizeProfile::Plain).parse::<i64>().ok() == Some(*expected)
    }
    AnswerCheck::NumberSet { expected } => number_set_matches(answer, expected),
    AnswerCheck::ContainsAll { keywords, profile } => {
      let user = normalize(answer, *profile);
      !user.is_empty() && keywords.iter().all(|k| user.contains(&normalize(k, *profile)))
    }
  };
  Verdict { correct, expected }
}

fn number_set_matches(answer: &str, expected: &[f64]) -> bool {
  let user = normalize(answer, NormalizeProfile::Plain);
  if expected.is_empty() {
    return user.is_empty() || NONE_WORDS.iter().any(|w| user.contains(w));
  }
  let mut values: Vec<f64> = user
    .split([',', '，', ';'])
    .filter_map(parse_number)
    .collect();
  values.sort_by(|a, b| a.total_cmp(b));
  let mut wanted = expected.to_vec();
  wanted.sort_by(|a, b| a.total_cmp(b));
  values.len() == wanted.len() && values.iter().zip(&wanted).all(|(a, b)| (a - b).abs() < 1e-9)
}

// -------- Segment composition --------

impl Segment {
  /// Keyword occurrences in reading order. At each position the first
  /// keyword in list order that matches wins, so repeated keywords yield
  /// one occurrence per appearance.
  pub fn occurrences(&self) -> Vec<&str> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < self.text.len() {
      let rest = &self.text[i..];
      if let Some(k) = self.keywords.iter().find(|k| !k.is_empty() && rest.starts_with(k.as_str())) {
        out.push(k.as_str());
        i += k.len();
      } else {
        i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
      }
    }
    out
  }

  /// Occurrence indices that receive an input slot.
  pub fn slot_indices(&self) -> Vec<usize> {
    (0..self.occurrences().len()).filter(|i| !self.skip.contains(i)).collect()
  }

  /// Joins slot fills into one equation string, honoring `preview_order`.
  /// Missing fills and skipped occurrences contribute nothing.
  pub fn compose(&self, fills: &[String]) -> String {
    let total = self.occurrences().len();
    let mut by_occurrence = vec![String::new(); total];
    for (fill, idx) in fills.iter().zip(self.slot_indices()) {
      by_occurrence[idx] = fill.clone();
    }
    match &self.preview_order {
      Some(order) => order
        .iter()
        .filter_map(|i| by_occurrence.get(*i))
        .map(String::as_str)
        .collect(),
      None => by_occurrence.concat(),
    }
  }
}

/// Flattens a submitted blank into the string that gets checked.
pub fn answer_text(blank: &Blank, answer: &BlankAnswer) -> String {
  match (answer, &blank.segment) {
    (BlankAnswer::Text(s), _) => s.clone(),
    (BlankAnswer::Slots(fills), Some(segment)) => segment.compose(fills),
    (BlankAnswer::Slots(fills), None) => fills.concat(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::BlankRole;

  fn text_blank(accepted: &[&str], profile: NormalizeProfile, permute: bool) -> Blank {
    Blank {
      label: "answer".into(),
      accepted: accepted.iter().map(|s| s.to_string()).collect(),
      check: AnswerCheck::Text { profile, permute_terms: permute },
      role: BlankRole::Answer,
      segment: None,
    }
  }

  #[test]
  fn every_accepted_answer_matches_itself() {
    let accepted = ["x+y=20", "y+x=20", "2x+3y=46", "x/y=7/6", "6x=7y"];
    for a in accepted {
      assert!(normalize_and_compare(a, &accepted, NormalizeProfile::Equation, false).correct, "{a}");
    }
  }

  #[test]
  fn whitespace_case_and_glyphs_are_insignificant() {
    assert!(normalize_and_compare("X + Y = 20", &["x+y=20"], NormalizeProfile::Equation, false).correct);
    assert!(normalize_and_compare("y = 3 × x", &["y=3*x"], NormalizeProfile::Equation, false).correct);
    assert!(normalize_and_compare("x ÷ y = 7 : 6", &["x/y=7/6"], NormalizeProfile::Equation, false).correct);
  }

  #[test]
  fn simultaneous_scenario_surfaces_first_accepted() {
    let accepted = ["x+y=20", "y+x=20"];
    assert!(normalize_and_compare("y+x=20", &accepted, NormalizeProfile::Equation, false).correct);
    let v = normalize_and_compare("x + y=21", &accepted, NormalizeProfile::Equation, false);
    assert!(!v.correct);
    assert_eq!(v.expected, "x+y=20");
  }

  #[test]
  fn expand_mode_tolerates_term_permutation_but_not_sign() {
    let accepted = ["x^2+2xy+y^2"];
    assert!(normalize_and_compare("y^2+2xy+x^2", &accepted, NormalizeProfile::Polynomial, true).correct);
    assert!(normalize_and_compare("y^2 + 2yx + x^2", &accepted, NormalizeProfile::Polynomial, true).correct);
    assert!(!normalize_and_compare("x^2-2xy+y^2", &accepted, NormalizeProfile::Polynomial, true).correct);
  }

  #[test]
  fn factor_mode_does_not_permute() {
    let accepted = ["x^2+2xy+y^2"];
    assert!(!normalize_and_compare("y^2+2xy+x^2", &accepted, NormalizeProfile::Polynomial, false).correct);
  }

  #[test]
  fn stray_characters_never_permutation_match() {
    assert_eq!(polynomial_terms("x^2+y^2="), None);
    assert_eq!(
      polynomial_terms("9-4a^2"),
      Some(vec!["+9".to_string(), "-4a^2".to_string()])
    );
  }

  #[test]
  fn outer_parentheses_are_only_stripped_when_enclosing() {
    assert_eq!(strip_outer_parens("((x+y))"), "x+y");
    assert_eq!(strip_outer_parens("(x+y)(x-y)"), "(x+y)(x-y)");
    assert_eq!(normalize("(4x^2 - 9)", NormalizeProfile::Polynomial), "4x^2-9");
  }

  #[test]
  fn index_profile_drops_unit_exponents_and_times() {
    assert_eq!(normalize("x^1 * y^12", NormalizeProfile::Index), "xy^12");
    assert_eq!(normalize("1/x^1", NormalizeProfile::Index), "1/x");
  }

  #[test]
  fn inequality_profile_unifies_glyphs() {
    assert_eq!(normalize("x >= 3 or x < -1", NormalizeProfile::Inequality), "x≥3或x<-1");
    assert_eq!(normalize("x<=2", NormalizeProfile::Inequality), normalize("x ≤ 2", NormalizeProfile::Inequality));
    assert_eq!(normalize("x>1 和 x<5", NormalizeProfile::Inequality), "x>1及x<5");
  }

  #[test]
  fn empty_input_is_never_correct() {
    assert!(!normalize_and_compare("   ", &["x"], NormalizeProfile::Plain, true).correct);
  }

  #[test]
  fn numeric_and_set_checks() {
    let mut b = text_blank(&["12.5"], NormalizeProfile::Plain, false);
    b.check = AnswerCheck::Numeric { expected: 12.5, tolerance: 0.05 };
    assert!(check_blank(&b, "12.53").correct);
    assert!(!check_blank(&b, "12.6").correct);
    assert!(!check_blank(&b, "abc").correct);
    assert!(is_gradable(&b, " 12.5 "));
    assert!(!is_gradable(&b, "abc"));

    b.check = AnswerCheck::NumberSet { expected: vec![58.0, 67.0] };
    assert!(check_blank(&b, "67, 58").correct);
    assert!(!check_blank(&b, "58").correct);

    b.check = AnswerCheck::NumberSet { expected: vec![] };
    assert!(check_blank(&b, "無").correct);
    assert!(is_gradable(&b, "無"));
    assert!(!check_blank(&b, "4").correct);
  }

  #[test]
  fn contains_all_gives_working_credit() {
    let mut b = text_blank(&["x^6y^-3"], NormalizeProfile::Index, false);
    b.check = AnswerCheck::ContainsAll {
      keywords: vec!["x^6".into(), "y^-3".into()],
      profile: NormalizeProfile::Index,
    };
    assert!(check_blank(&b, "x^6 y^-3 / x^2").correct);
    assert!(!check_blank(&b, "x^6").correct);
  }

  #[test]
  fn segment_slots_follow_occurrences_and_preview_order() {
    let seg = Segment {
      text: "一瓶橙汁的成本與2瓶牛奶的成本相同。".into(),
      keywords: vec!["橙汁的成本".into(), "與".into(), "2瓶牛奶的成本".into(), "相同".into()],
      skip: vec![1],
      preview_order: Some(vec![0, 3, 2]),
    };
    assert_eq!(seg.occurrences().len(), 4);
    assert_eq!(seg.slot_indices(), vec![0, 2, 3]);
    let fills = vec!["x".to_string(), "2y".to_string(), "=".to_string()];
    assert_eq!(seg.compose(&fills), "x=2y");
  }

  #[test]
  fn repeated_keywords_get_one_occurrence_each() {
    let seg = Segment {
      text: "橙子及蘋果，花費了$46購買橙子和蘋果。".into(),
      keywords: vec!["花費了$46".into(), "橙子".into(), "和".into(), "蘋果".into()],
      skip: vec![0, 1],
      preview_order: Some(vec![3, 4, 5, 2]),
    };
    assert_eq!(seg.occurrences(), vec!["橙子", "蘋果", "花費了$46", "橙子", "和", "蘋果"]);
    assert_eq!(seg.slot_indices(), vec![2, 3, 4, 5]);
    let fills: Vec<String> = ["=46", "2x", "+", "3y"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seg.compose(&fills), "2x+3y=46");
  }
}
