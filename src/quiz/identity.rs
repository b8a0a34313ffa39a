//! Algebraic identities: expand or factorize `(A+B)^2`, `(A-B)^2`, `(A+B)(A-B)`.

use rand::Rng;

use crate::answer::NormalizeProfile;
use crate::domain::{Blank, Question, SolutionStep, Widget};
use crate::render::expression_to_latex;

const VARS: [char; 6] = ['x', 'y', 'a', 'b', 'n', 'm'];

/// One monomial `coeff·var`, or a bare number when `var` is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
  pub coeff: i64,
  pub var: Option<char>,
}

impl Term {
  fn random<R: Rng>(rng: &mut R) -> Self {
    if rng.gen_bool(0.6) {
      Term { coeff: rng.gen_range(1..=8), var: Some(VARS[rng.gen_range(0..VARS.len())]) }
    } else {
      Term { coeff: rng.gen_range(1..=9), var: None }
    }
  }

  pub fn render(&self) -> String {
    match (self.coeff, self.var) {
      (1, Some(v)) => v.to_string(),
      (c, Some(v)) => format!("{}{}", c, v),
      (c, None) => c.to_string(),
    }
  }

  fn square(&self) -> String {
    let c = self.coeff * self.coeff;
    match self.var {
      Some(v) if c == 1 => format!("{}^2", v),
      Some(v) => format!("{}{}^2", c, v),
      None => c.to_string(),
    }
  }
}

/// `2AB` with the variable letters in alphabetical order.
fn twice_product(a: Term, b: Term) -> String {
  let mut vars: Vec<char> = [a.var, b.var].into_iter().flatten().collect();
  vars.sort_unstable();
  format!("{}{}", 2 * a.coeff * b.coeff, vars.into_iter().collect::<String>())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityKind {
  PlusSquare,
  MinusSquare,
  DifferenceOfSquares,
}

const KINDS: [IdentityKind; 3] = [IdentityKind::PlusSquare, IdentityKind::MinusSquare, IdentityKind::DifferenceOfSquares];

impl IdentityKind {
  fn hint(&self) -> &'static str {
    match self {
      IdentityKind::PlusSquare => "(a + b)^2 = a^2 + 2ab + b^2",
      IdentityKind::MinusSquare => "(a - b)^2 = a^2 - 2ab + b^2",
      IdentityKind::DifferenceOfSquares => "(a + b)(a - b) = a^2 - b^2",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
  Expand,
  Factor,
}

/// A generated identity instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
  pub kind: IdentityKind,
  pub a: Term,
  pub b: Term,
}

impl Identity {
  /// Re-rolls until the pair is not two numbers and not the same letter twice.
  pub fn random<R: Rng>(rng: &mut R) -> Self {
    let kind = KINDS[rng.gen_range(0..KINDS.len())];
    loop {
      let (a, b) = (Term::random(rng), Term::random(rng));
      let both_numeric = a.var.is_none() && b.var.is_none();
      let same_var = a.var.is_some() && a.var == b.var;
      if !both_numeric && !same_var {
        return Identity { kind, a, b };
      }
    }
  }

  pub fn factored(&self) -> String {
    let (a, b) = (self.a.render(), self.b.render());
    match self.kind {
      IdentityKind::PlusSquare => format!("({}+{})^2", a, b),
      IdentityKind::MinusSquare => format!("({}-{})^2", a, b),
      IdentityKind::DifferenceOfSquares => format!("({}+{})({}-{})", a, b, a, b),
    }
  }

  pub fn expanded(&self) -> String {
    let (a2, b2, ab) = (self.a.square(), self.b.square(), twice_product(self.a, self.b));
    match self.kind {
      IdentityKind::PlusSquare => format!("{}+{}+{}", a2, ab, b2),
      IdentityKind::MinusSquare => format!("{}-{}+{}", a2, ab, b2),
      IdentityKind::DifferenceOfSquares => format!("{}-{}", a2, b2),
    }
  }

  /// Every sign/order spelling of the factorized form.
  pub fn factor_variants(&self) -> Vec<String> {
    let (a, b) = (self.a.render(), self.b.render());
    match self.kind {
      IdentityKind::PlusSquare => vec![
        format!("({a}+{b})^2"),
        format!("({b}+{a})^2"),
        format!("({a}+{b})({a}+{b})"),
        format!("({b}+{a})({b}+{a})"),
      ],
      IdentityKind::MinusSquare => vec![format!("({a}-{b})^2"), format!("({a}-{b})({a}-{b})")],
      IdentityKind::DifferenceOfSquares => {
        let plus = [format!("{a}+{b}"), format!("{b}+{a}")];
        let minus = [format!("{a}-{b}"), format!("-{b}+{a}")];
        let mut out = Vec::with_capacity(8);
        for p in &plus {
          for m in &minus {
            out.push(format!("({p})({m})"));
            out.push(format!("({m})({p})"));
          }
        }
        out
      }
    }
  }

  fn applied(&self) -> String {
    let (a, b) = (self.a.render(), self.b.render());
    match self.kind {
      IdentityKind::PlusSquare => format!("({a})^2 + 2({a})({b}) + ({b})^2"),
      IdentityKind::MinusSquare => format!("({a})^2 - 2({a})({b}) + ({b})^2"),
      IdentityKind::DifferenceOfSquares => format!("({a})^2 - ({b})^2"),
    }
  }
}

fn mode_for<R: Rng>(rng: &mut R, level: u8) -> Mode {
  match level {
    1 => Mode::Expand,
    2 => Mode::Factor,
    _ => {
      if rng.gen_bool(0.5) { Mode::Expand } else { Mode::Factor }
    }
  }
}

pub fn generate<R: Rng>(rng: &mut R, level: u8) -> Question {
  let mode = mode_for(rng, level);
  let id = Identity::random(rng);
  let (factored, expanded) = (id.factored(), id.expanded());

  let (prompt, shown, blank) = match mode {
    Mode::Expand => (
      "展開下列式子：",
      factored.clone(),
      Blank::text("展開式", vec![expanded.clone(), format!("({})", expanded)], NormalizeProfile::Polynomial).permuting(),
    ),
    Mode::Factor => (
      "因式分解下列式子：",
      expanded.clone(),
      Blank::text("因式分解", id.factor_variants(), NormalizeProfile::Polynomial),
    ),
  };
  let answer = blank.accepted[0].clone();

  let mut q = Question::new(Widget::IdentityQuiz, level, format!("{}{}", prompt, shown));
  q.markup = Some(expression_to_latex(&shown));
  q.blanks.push(blank);
  q.hint = Some(id.kind.hint().to_string());
  q.solution = vec![
    SolutionStep::new("題目", expression_to_latex(&shown)),
    SolutionStep::new("套用恆等式", expression_to_latex(&id.applied())),
    SolutionStep::new("答案", expression_to_latex(&answer)),
  ];
  q
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::check_blank;
  use rand::{rngs::StdRng, SeedableRng};

  fn term(coeff: i64, var: Option<char>) -> Term {
    Term { coeff, var }
  }

  #[test]
  fn expands_with_sorted_cross_term() {
    let id = Identity { kind: IdentityKind::PlusSquare, a: term(3, Some('y')), b: term(2, Some('x')) };
    assert_eq!(id.factored(), "(3y+2x)^2");
    assert_eq!(id.expanded(), "9y^2+12xy+4x^2");
    let id = Identity { kind: IdentityKind::MinusSquare, a: term(1, Some('a')), b: term(5, None) };
    assert_eq!(id.expanded(), "a^2-10a+25");
  }

  #[test]
  fn difference_of_squares_has_eight_spellings() {
    let id = Identity { kind: IdentityKind::DifferenceOfSquares, a: term(2, Some('x')), b: term(3, None) };
    let variants = id.factor_variants();
    assert_eq!(variants.len(), 8);
    assert!(variants.contains(&"(2x-3)(2x+3)".to_string()));
    assert!(variants.contains(&"(-3+2x)(3+2x)".to_string()));
    assert_eq!(id.expanded(), "4x^2-9");
  }

  #[test]
  fn never_degenerate() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
      let id = Identity::random(&mut rng);
      assert!(id.a.var.is_some() || id.b.var.is_some());
      assert!(id.a.var.is_none() || id.a.var != id.b.var);
    }
  }

  #[test]
  fn expand_questions_accept_reordered_terms() {
    let mut rng = StdRng::seed_from_u64(3);
    let q = generate(&mut rng, 1);
    let blank = &q.blanks[0];
    let answer = &blank.accepted[0];
    let reversed: Vec<&str> = answer.split('+').collect();
    assert!(check_blank(blank, answer).correct);
    if reversed.len() == 3 && !answer.contains('-') {
      let swapped = format!("{}+{}+{}", reversed[2], reversed[1], reversed[0]);
      assert!(check_blank(blank, &swapped).correct, "{swapped}");
    }
  }

  #[test]
  fn factor_questions_keep_the_expanded_form_in_the_prompt() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
      let q = generate(&mut rng, 2);
      assert!(q.prompt.starts_with("因式分解"));
      let blank = &q.blanks[0];
      for v in &blank.accepted {
        assert!(check_blank(blank, v).correct);
      }
    }
  }
}
