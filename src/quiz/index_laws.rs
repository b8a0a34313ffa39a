//! Laws of indices. Answers are written with positive indices only.

use rand::Rng;

use crate::answer::NormalizeProfile;
use crate::domain::{AnswerCheck, Blank, BlankRole, Question, SolutionStep, Widget};

const LETTERS: [char; 4] = ['x', 'y', 'a', 'm'];

fn nonzero<R: Rng>(rng: &mut R, lo: i64, hi: i64) -> i64 {
  loop {
    let n = rng.gen_range(lo..=hi);
    if n != 0 {
      return n;
    }
  }
}

/// `x^e` with the exponent omitted when it is 1.
fn power(var: char, e: i64) -> String {
  if e == 1 { var.to_string() } else { format!("{}^{}", var, e) }
}

/// `x^3`, `1`, or `1/x^3` for a negative index.
pub fn positive_index(var: char, e: i64) -> String {
  match e {
    0 => "1".to_string(),
    e if e > 0 => power(var, e),
    e => format!("1/{}", power(var, -e)),
  }
}

/// LaTeX for `x^{e}`.
fn tex_power(var: char, e: i64) -> String {
  format!("{}^{{{}}}", var, e)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Law {
  Multiply,
  Divide,
  Power,
  Negative,
}

const LAWS: [Law; 4] = [Law::Multiply, Law::Divide, Law::Power, Law::Negative];

impl Law {
  fn rule(&self) -> &'static str {
    match self {
      Law::Multiply => "x^m × x^n = x^(m+n)",
      Law::Divide => "x^m ÷ x^n = x^(m−n)",
      Law::Power => "(x^m)^n = x^(mn)",
      Law::Negative => "x^(−n) = 1/x^n",
    }
  }
}

fn single_law<R: Rng>(rng: &mut R) -> Question {
  let law = LAWS[rng.gen_range(0..LAWS.len())];
  let v = LETTERS[rng.gen_range(0..LETTERS.len())];
  let n1 = nonzero(rng, -5, 9);
  let n2 = nonzero(rng, -5, 9);

  let (shown, latex, result) = match law {
    Law::Multiply => (
      format!("{}^{} × {}^{}", v, n1, v, n2),
      format!("{} \\times {}", tex_power(v, n1), tex_power(v, n2)),
      n1 + n2,
    ),
    Law::Divide => (
      format!("{}^{} ÷ {}^{}", v, n1, v, n2),
      format!("{} \\div {}", tex_power(v, n1), tex_power(v, n2)),
      n1 - n2,
    ),
    Law::Power => (
      format!("({}^{})^{}", v, n1, n2),
      format!("\\left({}\\right)^{{{}}}", tex_power(v, n1), n2),
      n1 * n2,
    ),
    Law::Negative => {
      let e = -n1.abs();
      (format!("{}^{}", v, e), tex_power(v, e), e)
    }
  };
  let answer = positive_index(v, result);

  let mut q = Question::new(Widget::IndexLaws, 1, format!("化簡 {}，並以正指數表示答案。", shown));
  q.markup = Some(latex.clone());
  q.blanks.push(Blank::text("答案", vec![answer.clone()], NormalizeProfile::Index));
  q.hint = Some(law.rule().to_string());
  q.solution = vec![
    SolutionStep::new("題目", latex),
    SolutionStep::new("運用指數定律", tex_power(v, result)),
    SolutionStep::new("答案", answer),
  ];
  q
}

/// `(x^a y^b)^k / (x^c y^d)` with a working step for expanding the bracket.
fn combined<R: Rng>(rng: &mut R) -> Question {
  let (a, b, c, d) = (nonzero(rng, -4, 4), nonzero(rng, -4, 4), nonzero(rng, -4, 4), nonzero(rng, -4, 4));
  let k = rng.gen_range(2..=3) * if rng.gen_bool(0.5) { 1 } else { -1 };
  let (ex, ey) = (a * k - c, b * k - d);

  let latex = format!(
    "\\frac{{\\left(x^{{{}}} y^{{{}}}\\right)^{{{}}}}}{{x^{{{}}} y^{{{}}}}}",
    a, b, k, c, d
  );
  let step_keywords = vec![format!("x^{}", a * k), format!("y^{}", b * k)];
  let step = Blank {
    label: "第一步：展開括號".into(),
    accepted: vec![format!("x^{}y^{}", a * k, b * k)],
    check: AnswerCheck::ContainsAll { keywords: step_keywords, profile: NormalizeProfile::Index },
    role: BlankRole::Working,
    segment: None,
  };
  let accepted = fraction_spellings(ex, ey);

  let mut q = Question::new(
    Widget::IndexLaws,
    2,
    format!("化簡 (x^{} y^{})^{} ÷ (x^{} y^{})，並以正指數表示答案。", a, b, k, c, d),
  );
  q.markup = Some(latex.clone());
  q.blanks.push(step);
  q.blanks.push(Blank::text("答案", accepted.clone(), NormalizeProfile::Index));
  q.hint = Some("先用 (x^m)^n = x^(mn) 展開括號，再用 x^m ÷ x^n = x^(m−n)，最後把負指數移到分母。".into());
  q.solution = vec![
    SolutionStep::new("題目", latex),
    SolutionStep::new(
      "展開括號",
      format!("\\frac{{{} {}}}{{{} {}}}", tex_power('x', a * k), tex_power('y', b * k), tex_power('x', c), tex_power('y', d)),
    ),
    SolutionStep::new("合併同底", format!("{} {}", tex_power('x', ex), tex_power('y', ey))),
    SolutionStep::new("答案", accepted[0].clone()),
  ];
  q
}

/// Positive-index spellings of `x^ex y^ey`: factors with positive exponents
/// on top, negative ones below, both factor orders accepted.
pub fn fraction_spellings(ex: i64, ey: i64) -> Vec<String> {
  let mut top = Vec::new();
  let mut bottom = Vec::new();
  for (v, e) in [('x', ex), ('y', ey)] {
    if e > 0 {
      top.push(power(v, e));
    } else if e < 0 {
      bottom.push(power(v, -e));
    }
  }
  let orders = |parts: &[String]| -> Vec<String> {
    match parts {
      [] => vec!["1".to_string()],
      [one] => vec![one.clone()],
      [p, q] => vec![format!("{p}{q}"), format!("{q}{p}")],
      _ => vec![parts.concat()],
    }
  };
  let mut out = Vec::new();
  for num in orders(&top[..]) {
    if bottom.is_empty() {
      out.push(num);
      continue;
    }
    for den in orders(&bottom[..]) {
      out.push(format!("{}/{}", num, den));
      if bottom.len() > 1 {
        out.push(format!("{}/({})", num, den));
      }
    }
  }
  out
}

pub fn generate<R: Rng>(rng: &mut R, level: u8) -> Question {
  if level >= 2 { combined(rng) } else { single_law(rng) }
}
