//! Compound inequalities: two simple inequalities joined by 及 (and) or 或 (or).

use rand::Rng;
use serde::Serialize;

use crate::answer::NormalizeProfile;
use crate::domain::{Blank, Figure, Question, SolutionStep, Widget};

/// Drawing data for a number line. `None` bounds on an interval mean the
/// ray runs off that end.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NumberLine {
  pub min: i64,
  pub max: i64,
  pub markers: Vec<Marker>,
  pub shaded: Vec<Interval>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Marker {
  pub value: i64,
  /// Solid dot when the endpoint is included, hollow otherwise.
  pub closed: bool,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Interval {
  pub from: Option<i64>,
  pub to: Option<i64>,
}

impl NumberLine {
  /// A line spanning 14 units around `center`.
  pub fn centered(center: i64) -> Self {
    Self { min: center - 7, max: center + 7, markers: Vec::new(), shaded: Vec::new() }
  }

  pub fn with_ray(mut self, ray: Ray) -> Self {
    self.markers.push(Marker { value: ray.value, closed: ray.inclusive });
    self.shaded.push(ray.interval());
    self
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
  Greater,
  Less,
}

/// `x > v`, `x ≥ v`, `x < v` or `x ≤ v`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ray {
  pub direction: Direction,
  pub value: i64,
  pub inclusive: bool,
}

impl Ray {
  pub fn symbol(&self) -> &'static str {
    match (self.direction, self.inclusive) {
      (Direction::Greater, false) => ">",
      (Direction::Greater, true) => "≥",
      (Direction::Less, false) => "<",
      (Direction::Less, true) => "≤",
    }
  }

  /// Same relation written with `x` on the right.
  fn flipped_symbol(&self) -> &'static str {
    match (self.direction, self.inclusive) {
      (Direction::Greater, false) => "<",
      (Direction::Greater, true) => "≤",
      (Direction::Less, false) => ">",
      (Direction::Less, true) => "≥",
    }
  }

  pub fn render(&self) -> String {
    format!("x{}{}", self.symbol(), self.value)
  }

  /// `x>3` and `3<x`.
  pub fn accepted(&self) -> Vec<String> {
    vec![self.render(), format!("{}{}x", self.value, self.flipped_symbol())]
  }

  fn interval(&self) -> Interval {
    match self.direction {
      Direction::Greater => Interval { from: Some(self.value), to: None },
      Direction::Less => Interval { from: None, to: Some(self.value) },
    }
  }

  fn latex(&self) -> String {
    let op = match (self.direction, self.inclusive) {
      (Direction::Greater, false) => ">",
      (Direction::Greater, true) => "\\ge",
      (Direction::Less, false) => "<",
      (Direction::Less, true) => "\\le",
    };
    format!("x {} {}", op, self.value)
  }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Connective {
  And,
  Or,
}

impl Connective {
  pub fn word(&self) -> &'static str {
    match self {
      Connective::And => "及",
      Connective::Or => "或",
    }
  }
}

/// Relative placement of the two rays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
  /// Both point right.
  RightRight,
  /// Both point left.
  LeftLeft,
  /// Right from the smaller value, left from the larger: they overlap.
  Overlap,
  /// Left from the smaller value, right from the larger: a gap between.
  Gap,
}

const CASES: [Case; 4] = [Case::RightRight, Case::LeftLeft, Case::Overlap, Case::Gap];

/// The solution set of a compound inequality.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolutionSet {
  Gt { value: i64, inclusive: bool },
  Lt { value: i64, inclusive: bool },
  Between { low: i64, low_inclusive: bool, high: i64, high_inclusive: bool },
  All,
  None,
  /// `x < low` or `x > high`.
  Split { low: i64, low_inclusive: bool, high: i64, high_inclusive: bool },
}

/// Phase-two question asked when the solution set has an integer extreme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerAsk {
  Least(i64),
  Greatest(i64),
}

fn lt(inclusive: bool) -> &'static str {
  if inclusive { "≤" } else { "<" }
}

fn gt(inclusive: bool) -> &'static str {
  if inclusive { "≥" } else { ">" }
}

impl SolutionSet {
  /// Solve `first <conn> second` for the given case. In every case the
  /// first ray sits at `a`, the second at `b`, and `a < b`.
  pub fn solve(conn: Connective, case: Case, first: Ray, second: Ray) -> Self {
    match (case, conn) {
      (Case::RightRight, Connective::And) => SolutionSet::Gt { value: second.value, inclusive: second.inclusive },
      (Case::RightRight, Connective::Or) => SolutionSet::Gt { value: first.value, inclusive: first.inclusive },
      (Case::LeftLeft, Connective::And) => SolutionSet::Lt { value: first.value, inclusive: first.inclusive },
      (Case::LeftLeft, Connective::Or) => SolutionSet::Lt { value: second.value, inclusive: second.inclusive },
      (Case::Overlap, Connective::And) => SolutionSet::Between {
        low: first.value,
        low_inclusive: first.inclusive,
        high: second.value,
        high_inclusive: second.inclusive,
      },
      (Case::Overlap, Connective::Or) => SolutionSet::All,
      (Case::Gap, Connective::And) => SolutionSet::None,
      (Case::Gap, Connective::Or) => SolutionSet::Split {
        low: first.value,
        low_inclusive: first.inclusive,
        high: second.value,
        high_inclusive: second.inclusive,
      },
    }
  }

  /// Accepted spellings; the first is the canonical display.
  pub fn accepted(&self) -> Vec<String> {
    match *self {
      SolutionSet::Gt { value, inclusive } => {
        Ray { direction: Direction::Greater, value, inclusive }.accepted()
      }
      SolutionSet::Lt { value, inclusive } => Ray { direction: Direction::Less, value, inclusive }.accepted(),
      SolutionSet::Between { low, low_inclusive, high, high_inclusive } => vec![
        format!("{}{}x{}{}", low, lt(low_inclusive), lt(high_inclusive), high),
        format!("{}{}x{}{}", high, gt(high_inclusive), gt(low_inclusive), low),
      ],
      SolutionSet::All => vec!["所有實數".into(), "allrealnumbers".into()],
      SolutionSet::None => vec!["無解".into(), "nosolution".into()],
      SolutionSet::Split { low, low_inclusive, high, high_inclusive } => {
        let left = format!("x{}{}", lt(low_inclusive), low);
        let right = format!("x{}{}", gt(high_inclusive), high);
        vec![format!("{}或{}", left, right), format!("{}或{}", right, left)]
      }
    }
  }

  /// Least or greatest integer in the set, when the question makes sense.
  pub fn integer_ask(&self) -> Option<IntegerAsk> {
    match *self {
      SolutionSet::Gt { value, inclusive } => Some(IntegerAsk::Least(if inclusive { value } else { value + 1 })),
      SolutionSet::Lt { value, inclusive } => Some(IntegerAsk::Greatest(if inclusive { value } else { value - 1 })),
      SolutionSet::Between { low, low_inclusive, .. } => {
        Some(IntegerAsk::Least(if low_inclusive { low } else { low + 1 }))
      }
      SolutionSet::All | SolutionSet::None | SolutionSet::Split { .. } => None,
    }
  }
}

fn rays_for(case: Case, a: i64, b: i64, inc1: bool, inc2: bool) -> (Ray, Ray) {
  let (d1, d2) = match case {
    Case::RightRight => (Direction::Greater, Direction::Greater),
    Case::LeftLeft => (Direction::Less, Direction::Less),
    Case::Overlap => (Direction::Greater, Direction::Less),
    Case::Gap => (Direction::Less, Direction::Greater),
  };
  (
    Ray { direction: d1, value: a, inclusive: inc1 },
    Ray { direction: d2, value: b, inclusive: inc2 },
  )
}

fn explain(set: &SolutionSet, conn: Connective) -> String {
  let how = match conn {
    Connective::And => "「及」取兩個不等式的公共部分",
    Connective::Or => "「或」取兩個不等式的全部部分",
  };
  let what = match set {
    SolutionSet::All => "兩部分合起來覆蓋整條數線，所以解是所有實數".to_string(),
    SolutionSet::None => "兩部分沒有重疊，所以無解".to_string(),
    other => format!("結果為 {}", other.accepted()[0]),
  };
  format!("{}；{}。", how, what)
}

pub fn generate<R: Rng>(rng: &mut R) -> Question {
  let conn = if rng.gen_bool(0.5) { Connective::And } else { Connective::Or };
  let case = CASES[rng.gen_range(0..CASES.len())];
  let a = rng.gen_range(-5..=4);
  let b = a + rng.gen_range(2..=4);
  let (first, second) = rays_for(case, a, b, rng.gen_bool(0.5), rng.gen_bool(0.5));
  let set = SolutionSet::solve(conn, case, first, second);

  let mut q = Question::new(
    Widget::CompoundInequality,
    1,
    format!("解複合不等式：{} {} {}", first.render(), conn.word(), second.render()),
  );
  q.markup = Some(format!("{} \\text{{ {} }} {}", first.latex(), conn.word(), second.latex()));
  q.blanks.push(Blank::text("解", set.accepted(), NormalizeProfile::Inequality));
  if let Some(ask) = set.integer_ask() {
    q.blanks.push(match ask {
      IntegerAsk::Least(n) => Blank::integer("x 的最小整數值", n),
      IntegerAsk::Greatest(n) => Blank::integer("x 的最大整數值", n),
    });
  }
  q.hint = Some(format!("先在數線上分別畫出 {} 和 {}，再看{}。", first.render(), second.render(), match conn {
    Connective::And => "重疊的部分",
    Connective::Or => "合併後的部分",
  }));
  q.solution = vec![
    SolutionStep::new("題目", format!("{} {} {}", first.render(), conn.word(), second.render())),
    SolutionStep::new("分析", explain(&set, conn)),
    SolutionStep::new("答案", set.accepted()[0].clone()),
  ];
  if let Some(ask) = set.integer_ask() {
    let step = match ask {
      IntegerAsk::Least(n) => SolutionStep::new("最小整數", n.to_string()),
      IntegerAsk::Greatest(n) => SolutionStep::new("最大整數", n.to_string()),
    };
    q.solution.push(step);
  }
  let center = (a + b).div_euclid(2);
  q.figure = Some(Figure::NumberLine(NumberLine::centered(center).with_ray(first).with_ray(second)));
  q
}
