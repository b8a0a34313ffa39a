//! Circle-theorem exercises: one angle is given, a related one is asked.
//!
//! Points are placed so the given angle is a whole number of degrees; the
//! figure is measured from the same points, so the diagram and the
//! expected answer always agree.

use std::collections::BTreeMap;

use rand::Rng;

use crate::domain::{Blank, Figure, Question, SolutionStep, Widget};
use crate::geometry::{CircleScene, TheoremMode};

const QUIZ_MODES: [TheoremMode; 5] = [
  TheoremMode::Center,
  TheoremMode::Segment,
  TheoremMode::Semicircle,
  TheoremMode::CyclicQuad,
  TheoremMode::TangentChord,
];

/// What the generator decided, kept alongside the question for checking.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleProblem {
  pub mode: TheoremMode,
  pub given: (String, i64),
  pub asked: (String, i64),
  pub reason: &'static str,
}

fn place(scene_angles: &mut BTreeMap<String, f64>, name: &str, degrees: f64) {
  scene_angles.insert(name.to_string(), degrees.to_radians());
}

/// Picks a mode and point positions. Angles are in degrees along the circle.
pub fn problem<R: Rng>(rng: &mut R) -> (CircleProblem, CircleScene) {
  let mode = QUIZ_MODES[rng.gen_range(0..QUIZ_MODES.len())];
  let alpha: f64 = rng.gen_range(0.0..360.0);
  let mut at = BTreeMap::new();

  let problem = match mode {
    TheoremMode::Center => {
      let k = rng.gen_range(20..=80);
      let arc = 2.0 * k as f64;
      place(&mut at, "A", alpha);
      place(&mut at, "B", alpha + arc);
      place(&mut at, "P", alpha + arc + (360.0 - arc) * rng.gen_range(0.3..0.7));
      if rng.gen_bool(0.5) {
        CircleProblem { mode, given: ("∠APB".into(), k), asked: ("∠AOB".into(), 2 * k), reason: "圓心角是圓周角的兩倍" }
      } else {
        CircleProblem { mode, given: ("∠AOB".into(), 2 * k), asked: ("∠APB".into(), k), reason: "圓周角是圓心角的一半" }
      }
    }
    TheoremMode::Segment => {
      let k = rng.gen_range(20..=80);
      let arc = 2.0 * k as f64;
      let rest = 360.0 - arc;
      place(&mut at, "A", alpha);
      place(&mut at, "B", alpha + arc);
      place(&mut at, "P", alpha + arc + rest * rng.gen_range(0.15..0.45));
      place(&mut at, "Q", alpha + arc + rest * rng.gen_range(0.55..0.85));
      CircleProblem { mode, given: ("∠APB".into(), k), asked: ("∠AQB".into(), k), reason: "同弓形內的圓周角相等" }
    }
    TheoremMode::Semicircle => {
      let k = rng.gen_range(20..=70);
      place(&mut at, "A", alpha);
      place(&mut at, "B", alpha + 180.0);
      place(&mut at, "P", alpha + 180.0 + 2.0 * k as f64);
      CircleProblem { mode, given: ("∠PAB".into(), k), asked: ("∠PBA".into(), 90 - k), reason: "半圓上的圓周角是直角，三角形內角和為 180°" }
    }
    TheoremMode::CyclicQuad => {
      let k = rng.gen_range(50..=130);
      let arc = 2.0 * k as f64;
      place(&mut at, "A", alpha);
      place(&mut at, "D", alpha + arc * rng.gen_range(0.3..0.7));
      place(&mut at, "C", alpha + arc);
      place(&mut at, "B", alpha + arc + (360.0 - arc) * rng.gen_range(0.3..0.7));
      CircleProblem { mode, given: ("∠ABC".into(), k), asked: ("∠CDA".into(), 180 - k), reason: "圓內接四邊形的對角互補" }
    }
    _ => {
      let k = rng.gen_range(25..=80);
      let arc = 2.0 * k as f64;
      place(&mut at, "T", alpha);
      place(&mut at, "A", alpha + arc);
      place(&mut at, "P", alpha + arc + (360.0 - arc) * rng.gen_range(0.3..0.7));
      CircleProblem {
        mode: TheoremMode::TangentChord,
        given: ("∠TPA".into(), k),
        asked: ("tangent-chord".into(), k),
        reason: "切線與弦所成的角等於交錯弓形內的圓周角",
      }
    }
  };
  let scene = CircleScene::with_angles(problem.mode, &at);
  (problem, scene)
}

fn setting(mode: TheoremMode) -> &'static str {
  match mode {
    TheoremMode::Semicircle => "圖中 O 為圓心，AB 為直徑。",
    TheoremMode::CyclicQuad => "圖中 ABCD 為圓內接四邊形。",
    TheoremMode::TangentChord => "圖中直線在 T 點與圓相切。",
    _ => "圖中 O 為圓心。",
  }
}

fn describe(label: &str) -> String {
  if label == "tangent-chord" { "切線與弦 TA 所成的銳角".to_string() } else { label.to_string() }
}

pub fn generate<R: Rng>(rng: &mut R) -> Question {
  let (problem, scene) = problem(rng);
  let (given_label, given) = &problem.given;
  let (asked_label, asked) = &problem.asked;

  let mut q = Question::new(
    Widget::CircleTheorems,
    1,
    format!("{}已知 {} = {}°，求 {}。", setting(problem.mode), describe(given_label), given, describe(asked_label)),
  );
  q.blanks.push(Blank::integer(format!("{}（度）", describe(asked_label)), *asked));
  q.hint = Some(problem.reason.to_string());
  q.solution = vec![
    SolutionStep::new("已知", format!("{} = {}°", describe(given_label), given)),
    SolutionStep::new("定理", problem.reason),
    SolutionStep::new("答案", format!("{} = {}°", describe(asked_label), asked)),
  ];
  q.figure = Some(Figure::Circle(scene.measure()));
  q
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::{display_degrees, CircleFigure};
  use rand::{rngs::StdRng, SeedableRng};

  fn measured(fig: &CircleFigure, label: &str) -> f64 {
    if let Some(v) = fig.value(label) {
      return v;
    }
    let names: Vec<String> = label.trim_start_matches('∠').chars().map(|c| c.to_string()).collect();
    display_degrees(fig.points[&names[0]], fig.points[&names[1]], fig.points[&names[2]])
  }

  #[test]
  fn answers_agree_with_measured_geometry() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
      let (p, scene) = problem(&mut rng);
      let fig = scene.measure();
      let given = measured(&fig, &p.given.0);
      let asked = measured(&fig, &p.asked.0);
      assert!((given - p.given.1 as f64).abs() < 0.11, "{:?}: given {given}", p);
      assert!((asked - p.asked.1 as f64).abs() < 0.11, "{:?}: asked {asked}", p);
    }
  }

  #[test]
  fn questions_carry_the_circle_figure() {
    let mut rng = StdRng::seed_from_u64(6);
    let q = generate(&mut rng);
    assert!(matches!(q.figure, Some(Figure::Circle(_))));
    assert_eq!(q.blanks.len(), 1);
    assert!(q.prompt.contains('°'));
  }
}
