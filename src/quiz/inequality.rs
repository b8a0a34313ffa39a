//! Simple inequalities: translate a sentence (level 1) or read a number line (level 2).

use rand::Rng;

use super::compound::{Direction, NumberLine, Ray};
use crate::answer::NormalizeProfile;
use crate::domain::{Blank, Figure, Question, SolutionStep, Widget};

struct Template {
  phrase: &'static str,
  direction: Direction,
  inclusive: bool,
  hint: &'static str,
}

const TEMPLATES: [Template; 10] = [
  Template { phrase: "小於", direction: Direction::Less, inclusive: false, hint: "「小於」不包括該數，用 <。" },
  Template { phrase: "大於", direction: Direction::Greater, inclusive: false, hint: "「大於」不包括該數，用 >。" },
  Template { phrase: "小於或等於", direction: Direction::Less, inclusive: true, hint: "「小於或等於」包括該數，用 ≤。" },
  Template { phrase: "不大於", direction: Direction::Less, inclusive: true, hint: "「不大於」即小於或等於，用 ≤。" },
  Template { phrase: "至大為", direction: Direction::Less, inclusive: true, hint: "「至大為」表示最大可以等於該數，用 ≤。" },
  Template { phrase: "最多是", direction: Direction::Less, inclusive: true, hint: "「最多是」表示不會超過該數，用 ≤。" },
  Template { phrase: "大於或等於", direction: Direction::Greater, inclusive: true, hint: "「大於或等於」包括該數，用 ≥。" },
  Template { phrase: "不小於", direction: Direction::Greater, inclusive: true, hint: "「不小於」即大於或等於，用 ≥。" },
  Template { phrase: "至小為", direction: Direction::Greater, inclusive: true, hint: "「至小為」表示最小可以等於該數，用 ≥。" },
  Template { phrase: "最少是", direction: Direction::Greater, inclusive: true, hint: "「最少是」表示不會少於該數，用 ≥。" },
];

const GRAPH_RAYS: [(Direction, bool); 4] = [
  (Direction::Less, false),
  (Direction::Greater, false),
  (Direction::Less, true),
  (Direction::Greater, true),
];

fn graph_explanation(ray: &Ray) -> String {
  let dot = if ray.inclusive { "實心圓點表示包括該數" } else { "空心圓點表示不包括該數" };
  let arrow = match ray.direction {
    Direction::Greater => "箭頭向右表示大於",
    Direction::Less => "箭頭向左表示小於",
  };
  format!("{}；{}。", dot, arrow)
}

pub fn generate<R: Rng>(rng: &mut R, level: u8) -> Question {
  if level >= 2 {
    return from_graph(rng);
  }
  let template = &TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
  let ray = Ray { direction: template.direction, value: rng.gen_range(-10..=10), inclusive: template.inclusive };

  let mut q = Question::new(Widget::Inequality, 1, format!("以不等式表示：x {} {}", template.phrase, ray.value));
  q.blanks.push(Blank::text("不等式", ray.accepted(), NormalizeProfile::Inequality));
  q.hint = Some(template.hint.to_string());
  q.solution = vec![
    SolutionStep::new("關鍵詞", format!("「{}」→ {}", template.phrase, ray.symbol())),
    SolutionStep::new("答案", ray.render()),
  ];
  q
}

fn from_graph<R: Rng>(rng: &mut R) -> Question {
  let (direction, inclusive) = GRAPH_RAYS[rng.gen_range(0..GRAPH_RAYS.len())];
  let ray = Ray { direction, value: rng.gen_range(-5..=5), inclusive };

  let mut q = Question::new(Widget::Inequality, 2, "寫出數線所表示的不等式。");
  q.blanks.push(Blank::text("不等式", ray.accepted(), NormalizeProfile::Inequality));
  q.hint = Some("留意圓點是實心還是空心，以及箭頭的方向。".into());
  q.solution = vec![
    SolutionStep::new("讀圖", graph_explanation(&ray)),
    SolutionStep::new("答案", ray.render()),
  ];
  q.figure = Some(Figure::NumberLine(NumberLine::centered(ray.value).with_ray(ray)));
  q
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::check_blank;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn not_greater_than_means_at_most() {
    let t = TEMPLATES.iter().find(|t| t.phrase == "不大於").unwrap();
    let ray = Ray { direction: t.direction, value: 3, inclusive: t.inclusive };
    let blank = Blank::text("不等式", ray.accepted(), NormalizeProfile::Inequality);
    assert!(check_blank(&blank, "x<=3").correct);
    assert!(check_blank(&blank, "x ≤ 3").correct);
    assert!(check_blank(&blank, "3>=x").correct);
    assert!(!check_blank(&blank, "x<3").correct);
  }

  #[test]
  fn graph_questions_mark_the_endpoint() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..40 {
      let q = generate(&mut rng, 2);
      let Some(Figure::NumberLine(line)) = &q.figure else { panic!("number line expected") };
      let marker = line.markers[0];
      assert_eq!(line.min + 7, marker.value);
      let expected = &q.blanks[0].accepted[0];
      assert_eq!(marker.closed, expected.contains('≤') || expected.contains('≥'));
    }
  }

  #[test]
  fn text_questions_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..40 {
      let q = generate(&mut rng, 1);
      assert!(q.figure.is_none());
      assert!(q.prompt.starts_with("以不等式表示：x "));
      assert!(check_blank(&q.blanks[0], &q.blanks[0].accepted[0]).correct);
    }
  }
}
