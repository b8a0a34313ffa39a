//! Naming angles: three letters with the vertex in the middle.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::answer::NormalizeProfile;
use crate::domain::{Blank, Figure, Question, SolutionStep, Widget};
use crate::geometry::{angle_figure, Point};

const LETTERS: [char; 16] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S'];

fn ray_end<R: Rng>(rng: &mut R, vertex: Point, angle: f64) -> Point {
  let len = rng.gen_range(110.0..150.0);
  Point::new(vertex.x + len * angle.cos(), vertex.y + len * angle.sin())
}

pub fn generate<R: Rng>(rng: &mut R) -> Question {
  let vertex = Point::new(rng.gen_range(150.0..250.0), rng.gen_range(170.0..230.0));
  let start = rng.gen_range(0.0..2.0 * PI);
  let turn = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
  let opening = rng.gen_range(40.0f64..140.0).to_radians();
  let extra = rng.gen_range(30.0f64..60.0).to_radians();

  let arm1 = ray_end(rng, vertex, start);
  let arm2 = ray_end(rng, vertex, start + turn * opening);
  // a third ray beyond arm2 so the single vertex letter is ambiguous
  let arm3 = ray_end(rng, vertex, start + turn * (opening + extra));

  let picked: Vec<char> = LETTERS.choose_multiple(rng, 4).copied().collect();
  let (a, v, c, d) = (picked[0], picked[1], picked[2], picked[3]);

  let mut fig = angle_figure(vertex, arm1, arm2, 28.0, [a.to_string(), v.to_string(), c.to_string()]);
  fig.other_rays.push((d.to_string(), arm3));
  let degrees = fig.degrees;

  let forward = format!("∠{}{}{}", a, v, c);
  let backward = format!("∠{}{}{}", c, v, a);
  let mut q = Question::new(Widget::AngleQuiz, 1, "用三個字母表示圖中以弧線標示的角。");
  q.blanks.push(Blank::text("角的名稱", vec![forward.clone(), backward.clone()], NormalizeProfile::AngleName));
  q.hint = Some(format!("頂點 {} 必須寫在中間。", v));
  q.solution = vec![
    SolutionStep::new("頂點", v.to_string()),
    SolutionStep::new("答案", format!("{}（或 {}），約 {}°", forward, backward, degrees)),
  ];
  q.figure = Some(Figure::Angle(fig));
  q
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::check_blank;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn either_direction_with_or_without_sign() {
    let mut rng = StdRng::seed_from_u64(1);
    let q = generate(&mut rng);
    let Some(Figure::Angle(fig)) = &q.figure else { panic!("angle figure expected") };
    let [a, v, c] = &fig.labels;
    let blank = &q.blanks[0];
    assert!(check_blank(blank, &format!("{a}{v}{c}")).correct);
    assert!(check_blank(blank, &format!("∠ {c}{v}{a}")).correct);
    assert!(check_blank(blank, &format!("angle {}{}{}", a.to_lowercase(), v, c)).correct);
    assert!(!check_blank(blank, &format!("{v}{a}{c}")).correct);
    assert!(!check_blank(blank, v).correct);
  }

  #[test]
  fn marked_angle_is_between_forty_and_one_forty_degrees() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
      let q = generate(&mut rng);
      let Some(Figure::Angle(fig)) = &q.figure else { panic!("angle figure expected") };
      assert!(fig.degrees >= 39.9 && fig.degrees <= 140.1, "{}", fig.degrees);
      assert_eq!(fig.other_rays.len(), 1);
      let mut letters: Vec<&str> = fig.labels.iter().map(String::as_str).collect();
      letters.push(&fig.other_rays[0].0);
      letters.sort_unstable();
      letters.dedup();
      assert_eq!(letters.len(), 4);
    }
  }
}
