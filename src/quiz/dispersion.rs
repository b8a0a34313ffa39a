//! Measures of central tendency and dispersion over charted datasets.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::{AnswerCheck, Blank, BlankRole, Figure, Question, SolutionStep, Widget};
use crate::stats::{self, FrequencyRow};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
  Mean,
  Median,
  Mode,
  Range,
  Iqr,
  Variance,
  StdDev,
}

const MEASURES: [Measure; 7] = [
  Measure::Mean,
  Measure::Median,
  Measure::Mode,
  Measure::Range,
  Measure::Iqr,
  Measure::Variance,
  Measure::StdDev,
];

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
  StemLeaf,
  Bar,
  Table,
  BoxPlot,
}

impl Measure {
  pub fn name(&self) -> &'static str {
    match self {
      Measure::Mean => "平均數",
      Measure::Median => "中位數",
      Measure::Mode => "眾數",
      Measure::Range => "分佈域",
      Measure::Iqr => "四分位數間距",
      Measure::Variance => "方差",
      Measure::StdDev => "標準差",
    }
  }

  /// Charts a question about this measure can be drawn with. A box plot
  /// only shows the five-number summary.
  pub fn charts(&self) -> &'static [ChartKind] {
    match self {
      Measure::Mean | Measure::Mode | Measure::Variance | Measure::StdDev => {
        &[ChartKind::StemLeaf, ChartKind::Bar, ChartKind::Table]
      }
      Measure::Median => &[ChartKind::BoxPlot, ChartKind::StemLeaf, ChartKind::Bar, ChartKind::Table],
      Measure::Range | Measure::Iqr => &[ChartKind::StemLeaf, ChartKind::Bar, ChartKind::Table, ChartKind::BoxPlot],
    }
  }

  fn hint(&self) -> &'static str {
    match self {
      Measure::Mean => "平均數 = 數據總和 ÷ 數據個數",
      Measure::Median => "先把數據由小至大排列，再找中間的數值。",
      Measure::Mode => "眾數是出現次數最多的數值。",
      Measure::Range => "分佈域 = 最大值 − 最小值",
      Measure::Iqr => "四分位數間距 = 上四分位數 Q3 − 下四分位數 Q1",
      Measure::Variance => "方差 = 各數據與平均數之差的平方的平均數",
      Measure::StdDev => "標準差 = √方差",
    }
  }

  fn asks_rounding(&self) -> bool {
    matches!(self, Measure::Mean | Measure::Variance | Measure::StdDev)
  }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StemRow {
  pub stem: i64,
  pub leaves: Vec<i64>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct BoxSummary {
  pub min: i64,
  pub q1: f64,
  pub median: f64,
  pub q3: f64,
  pub max: i64,
}

/// The dataset as the chosen chart presents it. Only the fields the chart
/// needs are filled.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DatasetFigure {
  pub chart: ChartKind,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub stem_leaf: Vec<StemRow>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub frequencies: Vec<FrequencyRow>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub box_plot: Option<BoxSummary>,
}

fn stem_leaf(data: &[i64]) -> Vec<StemRow> {
  let mut rows: Vec<StemRow> = Vec::new();
  let mut sorted = data.to_vec();
  sorted.sort_unstable();
  for v in sorted {
    let (stem, leaf) = (v.div_euclid(10), v.rem_euclid(10));
    match rows.last_mut() {
      Some(row) if row.stem == stem => row.leaves.push(leaf),
      _ => rows.push(StemRow { stem, leaves: vec![leaf] }),
    }
  }
  rows
}

fn box_summary(data: &[i64]) -> BoxSummary {
  let q = stats::quartiles(data);
  BoxSummary {
    min: data.iter().copied().min().unwrap_or(0),
    q1: q.q1,
    median: q.q2,
    q3: q.q3,
    max: data.iter().copied().max().unwrap_or(0),
  }
}

fn sample<R: Rng>(rng: &mut R, chart: ChartKind) -> Vec<i64> {
  match chart {
    ChartKind::StemLeaf => {
      let n = rng.gen_range(15..=24);
      (0..n).map(|_| rng.gen_range(40..=89)).collect()
    }
    ChartKind::Bar | ChartKind::Table => {
      let mut data = Vec::new();
      for value in 1..=6 {
        let freq = rng.gen_range(1..=8);
        data.extend(std::iter::repeat(value).take(freq));
      }
      data
    }
    ChartKind::BoxPlot => {
      let n = rng.gen_range(11..=20);
      (0..n).map(|_| rng.gen_range(10..=49)).collect()
    }
  }
}

fn figure(chart: ChartKind, data: &[i64]) -> DatasetFigure {
  DatasetFigure {
    chart,
    stem_leaf: if chart == ChartKind::StemLeaf { stem_leaf(data) } else { Vec::new() },
    frequencies: if matches!(chart, ChartKind::Bar | ChartKind::Table) { stats::frequency_table(data) } else { Vec::new() },
    box_plot: if chart == ChartKind::BoxPlot { Some(box_summary(data)) } else { None },
  }
}

fn value_of(measure: Measure, data: &[i64]) -> f64 {
  match measure {
    Measure::Mean => stats::mean(data),
    Measure::Median => stats::median(data),
    Measure::Mode => stats::modes(data).first().copied().unwrap_or_default() as f64,
    Measure::Range => stats::range(data) as f64,
    Measure::Iqr => stats::iqr(data),
    Measure::Variance => stats::variance(data),
    Measure::StdDev => stats::std_dev(data),
  }
}

fn working(measure: Measure, data: &[i64]) -> Vec<SolutionStep> {
  let n = data.len();
  let fmt = stats::format_value;
  match measure {
    Measure::Mean => vec![SolutionStep::new(
      "平均數 = 總和 ÷ 個數",
      format!("{} \\div {} = {}", stats::sum(data), n, fmt(stats::mean(data))),
    )],
    Measure::Median => vec![SolutionStep::new(
      "中位數",
      format!("共 {} 個數據，中位數 = {}", n, fmt(stats::median(data))),
    )],
    Measure::Mode => {
      let best = stats::frequency_table(data).into_iter().max_by_key(|r| r.frequency);
      let text = match best {
        Some(row) => format!("{} 出現了 {} 次，次數最多", row.value, row.frequency),
        None => "沒有數據".to_string(),
      };
      vec![SolutionStep::new("眾數", text)]
    }
    Measure::Range => {
      let (max, min) = (data.iter().max().copied().unwrap_or(0), data.iter().min().copied().unwrap_or(0));
      vec![SolutionStep::new("分佈域 = 最大值 − 最小值", format!("{} - {} = {}", max, min, max - min))]
    }
    Measure::Iqr => {
      let q = stats::quartiles(data);
      vec![
        SolutionStep::new("四分位數", format!("Q_1 = {}, Q_3 = {}", fmt(q.q1), fmt(q.q3))),
        SolutionStep::new("Q_3 − Q_1", format!("{} - {} = {}", fmt(q.q3), fmt(q.q1), fmt(q.q3 - q.q1))),
      ]
    }
    Measure::Variance | Measure::StdDev => {
      let mut steps = vec![
        SolutionStep::new("平均數", format!("\\bar{{x}} = {}", fmt(stats::mean(data)))),
        SolutionStep::new("方差", format!("\\sigma^2 = {}", fmt(stats::variance(data)))),
      ];
      if measure == Measure::StdDev {
        steps.push(SolutionStep::new(
          "標準差",
          format!("\\sigma = \\sqrt{{{}}} \\approx {}", fmt(stats::variance(data)), stats::to_significant(stats::std_dev(data), 3)),
        ));
      }
      steps
    }
  }
}

/// Question about `measure`. Mode questions need a dataset with exactly one
/// mode; after `mode_attempts` failed draws the measure falls back to the median.
pub fn generate_measure<R: Rng>(rng: &mut R, measure: Measure, tolerance: f64, mode_attempts: usize) -> Question {
  let mut measure = measure;
  let mut chart = *measure.charts().choose(rng).unwrap_or(&ChartKind::Table);
  let mut data = sample(rng, chart);
  if measure == Measure::Mode {
    let mut attempts = 1;
    while stats::modes(&data).len() != 1 && attempts < mode_attempts {
      chart = *measure.charts().choose(rng).unwrap_or(&ChartKind::Table);
      data = sample(rng, chart);
      attempts += 1;
    }
    if stats::modes(&data).len() != 1 {
      measure = Measure::Median;
    }
  }

  let value = value_of(measure, &data);
  let display = stats::format_value(value);
  let blank = if measure == Measure::Mode {
    Blank {
      label: measure.name().into(),
      accepted: vec![display],
      check: AnswerCheck::NumberSet { expected: vec![value] },
      role: BlankRole::Answer,
      segment: None,
    }
  } else {
    Blank::numeric(measure.name(), value, display, tolerance)
  };

  let rounding = if measure.asks_rounding() { "（答案準確至兩位小數）" } else { "" };
  let mut q = Question::new(Widget::Dispersion, 1, format!("求以下數據的{}。{}", measure.name(), rounding));
  q.blanks.push(blank);
  q.hint = Some(measure.hint().to_string());
  q.solution = working(measure, &data);
  q.figure = Some(Figure::Dataset(figure(chart, &data)));
  q
}

pub fn generate<R: Rng>(rng: &mut R, tolerance: f64, mode_attempts: usize) -> Question {
  let measure = MEASURES[rng.gen_range(0..MEASURES.len())];
  generate_measure(rng, measure, tolerance, mode_attempts)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::check_blank;
  use rand::{rngs::StdRng, SeedableRng};

  fn values_from(fig: &DatasetFigure) -> Vec<i64> {
    match fig.chart {
      ChartKind::StemLeaf => fig.stem_leaf.iter().flat_map(|r| r.leaves.iter().map(move |l| r.stem * 10 + l)).collect(),
      ChartKind::Bar | ChartKind::Table => fig
        .frequencies
        .iter()
        .flat_map(|r| std::iter::repeat(r.value).take(r.frequency))
        .collect(),
      ChartKind::BoxPlot => Vec::new(),
    }
  }

  #[test]
  fn mode_questions_have_a_unique_mode() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..60 {
      let q = generate_measure(&mut rng, Measure::Mode, 0.05, 5);
      let Some(Figure::Dataset(fig)) = &q.figure else { panic!("dataset expected") };
      if q.blanks[0].label == Measure::Mode.name() {
        assert_eq!(stats::modes(&values_from(fig)).len(), 1);
      } else {
        assert_eq!(q.blanks[0].label, Measure::Median.name());
      }
    }
  }

  #[test]
  fn mode_falls_back_when_no_attempts_allowed_succeed() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut fell_back = 0;
    for _ in 0..40 {
      let q = generate_measure(&mut rng, Measure::Mode, 0.05, 1);
      let Some(Figure::Dataset(fig)) = &q.figure else { panic!("dataset expected") };
      let unique = stats::modes(&values_from(fig)).len() == 1;
      assert_eq!(q.blanks[0].label == Measure::Mode.name(), unique);
      if !unique {
        fell_back += 1;
      }
    }
    assert!(fell_back > 0);
  }

  #[test]
  fn answers_within_tolerance_are_accepted() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..40 {
      let q = generate_measure(&mut rng, Measure::StdDev, 0.05, 5);
      let blank = &q.blanks[0];
      let AnswerCheck::Numeric { expected, .. } = blank.check else { panic!("numeric check expected") };
      assert!(check_blank(blank, &format!("{:.2}", expected)).correct);
      assert!(!check_blank(blank, &format!("{:.2}", expected + 0.1)).correct);
    }
  }

  #[test]
  fn box_plot_summary_matches_quartiles() {
    let data = [12, 15, 18, 21, 24, 30, 33, 40, 41, 45, 49];
    let s = box_summary(&data);
    assert_eq!((s.min, s.max), (12, 49));
    assert_eq!((s.q1, s.median, s.q3), (18.0, 30.0, 41.0));
    assert_eq!(stem_leaf(&[47, 41, 52])[0], StemRow { stem: 4, leaves: vec![1, 7] });
  }
}
