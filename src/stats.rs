//! Descriptive statistics over small integer datasets.
//!
//! Variance and standard deviation are population measures. Quartiles use
//! the halves on either side of the median (the median itself is excluded
//! from both halves when the count is odd).

use serde::Serialize;

pub fn sum(data: &[i64]) -> i64 {
  data.iter().sum()
}

fn sorted(data: &[i64]) -> Vec<i64> {
  let mut v = data.to_vec();
  v.sort_unstable();
  v
}

/// Mean of the values; 0 for an empty slice.
pub fn mean(data: &[i64]) -> f64 {
  if data.is_empty() { return 0.0; }
  sum(data) as f64 / data.len() as f64
}

fn median_of_sorted(sorted: &[i64]) -> f64 {
  let n = sorted.len();
  if n == 0 { return 0.0; }
  let mid = n / 2;
  if n % 2 == 1 {
    sorted[mid] as f64
  } else {
    (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
  }
}

pub fn median(data: &[i64]) -> f64 {
  median_of_sorted(&sorted(data))
}

/// All most-frequent values, ascending. Empty when every value occurs once.
pub fn modes(data: &[i64]) -> Vec<i64> {
  let table = frequency_table(data);
  let max = table.iter().map(|r| r.frequency).max().unwrap_or(0);
  if max <= 1 {
    return Vec::new();
  }
  table.iter().filter(|r| r.frequency == max).map(|r| r.value).collect()
}

pub fn range(data: &[i64]) -> i64 {
  match (data.iter().max(), data.iter().min()) {
    (Some(max), Some(min)) => max - min,
    _ => 0,
  }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Quartiles {
  pub q1: f64,
  pub q2: f64,
  pub q3: f64,
}

pub fn quartiles(data: &[i64]) -> Quartiles {
  let s = sorted(data);
  let mid = s.len() / 2;
  let lower = &s[..mid];
  let upper = if s.len() % 2 == 0 { &s[mid..] } else { &s[(mid + 1).min(s.len())..] };
  Quartiles {
    q1: median_of_sorted(lower),
    q2: median_of_sorted(&s),
    q3: median_of_sorted(upper),
  }
}

pub fn iqr(data: &[i64]) -> f64 {
  let q = quartiles(data);
  q.q3 - q.q1
}

pub fn variance(data: &[i64]) -> f64 {
  if data.is_empty() { return 0.0; }
  let m = mean(data);
  data.iter().map(|v| (*v as f64 - m).powi(2)).sum::<f64>() / data.len() as f64
}

pub fn std_dev(data: &[i64]) -> f64 {
  variance(data).sqrt()
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct FrequencyRow {
  pub value: i64,
  pub frequency: usize,
  pub cumulative: usize,
}

/// Distinct values ascending, with frequency and cumulative frequency.
pub fn frequency_table(data: &[i64]) -> Vec<FrequencyRow> {
  let mut rows: Vec<FrequencyRow> = Vec::new();
  for v in sorted(data) {
    match rows.last_mut() {
      Some(last) if last.value == v => last.frequency += 1,
      _ => rows.push(FrequencyRow { value: v, frequency: 1, cumulative: 0 }),
    }
  }
  let mut running = 0;
  for row in &mut rows {
    running += row.frequency;
    row.cumulative = running;
  }
  rows
}

/// Integers print bare; everything else to at most two decimals without trailing zeros.
pub fn format_value(v: f64) -> String {
  if v.fract() == 0.0 {
    return format!("{}", v as i64);
  }
  let rounded = (v * 100.0).round() / 100.0;
  rounded.to_string()
}

/// Rounds to `sig` significant figures.
pub fn to_significant(v: f64, sig: i32) -> f64 {
  if v == 0.0 { return 0.0; }
  let magnitude = v.abs().log10().floor() as i32;
  let factor = 10f64.powi(sig - magnitude - 1);
  (v * factor).round() / factor
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn centre_measures() {
    let d = [3, 1, 4, 1, 5, 9, 2, 6];
    assert_eq!(sum(&d), 31);
    assert!((mean(&d) - 3.875).abs() < 1e-12);
    assert_eq!(median(&d), 3.5);
    assert_eq!(modes(&d), vec![1]);
    assert_eq!(range(&d), 8);
  }

  #[test]
  fn no_mode_when_all_distinct() {
    assert!(modes(&[1, 2, 3]).is_empty());
    assert_eq!(modes(&[2, 2, 5, 5, 7]), vec![2, 5]);
  }

  #[test]
  fn quartiles_exclude_median_for_odd_counts() {
    let q = quartiles(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(q, Quartiles { q1: 2.0, q2: 4.0, q3: 6.0 });
    let q = quartiles(&[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(q, Quartiles { q1: 2.5, q2: 4.5, q3: 6.5 });
    assert_eq!(iqr(&[1, 2, 3, 4, 5, 6, 7, 8]), 4.0);
  }

  #[test]
  fn spread_is_population_based() {
    let d = [2, 4, 4, 4, 5, 5, 7, 9];
    assert_eq!(variance(&d), 4.0);
    assert_eq!(std_dev(&d), 2.0);
  }

  #[test]
  fn frequency_rows_accumulate() {
    let rows = frequency_table(&[3, 1, 3, 2, 3]);
    assert_eq!(rows.iter().map(|r| (r.value, r.frequency, r.cumulative)).collect::<Vec<_>>(),
      vec![(1, 1, 1), (2, 1, 2), (3, 3, 5)]);
  }

  #[test]
  fn display_formatting() {
    assert_eq!(format_value(42.0), "42");
    assert_eq!(format_value(37.5), "37.5");
    assert_eq!(format_value(2.0 / 3.0), "0.67");
    assert_eq!(to_significant(12.3456, 3), 12.3);
  }
}
