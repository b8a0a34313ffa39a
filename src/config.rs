//! Loading quiz configuration (generator tuning, feedback messages, extra
//! word problems) from TOML.
//!
//! See `QuizConfig` for the expected schema. Every section is optional.

use serde::Deserialize;
use tracing::{error, info};

use crate::quiz::simultaneous::BankQuestion;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub quiz: QuizSettings,
  #[serde(default)]
  pub render: RenderSettings,
  #[serde(default)]
  pub messages: Messages,
  /// Appended to the built-in simultaneous-equation bank.
  #[serde(default)]
  pub simultaneous: Vec<BankQuestion>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizSettings {
  /// How many recent questions a session avoids repeating.
  pub recent_window: usize,
  /// Absolute tolerance for numeric statistics answers.
  pub dispersion_tolerance: f64,
  /// Datasets drawn while looking for a single mode before asking another measure.
  pub mode_attempts: usize,
  /// Sessions kept in memory; the least recently used one is dropped beyond this.
  pub max_sessions: usize,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self { recent_window: 5, dispersion_tolerance: 0.05, mode_attempts: 5, max_sessions: 10_000 }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
  pub enabled: bool,
}

impl Default for RenderSettings {
  fn default() -> Self {
    Self { enabled: true }
  }
}

/// Feedback texts. `{points}`, `{expected}` and `{label}` are filled in.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Messages {
  pub correct: String,
  pub incorrect: String,
  pub partial: String,
  pub working_correct: String,
  pub working_incorrect: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      correct: "答對了！+{points} 分".into(),
      incorrect: "答錯了，正確答案是 {expected}".into(),
      partial: "部分正確（+{points} 分），請查看標示為錯誤的空格。".into(),
      working_correct: "{label}：步驟正確".into(),
      working_incorrect: "{label}：步驟有誤，參考 {expected}".into(),
    }
  }
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse(&s) {
      Ok(cfg) => {
        info!(target: "mathquiz_backend", %path, extra_bank = cfg.simultaneous.len(), "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mathquiz_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mathquiz_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse(s: &str) -> Result<QuizConfig, toml::de::Error> {
  toml::from_str::<QuizConfig>(s)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = parse("").unwrap();
    assert_eq!(cfg.quiz, QuizSettings::default());
    assert!(cfg.render.enabled);
    assert!(cfg.simultaneous.is_empty());
    assert!(cfg.messages.correct.contains("{points}"));
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let cfg = parse(
      r#"
        [quiz]
        recent_window = 3

        [render]
        enabled = false

        [messages]
        correct = "Correct! +{points}"

        [[simultaneous]]
        title = "Tickets"
        text = "Adult and child tickets."
        vars = "Let x be adults, y children."

        [[simultaneous.equations]]
        accepted = ["x+y=10"]
        [simultaneous.equations.segment]
        text = "10 tickets in total."
        keywords = ["10"]

        [[simultaneous.equations]]
        accepted = ["x=4y"]
        [simultaneous.equations.segment]
        text = "Four times as many adults."
        keywords = ["Four times"]
        preview_order = [0]
      "#,
    )
    .unwrap();
    assert_eq!(cfg.quiz.recent_window, 3);
    assert_eq!(cfg.quiz.mode_attempts, 5);
    assert_eq!(cfg.quiz.max_sessions, 10_000);
    assert!(!cfg.render.enabled);
    assert_eq!(cfg.messages.correct, "Correct! +{points}");
    assert_eq!(cfg.messages.incorrect, Messages::default().incorrect);
    assert_eq!(cfg.simultaneous.len(), 1);
    assert_eq!(cfg.simultaneous[0].equations[1].segment.preview_order, Some(vec![0]));
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(parse("[quiz\nrecent_window = ").is_err());
  }
}
