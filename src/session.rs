//! Per-widget quiz state and its reducer.
//!
//! A session moves `AnswerInput → Submitted(correct) → next` or
//! `AnswerInput → Submitted(incorrect) → ShowSolution → next`. Every
//! transition goes through `Session::apply`, which returns the new state
//! and leaves the old one untouched; a rejected action changes nothing.

use serde::Serialize;

use crate::answer::{answer_text, check_blank, is_gradable};
use crate::config::Messages;
use crate::domain::{BlankAnswer, BlankResult, BlankRole, Feedback, Question, Widget};
use crate::error::QuizError;
use crate::quiz::History;
use crate::util::fill_template;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
  AnswerInput,
  Submitted { correct: bool },
  ShowSolution,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
  /// One answer per blank, in blank order.
  Submit(Vec<BlankAnswer>),
  ShowHint,
  RevealSolution,
  /// Replace the question with a freshly generated one.
  Advance(Question),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
  pub id: String,
  pub widget: Widget,
  pub level: u8,
  pub question: Question,
  pub phase: Phase,
  pub score: u32,
  pub streak: u32,
  pub answered: u32,
  pub feedback: Option<Feedback>,
  pub hint_shown: bool,
  pub history: History,
}

impl Session {
  pub fn new(id: String, question: Question, history: History) -> Self {
    Self {
      id,
      widget: question.widget,
      level: question.level,
      question,
      phase: Phase::AnswerInput,
      score: 0,
      streak: 0,
      answered: 0,
      feedback: None,
      hint_shown: false,
      history,
    }
  }

  pub fn apply(&self, action: Action, messages: &Messages) -> Result<Session, QuizError> {
    match action {
      Action::Submit(answers) => self.submit(&answers, messages),
      Action::ShowHint => Ok(Session { hint_shown: self.question.hint.is_some(), ..self.clone() }),
      Action::RevealSolution => self.reveal(),
      Action::Advance(question) => {
        let skipped = self.phase == Phase::AnswerInput;
        Ok(Session {
          level: question.level,
          question,
          phase: Phase::AnswerInput,
          feedback: None,
          hint_shown: false,
          streak: if skipped { 0 } else { self.streak },
          ..self.clone()
        })
      }
    }
  }

  fn submit(&self, answers: &[BlankAnswer], messages: &Messages) -> Result<Session, QuizError> {
    if self.phase != Phase::AnswerInput {
      return Err(QuizError::AlreadySubmitted);
    }
    let blanks = &self.question.blanks;
    if answers.len() != blanks.len() {
      return Err(QuizError::AnswerCount { expected: blanks.len(), got: answers.len() });
    }
    let texts: Vec<String> = blanks.iter().zip(answers).map(|(b, a)| answer_text(b, a)).collect();
    let missing = blanks
      .iter()
      .zip(&texts)
      .any(|(b, t)| b.role == BlankRole::Answer && t.trim().is_empty());
    if missing {
      return Err(QuizError::EmptyAnswer);
    }
    if let Some((b, _)) = blanks
      .iter()
      .zip(&texts)
      .find(|(b, t)| b.role == BlankRole::Answer && !is_gradable(b, t))
    {
      return Err(QuizError::InvalidNumber(b.label.clone()));
    }

    let results: Vec<BlankResult> = blanks
      .iter()
      .zip(&texts)
      .map(|(b, t)| {
        let verdict = check_blank(b, t);
        BlankResult { label: b.label.clone(), role: b.role, correct: verdict.correct, expected: verdict.expected }
      })
      .collect();

    let answer_results: Vec<&BlankResult> = results.iter().filter(|r| r.role == BlankRole::Answer).collect();
    let hits = answer_results.iter().filter(|r| r.correct).count() as u32;
    let correct = hits as usize == self.question.answer_blanks().count();
    let points = hits * self.widget.points_per_blank();
    let points_text = points.to_string();

    let mut message = if correct {
      fill_template(&messages.correct, &[("points", points_text.as_str())])
    } else if points > 0 {
      fill_template(&messages.partial, &[("points", points_text.as_str())])
    } else {
      let expected = answer_results
        .iter()
        .filter(|r| !r.correct)
        .map(|r| r.expected.as_str())
        .collect::<Vec<_>>()
        .join("；");
      fill_template(&messages.incorrect, &[("expected", expected.as_str())])
    };
    for r in results.iter().filter(|r| r.role == BlankRole::Working) {
      let tpl = if r.correct { &messages.working_correct } else { &messages.working_incorrect };
      message.push('\n');
      message.push_str(&fill_template(tpl, &[("label", r.label.as_str()), ("expected", r.expected.as_str())]));
    }

    Ok(Session {
      phase: Phase::Submitted { correct },
      score: self.score + points,
      streak: if correct { self.streak + 1 } else { 0 },
      answered: self.answered + 1,
      feedback: Some(Feedback { correct, message, points, blanks: results, solution: None }),
      ..self.clone()
    })
  }

  fn reveal(&self) -> Result<Session, QuizError> {
    match self.phase {
      Phase::Submitted { correct: false } | Phase::ShowSolution => {
        let feedback = self.feedback.clone().map(|f| Feedback { solution: Some(self.question.solution.clone()), ..f });
        Ok(Session { phase: Phase::ShowSolution, feedback, ..self.clone() })
      }
      _ => Err(QuizError::NothingToReveal),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::NormalizeProfile;
  use crate::domain::{AnswerCheck, Blank, SolutionStep};

  fn question(widget: Widget) -> Question {
    let mut q = Question::new(widget, 1, "展開 (x+y)^2");
    q.blanks.push(Blank::text("展開式", vec!["x^2+2xy+y^2".into()], NormalizeProfile::Polynomial).permuting());
    q.hint = Some("(a + b)^2 = a^2 + 2ab + b^2".into());
    q.solution = vec![SolutionStep::new("答案", "x^2+2xy+y^2")];
    q
  }

  fn start(widget: Widget) -> Session {
    Session::new("s1".into(), question(widget), History::default())
  }

  fn submit(s: &Session, answer: &str) -> Result<Session, QuizError> {
    s.apply(Action::Submit(vec![answer.into()]), &Messages::default())
  }

  #[test]
  fn empty_answer_is_rejected_and_state_kept() {
    let s = start(Widget::IdentityQuiz);
    assert_eq!(submit(&s, "   "), Err(QuizError::EmptyAnswer));
    assert_eq!(s.phase, Phase::AnswerInput);
    assert!(s.feedback.is_none());
  }

  #[test]
  fn non_numeric_answer_to_a_numeric_blank_is_not_graded() {
    let mut q = Question::new(Widget::Dispersion, 1, "求平均數");
    q.blanks.push(Blank::numeric("平均數", 12.5, "12.5".into(), 0.05));
    let s = Session { streak: 3, ..Session::new("s3".into(), q, History::default()) };

    let err = s.apply(Action::Submit(vec!["abc".into()]), &Messages::default()).unwrap_err();
    assert_eq!(err, QuizError::InvalidNumber("平均數".into()));
    assert_eq!(err.to_string(), "please enter a number for 平均數");
    assert_eq!((s.phase, s.streak, s.answered), (Phase::AnswerInput, 3, 0));

    let s = s.apply(Action::Submit(vec!["12.5".into()]), &Messages::default()).unwrap();
    assert_eq!(s.phase, Phase::Submitted { correct: true });
    assert_eq!(s.streak, 4);
  }

  #[test]
  fn correct_answer_scores_and_extends_streak() {
    let s = submit(&start(Widget::IdentityQuiz), "y^2 + 2xy + x^2").unwrap();
    assert_eq!(s.phase, Phase::Submitted { correct: true });
    assert_eq!(s.score, 10);
    assert_eq!(s.streak, 1);
    let fb = s.feedback.as_ref().unwrap();
    assert_eq!(fb.message, "答對了！+10 分");
    assert_eq!(submit(&s, "x^2"), Err(QuizError::AlreadySubmitted));
    assert_eq!(s.apply(Action::RevealSolution, &Messages::default()), Err(QuizError::NothingToReveal));
  }

  #[test]
  fn wrong_answer_then_solution_then_next() {
    let s = start(Widget::IdentityQuiz);
    let s = Session { streak: 4, ..s };
    let s = submit(&s, "x^2+y^2").unwrap();
    assert_eq!(s.phase, Phase::Submitted { correct: false });
    assert_eq!(s.streak, 0);
    assert_eq!(s.feedback.as_ref().unwrap().message, "答錯了，正確答案是 x^2+2xy+y^2");

    let s = s.apply(Action::RevealSolution, &Messages::default()).unwrap();
    assert_eq!(s.phase, Phase::ShowSolution);
    assert_eq!(s.feedback.as_ref().unwrap().solution.as_ref().unwrap().len(), 1);

    let s = s.apply(Action::Advance(question(Widget::IdentityQuiz)), &Messages::default()).unwrap();
    assert_eq!(s.phase, Phase::AnswerInput);
    assert!(s.feedback.is_none());
    assert_eq!(s.answered, 1);
  }

  #[test]
  fn skipping_resets_the_streak() {
    let s = submit(&start(Widget::AngleQuiz), "x^2+2xy+y^2").unwrap();
    let s = s.apply(Action::Advance(question(Widget::AngleQuiz)), &Messages::default()).unwrap();
    assert_eq!(s.streak, 1);
    let s = s.apply(Action::Advance(question(Widget::AngleQuiz)), &Messages::default()).unwrap();
    assert_eq!(s.streak, 0);
    assert_eq!(s.score, 1);
  }

  #[test]
  fn answer_count_must_match_blanks() {
    let s = start(Widget::IdentityQuiz);
    let err = s.apply(Action::Submit(vec![]), &Messages::default()).unwrap_err();
    assert_eq!(err, QuizError::AnswerCount { expected: 1, got: 0 });
  }

  #[test]
  fn partial_credit_and_working_remarks() {
    let mut q = Question::new(Widget::CompoundInequality, 1, "x>1 及 x>3");
    q.blanks.push(Blank::text("解", vec!["x>3".into()], NormalizeProfile::Inequality));
    q.blanks.push(Blank::integer("最小整數", 4));
    q.blanks.push(Blank {
      label: "步驟".into(),
      accepted: vec!["x>3".into()],
      check: AnswerCheck::ContainsAll { keywords: vec!["3".into()], profile: NormalizeProfile::Plain },
      role: BlankRole::Working,
      segment: None,
    });
    let s = Session::new("s2".into(), q, History::default());
    let s = s
      .apply(Action::Submit(vec!["x>3".into(), "3".into(), "".into()]), &Messages::default())
      .unwrap();
    let fb = s.feedback.as_ref().unwrap();
    assert!(!fb.correct);
    assert_eq!(fb.points, 10);
    assert_eq!(s.score, 10);
    assert!(fb.message.starts_with("部分正確"));
    assert!(fb.message.ends_with("步驟：步驟有誤，參考 x>3"));
  }

  #[test]
  fn hint_flag_follows_question() {
    let s = start(Widget::IdentityQuiz).apply(Action::ShowHint, &Messages::default()).unwrap();
    assert!(s.hint_shown);
    let s = s.apply(Action::Advance(question(Widget::IdentityQuiz)), &Messages::default()).unwrap();
    assert!(!s.hint_shown);
  }
}
