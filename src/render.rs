//! Formula rendering capability.
//!
//! The formula engine (KaTeX) runs in the browser. The backend sees it as
//! an injected `FormulaRenderer` so handlers can be exercised with a mock.
//! Callers go through `render_or_plain`: a failed render never propagates,
//! it degrades to the raw markup as plain text.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
  #[error("unbalanced braces in markup")]
  UnbalancedBraces,
  #[error("empty markup")]
  Empty,
  #[error("renderer unavailable: {0}")]
  Unavailable(String),
}

pub trait FormulaRenderer: Send + Sync {
  /// Turn LaTeX markup into a displayable HTML fragment.
  fn render(&self, markup: &str, display_mode: bool) -> Result<String, RenderError>;
}

/// Emits a placeholder element that the client-side KaTeX auto-render picks up.
#[derive(Clone, Debug, Default)]
pub struct KatexMarkup;

impl FormulaRenderer for KatexMarkup {
  fn render(&self, markup: &str, display_mode: bool) -> Result<String, RenderError> {
    let trimmed = markup.trim();
    if trimmed.is_empty() {
      return Err(RenderError::Empty);
    }
    check_braces(trimmed)?;
    let class = if display_mode { "math math-display" } else { "math math-inline" };
    Ok(format!(
      "<span class=\"{}\" data-display=\"{}\">{}</span>",
      class,
      display_mode,
      escape_html(trimmed)
    ))
  }
}

/// Rendering switched off in config: always fails so callers fall back.
#[derive(Clone, Debug, Default)]
pub struct Disabled;

impl FormulaRenderer for Disabled {
  fn render(&self, _markup: &str, _display_mode: bool) -> Result<String, RenderError> {
    Err(RenderError::Unavailable("formula rendering disabled".into()))
  }
}

fn check_braces(markup: &str) -> Result<(), RenderError> {
  let mut depth = 0i32;
  let mut escaped = false;
  for c in markup.chars() {
    if escaped {
      escaped = false;
      continue;
    }
    match c {
      '\\' => escaped = true,
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth < 0 {
          return Err(RenderError::UnbalancedBraces);
        }
      }
      _ => {}
    }
  }
  if depth == 0 { Ok(()) } else { Err(RenderError::UnbalancedBraces) }
}

pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// Rendered fragment, or the escaped raw markup when rendering fails.
pub fn render_or_plain(renderer: &dyn FormulaRenderer, markup: &str, display_mode: bool) -> String {
  match renderer.render(markup, display_mode) {
    Ok(html) => html,
    Err(e) => {
      warn!(target: "quiz", error = %e, markup_len = markup.len(), "Formula render failed; falling back to plain text");
      escape_html(markup)
    }
  }
}

/// Keypad input to LaTeX: a single `/` becomes a fraction, `^n` gets braces,
/// `*` becomes a times sign.
pub fn input_to_latex(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }
  let mut latex = input.to_string();
  if latex.contains('/') {
    let parts: Vec<&str> = latex.split('/').collect();
    latex = if parts.len() == 2 {
      format!("\\frac{{{}}}{{{}}}", parts[0], parts[1])
    } else {
      latex.replace('/', "\\div ")
    };
  }
  latex = brace_exponents(&latex);
  latex.replace('*', "\\times ")
}

fn exponent_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\^(-?[0-9]+|[a-zA-Z])").expect("exponent pattern is valid"))
}

/// `x^-3` → `x^{-3}`. An exponent is a signed integer or a single letter;
/// exponents already in braces are left alone.
fn brace_exponents(s: &str) -> String {
  exponent_regex().replace_all(s, "^{${1}}").into_owned()
}

/// Polynomial text as typed (`4x^2-12xy`) to LaTeX with braced exponents.
pub fn expression_to_latex(expr: &str) -> String {
  brace_exponents(&expr.replace('*', "\\times "))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  struct Failing(AtomicUsize);

  impl FormulaRenderer for Failing {
    fn render(&self, _markup: &str, _display_mode: bool) -> Result<String, RenderError> {
      self.0.fetch_add(1, Ordering::SeqCst);
      Err(RenderError::Unavailable("script failed to load".into()))
    }
  }

  #[test]
  fn failed_render_falls_back_to_plain_text() {
    let r = Failing(AtomicUsize::new(0));
    assert_eq!(render_or_plain(&r, "x<y", false), "x&lt;y");
    assert_eq!(r.0.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn katex_markup_validates_braces() {
    let r = KatexMarkup;
    assert_eq!(r.render("\\frac{1}{x", true), Err(RenderError::UnbalancedBraces));
    assert_eq!(r.render("  ", true), Err(RenderError::Empty));
    let html = r.render("x^{2}", false).unwrap();
    assert!(html.contains("math-inline"));
    assert!(html.contains("x^{2}"));
    assert_eq!(r.render("\\{x", false).map(|_| ()), Ok(()));
  }

  #[test]
  fn keypad_input_converts() {
    assert_eq!(input_to_latex("x^5/y^-2"), "\\frac{x^{5}}{y^{-2}}");
    assert_eq!(input_to_latex("a/b/c"), "a\\div b\\div c");
    assert_eq!(input_to_latex("2*x^3"), "2\\times x^{3}");
    assert_eq!(expression_to_latex("x^{2}+1"), "x^{2}+1");
    assert_eq!(expression_to_latex("4x^2-12xy+9y^2"), "4x^{2}-12xy+9y^{2}");
    assert_eq!(input_to_latex("a^n*b^-12"), "a^{n}\\times b^{-12}");
  }
}
