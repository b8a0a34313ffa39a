//! Application state: the in-memory session store, quiz settings, the
//! word-problem bank and the formula renderer.
//!
//! This module owns:
//!   - sessions by id (in memory, bounded by `max_sessions`)
//!   - generator settings and feedback messages (from TOML or defaults)
//!   - the simultaneous-equation bank (built-in + config extras)
//!   - the injected formula renderer
//!
//! Question generation happens here so a session's history is updated
//! under the same write lock that stores the new state.

use std::{collections::HashMap, sync::Arc};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::{load_quiz_config_from_env, Messages, QuizConfig, QuizSettings};
use crate::domain::Widget;
use crate::error::QuizError;
use crate::quiz::{self, simultaneous::BankQuestion, History, QuizContext};
use crate::render::{Disabled, FormulaRenderer, KatexMarkup};
use crate::seeds::simultaneous_bank;
use crate::session::{Action, Session};

#[derive(Clone, Debug)]
struct Stored {
    session: Session,
    last_seen: u64,
}

/// Sessions by id with a use counter. Once `capacity` is reached, inserting
/// a new id evicts the session whose last create/apply/advance is oldest.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<String, Stored>,
    tick: u64,
}

impl SessionStore {
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.entries.get(id).map(|e| &e.session)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `session` as most recently used; returns the evicted id, if any.
    pub fn put(&mut self, session: Session, capacity: usize) -> Option<String> {
        self.tick += 1;
        let mut evicted = None;
        if !self.entries.contains_key(&session.id) && self.entries.len() >= capacity.max(1) {
            evicted = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| id.clone());
            if let Some(id) = &evicted {
                self.entries.remove(id);
            }
        }
        self.entries.insert(session.id.clone(), Stored { session, last_seen: self.tick });
        evicted
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionStore>>,
    pub settings: QuizSettings,
    pub messages: Messages,
    pub bank: Arc<Vec<BankQuestion>>,
    pub renderer: Arc<dyn FormulaRenderer>,
}

impl AppState {
    /// Build state from env: load config, merge the bank, pick a renderer.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_quiz_config_from_env().unwrap_or_default())
    }

    pub fn from_config(cfg: QuizConfig) -> Self {
        let mut bank = simultaneous_bank();
        let builtin = bank.len();
        for item in cfg.simultaneous {
            if let Some(defect) = item.defect() {
                error!(target: "quiz", title = %item.title, %defect, "Skipping bank item");
                continue;
            }
            bank.push(item);
        }
        info!(target: "quiz", builtin, extra = bank.len() - builtin, "Startup word-problem inventory");

        let renderer: Arc<dyn FormulaRenderer> = if cfg.render.enabled {
            Arc::new(KatexMarkup)
        } else {
            info!(target: "mathquiz_backend", "Formula rendering disabled; formulas are sent as plain text.");
            Arc::new(Disabled)
        };

        Self {
            sessions: Arc::new(RwLock::new(SessionStore::default())),
            settings: cfg.quiz,
            messages: cfg.messages,
            bank: Arc::new(bank),
            renderer,
        }
    }

    fn context(&self) -> QuizContext<'_> {
        QuizContext { settings: &self.settings, bank: &self.bank }
    }

    /// Start a fresh session on the first question of `widget` at `level`.
    #[instrument(level = "info", skip(self), fields(%widget, level))]
    pub async fn create_session(&self, widget: Widget, level: u8) -> Result<Session, QuizError> {
        let mut history = History::default();
        let mut rng = StdRng::from_entropy();
        let question = quiz::generate(widget, level, &mut rng, &self.context(), &mut history)?;
        let session = Session::new(Uuid::new_v4().to_string(), question, history);
        let evicted = self.sessions.write().await.put(session.clone(), self.settings.max_sessions);
        if let Some(old) = evicted {
            info!(target: "quiz", id = %old, max = self.settings.max_sessions, "Session store full; evicted least recently used");
        }
        info!(target: "quiz", id = %session.id, %widget, level, "Session created");
        Ok(session)
    }

    /// Read-only access to a session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Result<Session, QuizError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| QuizError::UnknownSession(id.to_string()))
    }

    /// Run one reducer step and store the result. A rejected action leaves
    /// the stored session as it was.
    #[instrument(level = "debug", skip(self, action), fields(%id))]
    pub async fn apply(&self, id: &str, action: Action) -> Result<Session, QuizError> {
        let mut sessions = self.sessions.write().await;
        let current = sessions
            .get(id)
            .ok_or_else(|| QuizError::UnknownSession(id.to_string()))?;
        let next = current.apply(action, &self.messages)?;
        sessions.put(next.clone(), self.settings.max_sessions);
        Ok(next)
    }

    /// Generate the next question (optionally at another level) and advance.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn advance(&self, id: &str, level: Option<u8>) -> Result<Session, QuizError> {
        let mut sessions = self.sessions.write().await;
        let current = sessions
            .get(id)
            .ok_or_else(|| QuizError::UnknownSession(id.to_string()))?;
        let level = level.unwrap_or(current.level);
        let mut history = current.history.clone();
        let mut rng = StdRng::from_entropy();
        let question = quiz::generate(current.widget, level, &mut rng, &self.context(), &mut history)?;
        let mut next = current.apply(Action::Advance(question), &self.messages)?;
        next.history = history;
        sessions.put(next.clone(), self.settings.max_sessions);
        Ok(next)
    }
}
