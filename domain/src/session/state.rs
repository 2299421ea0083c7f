//! Session state and its transitions.
//!
//! ```text
//!            begin_analysis              complete_analysis
//!   Idle ───────────────────► Analyzing ───────────────────► HasResult
//!    ▲                            │                              │
//!    └──────── fail_analysis ─────┘      begin_analysis ◄────────┘
//!
//!   HasResult: begin_chat ─► (chat_pending) ─► complete_chat ─► HasResult
//! ```
//!
//! Chat is an orthogonal flag on top of `HasResult`: a pending reply never
//! hides the current result. Every transition is a plain `&mut self` method
//! with no I/O, so the state machine is testable without a gateway.

use super::demo::{DEMO_DATASET, DEMO_SCOPE};
use crate::analysis::ambition::AmbitionLevel;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::result::AnalysisResult;
use crate::chat::entities::ChatMessage;
use crate::chat::history::ChatHistory;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Where the analysis side of the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No result, nothing in flight
    Idle,
    /// Waiting for the generation service
    Analyzing,
    /// A result is available for reading and follow-up chat
    HasResult,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Analyzing => "analyzing",
            SessionPhase::HasResult => "has_result",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a chat message was not sent
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRejection {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Run an analysis before asking follow-up questions")]
    NoResult,

    #[error("Still waiting for the previous answer")]
    ReplyPending,
}

/// Everything a follow-up call needs, captured when the chat starts.
///
/// `history` is the transcript *before* the new question; the question
/// travels separately. `epoch` ties the reply to the analysis it was asked
/// about.
#[derive(Debug, Clone)]
pub struct PendingChat {
    pub question: String,
    pub dataset_text: String,
    pub scope_text: String,
    pub history: Vec<ChatMessage>,
    pub epoch: u64,
}

/// One interactive session (Entity)
///
/// Single owner; only the transition methods below mutate it.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    dataset_text: String,
    scope_text: String,
    ambition: AmbitionLevel,
    phase: SessionPhase,
    result: Option<AnalysisResult>,
    history: ChatHistory,
    chat_pending: bool,
    last_error: Option<String>,
    /// Bumped on every analysis start; stale chat replies are discarded
    #[serde(skip)]
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            dataset_text: String::new(),
            scope_text: String::new(),
            ambition: AmbitionLevel::default(),
            phase: SessionPhase::Idle,
            result: None,
            history: ChatHistory::new(),
            chat_pending: false,
            last_error: None,
            epoch: 0,
        }
    }

    // ==================== Accessors ====================

    pub fn dataset_text(&self) -> &str {
        &self.dataset_text
    }

    pub fn scope_text(&self) -> &str {
        &self.scope_text
    }

    pub fn ambition(&self) -> AmbitionLevel {
        self.ambition
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn is_analyzing(&self) -> bool {
        self.phase == SessionPhase::Analyzing
    }

    pub fn is_chat_pending(&self) -> bool {
        self.chat_pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ==================== Input editing ====================

    /// Replace the dataset text (e.g. after a file was read)
    pub fn set_dataset(&mut self, text: impl Into<String>) {
        self.dataset_text = text.into();
        self.last_error = None;
    }

    pub fn set_scope(&mut self, text: impl Into<String>) {
        self.scope_text = text.into();
    }

    pub fn set_ambition(&mut self, ambition: AmbitionLevel) {
        self.ambition = ambition;
    }

    /// Fill dataset and scope with the bundled demo inputs
    pub fn load_demo(&mut self) {
        self.dataset_text = DEMO_DATASET.to_string();
        self.scope_text = DEMO_SCOPE.to_string();
        self.last_error = None;
    }

    /// Record a session-level error without touching anything else
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ==================== Analysis transitions ====================

    /// `Idle | HasResult -> Analyzing`.
    ///
    /// Rejected while an analysis is already in flight. Invalid input is
    /// recorded as the session error and leaves the state untouched. On
    /// success the previous result, chat history and error are cleared
    /// right away, before any call is made.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, DomainError> {
        if self.is_analyzing() {
            return Err(DomainError::AnalysisInFlight);
        }

        let request =
            match AnalysisRequest::new(&*self.dataset_text, &*self.scope_text, self.ambition) {
                Ok(request) => request,
                Err(e) => {
                    self.last_error = Some(e.to_string());
                    return Err(e);
                }
            };

        self.phase = SessionPhase::Analyzing;
        self.result = None;
        self.history.clear();
        self.chat_pending = false;
        self.last_error = None;
        self.epoch += 1;

        Ok(request)
    }

    /// `Analyzing -> HasResult`. Returns `false` (and changes nothing) in
    /// any other phase.
    pub fn complete_analysis(&mut self, result: AnalysisResult) -> bool {
        if !self.is_analyzing() {
            return false;
        }
        self.phase = SessionPhase::HasResult;
        self.result = Some(result);
        true
    }

    /// `Analyzing -> Idle` with the error recorded; the result stays absent.
    pub fn fail_analysis(&mut self, message: impl Into<String>) -> bool {
        if !self.is_analyzing() {
            return false;
        }
        self.phase = SessionPhase::Idle;
        self.result = None;
        self.last_error = Some(message.into());
        true
    }

    // ==================== Chat transitions ====================

    /// Start a follow-up round trip.
    ///
    /// Appends the user message immediately and marks a reply as pending.
    /// A rejected question changes nothing.
    pub fn begin_chat(
        &mut self,
        question: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingChat, ChatRejection> {
        if question.trim().is_empty() {
            return Err(ChatRejection::EmptyQuestion);
        }
        if self.chat_pending {
            return Err(ChatRejection::ReplyPending);
        }
        if self.phase != SessionPhase::HasResult {
            return Err(ChatRejection::NoResult);
        }

        let pending = PendingChat {
            question: question.to_string(),
            dataset_text: self.dataset_text.clone(),
            scope_text: self.scope_text.clone(),
            history: self.history.messages().to_vec(),
            epoch: self.epoch,
        };

        self.history.push(ChatMessage::user(question, now));
        self.chat_pending = true;

        Ok(pending)
    }

    /// Finish a follow-up round trip by appending the assistant turn.
    ///
    /// Replies belonging to an earlier analysis are dropped and `false` is
    /// returned.
    pub fn complete_chat(&mut self, epoch: u64, reply: impl Into<String>, now: DateTime<Utc>) -> bool {
        if epoch != self.epoch || !self.chat_pending {
            return false;
        }
        self.history.push(ChatMessage::assistant(reply, now));
        self.chat_pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::{ChartDataPoint, ChartType};
    use crate::chat::entities::Role;
    use chrono::Duration;

    fn result(title: &str) -> AnalysisResult {
        AnalysisResult {
            title: title.to_string(),
            executive_summary: "summary".to_string(),
            operational_insights: vec![],
            tool_suggestions: vec![],
            chart_type: ChartType::Bar,
            chart_title: "chart".to_string(),
            chart_data: vec![ChartDataPoint::new("Jan", 100.0)],
            impact_score: Some(80.0),
        }
    }

    fn session_with_result() -> Session {
        let mut session = Session::new();
        session.set_dataset("Month,Sales\nJan,100");
        session.set_scope("sales reporting");
        session.begin_analysis().unwrap();
        assert!(session.complete_analysis(result("first")));
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.result().is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.ambition().value(), 50);
    }

    #[test]
    fn test_begin_analysis_rejects_empty_inputs() {
        let mut session = Session::new();
        session.set_scope("scope");
        assert_eq!(session.begin_analysis(), Err(DomainError::EmptyDataset));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.last_error(), Some(DomainError::EmptyDataset.to_string().as_str()));

        session.set_dataset("a,b");
        session.set_scope("  ");
        assert_eq!(session.begin_analysis(), Err(DomainError::EmptyScope));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_invalid_input_keeps_previous_result() {
        let mut session = session_with_result();
        session.set_scope("");
        assert!(session.begin_analysis().is_err());
        assert_eq!(session.phase(), SessionPhase::HasResult);
        assert_eq!(session.result().unwrap().title, "first");
    }

    #[test]
    fn test_begin_analysis_clears_result_and_history_immediately() {
        let mut session = session_with_result();
        let now = Utc::now();
        session.begin_chat("why?", now).unwrap();
        session.complete_chat(session.epoch, "because", now);
        assert_eq!(session.history().len(), 2);

        session.begin_analysis().unwrap();
        assert_eq!(session.phase(), SessionPhase::Analyzing);
        assert!(session.result().is_none());
        assert!(session.history().is_empty());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_reentrant_analysis_rejected() {
        let mut session = Session::new();
        session.load_demo();
        session.begin_analysis().unwrap();
        assert_eq!(session.begin_analysis(), Err(DomainError::AnalysisInFlight));
        assert_eq!(session.phase(), SessionPhase::Analyzing);
    }

    #[test]
    fn test_fail_analysis_returns_to_idle() {
        let mut session = Session::new();
        session.load_demo();
        session.begin_analysis().unwrap();
        assert!(session.fail_analysis("boom"));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.last_error(), Some("boom"));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_completion_outside_analyzing_is_ignored() {
        let mut session = Session::new();
        assert!(!session.complete_analysis(result("late")));
        assert!(!session.fail_analysis("late"));
        assert!(session.result().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_new_result_replaces_old() {
        let mut session = session_with_result();
        session.begin_analysis().unwrap();
        session.complete_analysis(result("second"));
        assert_eq!(session.result().unwrap().title, "second");
    }

    #[test]
    fn test_chat_round_trip_appends_in_order() {
        let mut session = session_with_result();
        let t0 = Utc::now();
        session.begin_chat("old1", t0).unwrap();
        session.complete_chat(session.epoch, "old2", t0);

        let pending = session.begin_chat("ลดต้นทุนยังไง", t0 + Duration::seconds(1)).unwrap();
        assert_eq!(pending.history.len(), 2);
        assert_eq!(session.history().len(), 3);
        assert!(session.is_chat_pending());

        assert!(session.complete_chat(pending.epoch, "ลองลด...", t0 + Duration::seconds(2)));
        let messages = session.history().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "ลดต้นทุนยังไง");
        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[3].content, "ลองลด...");
        assert!(!session.is_chat_pending());
        assert_eq!(session.phase(), SessionPhase::HasResult);
    }

    #[test]
    fn test_chat_rejections_are_noops() {
        let mut session = session_with_result();
        let now = Utc::now();

        assert_eq!(session.begin_chat("   ", now).unwrap_err(), ChatRejection::EmptyQuestion);
        assert!(session.history().is_empty());

        session.begin_chat("first", now).unwrap();
        assert_eq!(session.begin_chat("second", now).unwrap_err(), ChatRejection::ReplyPending);
        assert_eq!(session.history().len(), 1);

        let mut idle = Session::new();
        assert_eq!(idle.begin_chat("hello", now).unwrap_err(), ChatRejection::NoResult);
    }

    #[test]
    fn test_stale_chat_reply_is_dropped() {
        let mut session = session_with_result();
        let pending = session.begin_chat("question", Utc::now()).unwrap();

        session.begin_analysis().unwrap();
        assert!(!session.complete_chat(pending.epoch, "late answer", Utc::now()));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_set_dataset_clears_error_but_set_error_keeps_dataset() {
        let mut session = Session::new();
        session.set_dataset("a,b");
        session.set_error("could not read file");
        assert_eq!(session.dataset_text(), "a,b");
        session.set_dataset("c,d");
        assert!(session.last_error().is_none());
    }
}
