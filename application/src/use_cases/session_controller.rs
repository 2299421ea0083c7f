//! Session Controller
//!
//! Owns the single [`Session`] and drives it through the analysis and chat
//! use cases. The presentation layer calls in here and renders snapshots;
//! it never mutates session state itself.
//!
//! State lives in a [`watch`] channel. Every transition is applied with
//! `send_modify`/`send_if_modified`, so a check and the transition it guards
//! happen atomically and no borrow is held across an `.await`.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::dataset_reader::{DatasetReadError, DatasetReader};
use crate::ports::generation_gateway::GenerationGateway;
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::use_cases::ask_follow_up::{
    AskFollowUpUseCase, FOLLOW_UP_ERROR_FALLBACK, FollowUpInput,
};
use crate::use_cases::run_analysis::{RunAnalysisError, RunAnalysisUseCase};
use chrono::Utc;
use scopelens_domain::{AmbitionLevel, AnalysisResult, ChatRejection, DomainError, Session};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Controller for one interactive session
pub struct SessionController {
    state: watch::Sender<Session>,
    analysis: RunAnalysisUseCase,
    follow_up: AskFollowUpUseCase,
    dataset_reader: Arc<dyn DatasetReader>,
    gateway: Arc<dyn GenerationGateway>,
    params: AnalysisParams,
    progress: Arc<dyn AnalysisProgressNotifier>,
}

impl SessionController {
    pub fn new(
        gateway: Arc<dyn GenerationGateway>,
        dataset_reader: Arc<dyn DatasetReader>,
        params: AnalysisParams,
    ) -> Self {
        let (state, _) = watch::channel(Session::new());
        Self {
            state,
            analysis: RunAnalysisUseCase::new(gateway.clone()),
            follow_up: AskFollowUpUseCase::new(gateway.clone()),
            dataset_reader,
            gateway,
            params,
            progress: Arc::new(NoProgress),
        }
    }

    /// Route analysis and follow-up events to a conversation log.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.analysis = self.analysis.with_conversation_logger(logger.clone());
        self.follow_up = self.follow_up.with_conversation_logger(logger);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn AnalysisProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    // ==================== Observation ====================

    /// Copy of the current session state
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Whether a service credential was found at startup
    pub fn has_credential(&self) -> bool {
        self.gateway.has_credential()
    }

    // ==================== Input editing ====================

    pub fn set_scope(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|session| session.set_scope(text));
    }

    pub fn set_dataset_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|session| session.set_dataset(text));
    }

    pub fn set_ambition(&self, ambition: AmbitionLevel) {
        self.state.send_if_modified(|session| {
            let changed = session.ambition() != ambition;
            session.set_ambition(ambition);
            changed
        });
    }

    pub fn load_demo(&self) {
        self.state.send_modify(Session::load_demo);
    }

    /// Replace the dataset with the contents of a local file.
    ///
    /// A read failure is recorded as the session error; the current dataset
    /// text is kept.
    pub async fn load_dataset(&self, path: &Path) -> Result<usize, DatasetReadError> {
        match self.dataset_reader.read_dataset(path).await {
            Ok(text) => {
                let bytes = text.len();
                info!("Loaded dataset from {} ({} bytes)", path.display(), bytes);
                self.state.send_modify(|session| session.set_dataset(text));
                Ok(bytes)
            }
            Err(e) => {
                warn!("{}", e);
                let message = e.to_string();
                self.state.send_modify(|session| session.set_error(message));
                Err(e)
            }
        }
    }

    // ==================== Analysis ====================

    /// Run one analysis with the current dataset, scope and ambition.
    ///
    /// Rejected with [`DomainError::AnalysisInFlight`] while another
    /// analysis is outstanding; that rejection leaves the session untouched.
    pub async fn analyze(&self) -> Result<AnalysisResult, RunAnalysisError> {
        let mut begun = Err(DomainError::AnalysisInFlight);
        self.state.send_if_modified(|session| {
            begun = session.begin_analysis();
            !matches!(begun, Err(DomainError::AnalysisInFlight))
        });
        let request = begun.inspect_err(|e| debug!("Analysis not started: {}", e))?;

        let outcome = self
            .analysis
            .execute_with_progress(&request, &self.params, self.progress.as_ref())
            .await;

        match outcome {
            Ok(result) => {
                let stored = result.clone();
                self.state
                    .send_if_modified(|session| session.complete_analysis(stored));
                Ok(result)
            }
            Err(e) => {
                let message = e.user_message();
                self.state
                    .send_if_modified(|session| session.fail_analysis(message));
                Err(e)
            }
        }
    }

    // ==================== Chat ====================

    /// Ask a follow-up question about the current result.
    ///
    /// The question is appended to the history before the call is made.
    /// Every accepted question gets exactly one assistant reply: the answer,
    /// the empty-answer apology, or the error apology when the call fails.
    pub async fn ask(&self, question: &str) -> Result<String, ChatRejection> {
        let mut begun = Err(ChatRejection::NoResult);
        self.state.send_if_modified(|session| {
            begun = session.begin_chat(question, Utc::now());
            begun.is_ok()
        });
        let pending = begun?;

        self.progress.on_follow_up_start();
        let outcome = self
            .follow_up
            .execute(
                FollowUpInput {
                    question: &pending.question,
                    dataset_text: &pending.dataset_text,
                    scope_text: &pending.scope_text,
                    history: &pending.history,
                },
                &self.params,
            )
            .await;
        self.progress.on_follow_up_complete();

        let reply = outcome.unwrap_or_else(|e| {
            warn!("Follow-up failed, replying with apology: {}", e);
            FOLLOW_UP_ERROR_FALLBACK.to_string()
        });

        let stored = reply.clone();
        let accepted = self
            .state
            .send_if_modified(|session| session.complete_chat(pending.epoch, stored, Utc::now()));
        if !accepted {
            debug!("Dropped follow-up reply for a superseded analysis");
        }

        Ok(reply)
    }
}
