//! SessionStateMachine - the single source of truth for one analyst session.
//!
//! Owns the submitted record, the prediction and the re-entrancy guard.
//! Transitions that leave the analyzed state also wipe the session-scoped
//! cache families.

use crate::domain::cache::CacheStore;
use crate::domain::client::ClientRecord;
use crate::domain::foundation::{StateMachine, Timestamp};
use crate::domain::prediction::PredictionResult;

use super::{SessionError, SessionPhase};

/// Analyst session state.
///
/// # Invariants
///
/// - `submission_guard` is true exactly while in `Submitting`
/// - `client_record`, `prediction` and `analyzed_at` are all set in
///   `Analyzed` and all unset otherwise
/// - The draft (form values) survives failed submissions
#[derive(Debug, Clone, Default)]
pub struct SessionStateMachine {
    phase: SessionPhase,
    draft: Option<ClientRecord>,
    client_record: Option<ClientRecord>,
    prediction: Option<PredictionResult>,
    submission_guard: bool,
    analyzed_at: Option<Timestamp>,
    last_error: Option<String>,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether a prediction request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submission_guard
    }

    pub fn client_record(&self) -> Option<&ClientRecord> {
        self.client_record.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn analyzed_at(&self) -> Option<Timestamp> {
        self.analyzed_at
    }

    /// Values last entered in the form, if any.
    pub fn draft(&self) -> Option<&ClientRecord> {
        self.draft.as_ref()
    }

    /// Values to pre-fill the form with: the draft, or the form defaults.
    pub fn form_values(&self) -> ClientRecord {
        self.draft.clone().unwrap_or_default()
    }

    /// Message of the last failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the analyzed record and prediction.
    ///
    /// # Errors
    ///
    /// - `NotAnalyzed` outside the `Analyzed` phase
    pub fn analysis(&self) -> Result<(&ClientRecord, &PredictionResult), SessionError> {
        match (&self.client_record, &self.prediction) {
            (Some(record), Some(prediction)) => Ok((record, prediction)),
            _ => Err(SessionError::NotAnalyzed),
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────

    /// Idle -> Submitting. Engages the guard before any external call.
    ///
    /// # Errors
    ///
    /// - `SubmissionInProgress` if the guard is already engaged
    /// - `InvalidTransition` if not idle
    /// - `Validation` if the record is outside the form bounds; the guard
    ///   stays released
    pub fn begin_submission(&mut self, record: ClientRecord) -> Result<(), SessionError> {
        if self.submission_guard {
            tracing::warn!("Rejected submission while another is in flight");
            return Err(SessionError::SubmissionInProgress);
        }
        self.ensure_can_transition(SessionPhase::Submitting)?;
        record.validate()?;

        self.submission_guard = true;
        self.phase = SessionPhase::Submitting;
        self.draft = Some(record);
        self.last_error = None;
        Ok(())
    }

    /// Submitting -> Analyzed on a successful prediction.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if no submission is in flight
    pub fn complete_submission(&mut self, prediction: PredictionResult) -> Result<(), SessionError> {
        self.ensure_can_transition(SessionPhase::Analyzed)?;
        let record = self
            .draft
            .clone()
            .ok_or_else(|| SessionError::invalid_transition(self.phase, SessionPhase::Analyzed))?;

        self.client_record = Some(record);
        self.prediction = Some(prediction);
        self.analyzed_at = Some(Timestamp::now());
        self.submission_guard = false;
        self.phase = SessionPhase::Analyzed;
        Ok(())
    }

    /// Submitting -> Idle on any collaborator failure. The draft is kept.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if no submission is in flight
    pub fn fail_submission(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::invalid_transition(self.phase, SessionPhase::Idle));
        }

        self.submission_guard = false;
        self.phase = SessionPhase::Idle;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Analyzed -> Idle keeping the record as the form draft.
    ///
    /// Returns the number of cache entries invalidated.
    ///
    /// # Errors
    ///
    /// - `NotAnalyzed` outside the `Analyzed` phase
    pub fn modify<T>(&mut self, cache: &mut CacheStore<T>) -> Result<usize, SessionError> {
        if self.phase != SessionPhase::Analyzed {
            return Err(SessionError::NotAnalyzed);
        }

        self.draft = self.client_record.take();
        Ok(self.reset_analysis(cache))
    }

    /// Returns to an empty form from Idle or Analyzed.
    ///
    /// Returns the number of cache entries invalidated.
    ///
    /// # Errors
    ///
    /// - `SubmissionInProgress` while a request is in flight
    pub fn new_client<T>(&mut self, cache: &mut CacheStore<T>) -> Result<usize, SessionError> {
        if self.submission_guard {
            return Err(SessionError::SubmissionInProgress);
        }

        self.draft = None;
        self.last_error = None;
        Ok(self.reset_analysis(cache))
    }

    fn reset_analysis<T>(&mut self, cache: &mut CacheStore<T>) -> usize {
        self.client_record = None;
        self.prediction = None;
        self.analyzed_at = None;
        self.phase = SessionPhase::Idle;
        cache.invalidate_session_scopes()
    }

    fn ensure_can_transition(&self, target: SessionPhase) -> Result<(), SessionError> {
        if self.phase.can_transition_to(&target) {
            Ok(())
        } else {
            Err(SessionError::invalid_transition(self.phase, target))
        }
    }
}
