use crate::defaults::EntryDefaults;
use crate::edit::{PolicyEdit, apply_edit};
use crate::error::EditError;
use crate::ops::{FieldErrors, normalize, validate};
use async_trait::async_trait;
use pkg_types::project::ProjectAccessPolicy;
use std::fmt;
use tracing::{debug, info, warn};

/// Persists a submitted policy. Failure semantics belong to the sink.
#[async_trait]
pub trait SubmitSink: Send + Sync {
    async fn submit(&self, policy: ProjectAccessPolicy) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Submitting,
    Success,
    Failed,
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Editing => write!(f, "Editing"),
            SessionState::Submitting => write!(f, "Submitting"),
            SessionState::Success => write!(f, "Success"),
            SessionState::Failed => write!(f, "Failed"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The sink accepted the normalized policy.
    Submitted(ProjectAccessPolicy),
    /// Validation failed; the sink was not called.
    Invalid(FieldErrors),
}

/// One editing session over a project's access policy.
///
/// Every edit replaces the held policy with a freshly computed value. While a
/// submit is in flight the session is mutably borrowed, so no edit can race
/// with normalization.
#[derive(Debug)]
pub struct EditSession {
    policy: ProjectAccessPolicy,
    defaults: EntryDefaults,
    state: SessionState,
    name_readonly: bool,
    last_error: Option<String>,
}

impl EditSession {
    pub fn new(policy: ProjectAccessPolicy, defaults: EntryDefaults) -> Self {
        Self {
            policy,
            defaults,
            state: SessionState::Editing,
            name_readonly: false,
            last_error: None,
        }
    }

    /// Session over an existing project; its name cannot be changed.
    pub fn for_existing(policy: ProjectAccessPolicy, defaults: EntryDefaults) -> Self {
        Self {
            name_readonly: true,
            ..Self::new(policy, defaults)
        }
    }

    pub fn policy(&self) -> &ProjectAccessPolicy {
        &self.policy
    }

    pub fn into_policy(self) -> ProjectAccessPolicy {
        self.policy
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn defaults(&self) -> &EntryDefaults {
        &self.defaults
    }

    pub fn is_name_readonly(&self) -> bool {
        self.name_readonly
    }

    /// Error message of the last failed submit, cleared by the next edit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.policy)
    }

    /// Apply one user action. A rejected edit leaves the policy unchanged.
    pub fn apply(&mut self, edit: PolicyEdit) -> Result<(), EditError> {
        self.ensure_editable()?;
        if self.name_readonly && matches!(edit, PolicyEdit::SetName(_)) {
            return Err(EditError::NameReadOnly);
        }
        debug!("Applying edit to project '{}': {:?}", self.policy.name, edit);

        self.policy = apply_edit(&self.policy, edit, &self.defaults)?;
        self.state = SessionState::Editing;
        self.last_error = None;
        Ok(())
    }

    /// Validate, normalize and hand the policy to `sink`.
    ///
    /// On sink failure the session moves to `Failed` with the policy exactly
    /// as it was before the attempt; the caller may edit and resubmit.
    ///
    /// Dropping the returned future before the sink answers puts the session
    /// back into `Editing`. Whether the sink applied the policy is then
    /// unknown to the session.
    pub async fn submit(&mut self, sink: &dyn SubmitSink) -> Result<SubmitOutcome, EditError> {
        self.ensure_editable()?;

        let errors = self.validate();
        if !errors.is_empty() {
            warn!("Project submit blocked: {} field error(s)", errors.len());
            self.state = SessionState::Editing;
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let guard = SubmitGuard::enter(&mut self.state);
        let normalized = normalize(self.policy.clone());
        info!("Submitting project '{}'", normalized.name);

        match sink.submit(normalized.clone()).await {
            Ok(()) => {
                info!("Project '{}' submitted", normalized.name);
                guard.finish(SessionState::Success);
                self.policy = normalized.clone();
                self.last_error = None;
                Ok(SubmitOutcome::Submitted(normalized))
            }
            Err(e) => {
                warn!("Project '{}' submit failed: {:#}", normalized.name, e);
                guard.finish(SessionState::Failed);
                self.last_error = Some(format!("{:#}", e));
                Err(EditError::Submit(e))
            }
        }
    }

    /// Abandon the session, returning the discarded policy.
    pub fn cancel(&mut self) -> Result<ProjectAccessPolicy, EditError> {
        self.ensure_editable()?;
        info!("Edit of project '{}' cancelled", self.policy.name);
        self.state = SessionState::Cancelled;
        Ok(self.policy.clone())
    }

    fn ensure_editable(&self) -> Result<(), EditError> {
        match self.state {
            SessionState::Editing | SessionState::Failed => Ok(()),
            other => Err(EditError::NotEditing(other)),
        }
    }
}

/// Holds the session in `Submitting` for the duration of a sink call.
struct SubmitGuard<'a> {
    state: &'a mut SessionState,
}

impl<'a> SubmitGuard<'a> {
    fn enter(state: &'a mut SessionState) -> Self {
        *state = SessionState::Submitting;
        Self { state }
    }

    fn finish(self, outcome: SessionState) {
        *self.state = outcome;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if *self.state == SessionState::Submitting {
            warn!("Submit abandoned before the sink answered; back to editing");
            *self.state = SessionState::Editing;
        }
    }
}
