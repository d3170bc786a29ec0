use crate::edit::PolicyList;
use crate::session::SessionState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("project name is read-only")]
    NameReadOnly,

    #[error("policy cannot be edited while the session is {0}")]
    NotEditing(SessionState),

    #[error("orphaned resource monitoring is disabled")]
    OrphanedMonitoringDisabled,

    #[error("{entry} entry does not belong in {list}")]
    EntryMismatch { list: PolicyList, entry: &'static str },

    #[error("unknown policy list '{0}'")]
    UnknownList(String),

    #[error("submit failed: {0:#}")]
    Submit(anyhow::Error),
}
