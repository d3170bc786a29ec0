//! Project access-policy editing: pure validate/normalize/list operations,
//! entry defaults drawn from the listers, and the edit-session state machine.

pub mod catalog;
pub mod defaults;
pub mod edit;
pub mod error;
pub mod ops;
pub mod session;

pub use edit::{ListEntry, PolicyEdit, PolicyList};
pub use error::EditError;
pub use ops::{FieldErrors, append_entry, normalize, remove_entry_at, update_entry_at, validate};
pub use session::{EditSession, SessionState, SubmitOutcome, SubmitSink};
