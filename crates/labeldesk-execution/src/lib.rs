//! Async execution layer for LabelDesk sessions.
//!
//! Wraps an [`AnnotationEngine`](labeldesk_core::AnnotationEngine) so that
//! presentation layers can issue commands from async contexts while the
//! post-submit advancement runs as a cancellable deferred task.

mod driver;
mod snapshot;

pub use driver::SessionDriver;
pub use snapshot::{DraftSelection, SessionSnapshot};
