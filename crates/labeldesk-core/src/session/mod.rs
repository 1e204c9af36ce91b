//! Session domain module.
//!
//! This module contains the labeling session state and the engine that
//! drives it.
//!
//! # Module Structure
//!
//! - `model`: Drafts, annotations and status types (`LabelSet`, `Annotation`, ...)
//! - `activity`: Bounded, newest-first activity history (`ActivityLog`)
//! - `clock`: Injectable time source (`Clock`, `SystemClock`)
//! - `engine`: Command interface over a single session (`AnnotationEngine`)
//!
//! # Usage
//!
//! ```ignore
//! use labeldesk_core::session::{AnnotationEngine, Annotation, LabelSet};
//! use labeldesk_core::session::{ActivityAction, ActivityLog};
//! ```

mod activity;
mod clock;
mod engine;
mod model;


// Re-export public API
pub use activity::{ActivityAction, ActivityEntry, ActivityLog, DEFAULT_ACTIVITY_CAPACITY};
pub use clock::{Clock, SystemClock, elapsed_seconds};
pub use engine::AnnotationEngine;
pub use model::{
    AdvanceTicket, Annotation, CurrentItem, EngineState, ItemStatus, LabelSet, Labels, Submission,
};
pub(crate) use model::iso_millis;
