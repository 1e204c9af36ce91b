//! Core of the LabelDesk manual data-labeling session manager.
//!
//! The crate is synchronous and free of I/O: presentation layers drive an
//! [`AnnotationEngine`] through plain method calls and render what the read
//! accessors return.
//!
//! ```
//! use labeldesk_core::{AnnotationEngine, LabelSchema, SampleSource};
//! use labeldesk_core::schema::Dimension;
//!
//! let source = SampleSource::new(["A", "B"]).unwrap();
//! let schema = LabelSchema::new(vec![Dimension::new("color", ["red", "blue"])]).unwrap();
//! let mut engine = AnnotationEngine::new(source, schema);
//!
//! engine.select_label("color", "red").unwrap();
//! let submission = engine.submit().unwrap();
//! assert_eq!(submission.annotation.item_id, 1);
//!
//! engine.complete_advance(submission.ticket);
//! assert_eq!(engine.current_item().text, "B");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod sample;
pub mod schema;
pub mod session;
pub mod stats;

// Re-export common types
pub use config::SessionConfig;
pub use error::{LabelDeskError, Result};
pub use export::ExportFormat;
pub use sample::SampleSource;
pub use schema::LabelSchema;
pub use session::AnnotationEngine;
