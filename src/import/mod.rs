//! Import orchestration.
//!
//! Two flows share the row-parsing and duplicate-resolution logic: validate
//! (parse everything, report, persist nothing) and execute (re-validate from
//! scratch, then persist accepted rows in batches while yielding progress
//! events as a stream the transport layer drains).

mod duplicates;
mod events;
mod orchestrator;
mod report;

pub use duplicates::{DuplicateChecker, DuplicateKind};
pub use events::ImportEvent;
pub use orchestrator::{execute, validate};
pub use report::ValidationReport;
