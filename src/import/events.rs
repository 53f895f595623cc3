//! Execute-mode progress events.

use serde::Serialize;

use crate::models::SkippedRow;

/// One discrete event in the execute-mode stream.
///
/// The orchestrator yields these as a plain stream of records; the transport
/// layer owns the `event:`/`data:` framing. A stream carries zero or more
/// `Progress` events with strictly increasing `processed`, and exactly one
/// terminal event: `Complete` on success or `Error` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportEvent {
    /// Terminal failure: validation refused the file, or storage failed.
    Error {
        /// What went wrong.
        message: String,
    },
    /// One batch has been persisted.
    Progress {
        /// Cumulative rows persisted so far.
        processed: usize,
        /// Total rows accepted for persistence.
        total: usize,
    },
    /// Terminal success.
    Complete {
        /// The number of rows persisted.
        imported: usize,
        /// Rows skipped as duplicates.
        skipped: Vec<SkippedRow>,
    },
}

impl ImportEvent {
    /// The wire name of this event type.
    pub fn name(&self) -> &'static str {
        match self {
            ImportEvent::Error { .. } => "error",
            ImportEvent::Progress { .. } => "progress",
            ImportEvent::Complete { .. } => "complete",
        }
    }

    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImportEvent::Progress { .. })
    }
}
