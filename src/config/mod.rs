//! Import configuration.
//!
//! The DONMAN export's column layout and the engine's operational thresholds
//! are configuration with compiled-in defaults, so a changed export format
//! can be accommodated without a rebuild.

mod loader;
mod types;

pub use types::{ColumnLayout, ImportConfig};
