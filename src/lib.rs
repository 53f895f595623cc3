//! Member Import Engine for legacy DONMAN club exports
//!
//! This crate ingests the delimited-text member export produced by the legacy
//! DONMAN system, validates it row by row with full error accumulation, and
//! either reports the outcome (validate mode) or persists the parsed members,
//! memberships and their links in batches with streamed progress (execute
//! mode). It also renders persisted members back to a DONMAN-style CSV.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod parsing;
pub mod store;
