//! HTTP API module for the Member Import Engine.
//!
//! This module provides the REST endpoints for validating and executing
//! DONMAN imports and for exporting members as CSV.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
