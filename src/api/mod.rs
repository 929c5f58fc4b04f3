//! HTTP API module for the Fair Share Calculator.
//!
//! This module provides the REST endpoints for computing shares, storing
//! and fetching share state, and restoring state from a page link.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{
    ApiError, ApiErrorResponse, RestoreResponse, ShareCreated, ShareErrorBody, ShareErrorResponse,
};
pub use state::AppState;
