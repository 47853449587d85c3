// HTTP API routes
//
// Each submodule handles one resource with its own state.

pub mod accounts;
pub mod common;
pub mod index;
pub mod metadata;

// Re-export common types
pub use common::{ApiError, ErrorResponse};
