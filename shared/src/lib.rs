//! Shared types for the Resto POS workspace
//!
//! Wire models mirrored from the backend, request DTOs, the response
//! envelope normalizer and a few serde helpers. Used by both the client
//! and the mock backend.

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{ApiEnvelope, ApiResponse, EnvelopeError, Meta, Paginated};
