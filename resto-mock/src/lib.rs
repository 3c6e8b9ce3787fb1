//! In-memory mock of the restaurant backend
//!
//! Serves the same routes, envelopes and JSON quirks as the real API:
//! meta/result envelopes on most endpoints, status/data on food and
//! tables, ids that sometimes arrive as strings, and a bare
//! `{"message": "Unauthenticated."}` for missing tokens.

pub mod api;
pub mod error;
pub mod state;

pub use api::router;
pub use error::MockError;
pub use state::{DEFAULT_PER_PAGE, MockState, RecordedRequest};
