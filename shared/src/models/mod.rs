//! Data models
//!
//! Mirrors of the backend's JSON shapes. The server is the source of truth;
//! the client only ever holds copies of what it last fetched.
//! All IDs are `i64`.

pub mod dining_table;
pub mod floor;
pub mod food;
pub mod order;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use floor::*;
pub use food::*;
pub use order::*;
pub use user::*;
