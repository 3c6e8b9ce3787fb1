//! Transports
//!
//! [`HttpClient`] is the seam between the typed API and the wire. Two
//! implementations: [`NetworkHttpClient`] (reqwest) and
//! [`OneshotHttpClient`] (in-process axum Router).

pub mod http;
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
