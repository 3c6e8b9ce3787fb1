//! Resto Client - restaurant POS client
//!
//! Typed access to the restaurant REST API plus the state behind each
//! screen of the front desk:
//!
//! - [`TableBrowser`]: floors, tables, the customer dialog
//! - [`OrderWorkflow`]: order creation and item entry
//! - [`FoodCatalog`]: paginated food CRUD
//! - [`OrderList`]: paginated orders, status edits, deletes
//!
//! Every operation returns a [`ClientResult`]; nothing fails silently.

pub mod api;
pub mod audit;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod floor;
pub mod menu;
pub mod orders;
pub mod pagination;
pub mod route;
pub mod session;
pub mod workflow;

pub use api::RestoApi;
pub use catalog::{FoodCatalog, FoodForm, FormMode};
pub use client::{HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use floor::{CustomerDialog, QuickStats, TableBrowser};
pub use menu::MenuFilter;
pub use orders::{OrderList, StatusDialog};
pub use pagination::PageState;
pub use route::Route;
pub use session::{Session, SessionData, SessionStore};
pub use workflow::{OrderPhase, OrderWorkflow};

// Re-export shared types for convenience
pub use shared::models;
