//! Audit logging
//!
//! Mutations (orders, items, food) are recorded on the `audit` target so a
//! subscriber can route them to their own file.

/// Record a business operation on the `audit` target.
///
/// # Examples
/// ```ignore
/// resto_client::audit_log!("create", "order:10");
/// resto_client::audit_log!("add_item", "order:10", "food:3");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = %$resource,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = %$resource,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
