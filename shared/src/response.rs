//! API Response types
//!
//! The backend wraps payloads in two different envelopes depending on the
//! endpoint:
//!
//! ```json
//! { "meta": { "code": 200, "status": "success", "message": "..." }, "result": { ... } }
//! { "status": "success", "message": "...", "data": { ... } }
//! ```
//!
//! [`ApiEnvelope`] decodes either shape, and [`ApiEnvelope::normalize`] folds
//! both into a single [`ApiResponse`] so nothing past the API boundary cares
//! which convention an endpoint uses.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// `meta` block of the meta/result envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// `{ meta, result }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaEnvelope<T> {
    pub meta: Meta,
    #[serde(default = "none")]
    pub result: Option<T>,
}

/// `{ status, message, data }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEnvelope<T> {
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

/// Raw response envelope, in whichever convention the endpoint uses
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Meta(MetaEnvelope<T>),
    Status(StatusEnvelope<T>),
}

// Dispatch on the presence of `meta` instead of `#[serde(untagged)]`, so a
// payload that fails to decode reports the real field error rather than
// "did not match any variant".
impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiEnvelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(de::Error::custom("response envelope must be a JSON object"));
        }
        if value.get("meta").is_some() {
            MetaEnvelope::deserialize(value)
                .map(ApiEnvelope::Meta)
                .map_err(de::Error::custom)
        } else {
            StatusEnvelope::deserialize(value)
                .map(ApiEnvelope::Status)
                .map_err(de::Error::custom)
        }
    }
}

fn is_failure_status(status: &str) -> bool {
    matches!(
        status.to_ascii_lowercase().as_str(),
        "error" | "fail" | "failed"
    )
}

impl<T> ApiEnvelope<T> {
    /// `{meta: {code: 200, status: "success"}, result: data}`
    pub fn meta_ok(data: T, message: impl Into<String>) -> Self {
        ApiEnvelope::Meta(MetaEnvelope {
            meta: Meta {
                code: 200,
                status: "success".to_string(),
                message: message.into(),
            },
            result: Some(data),
        })
    }

    /// `{meta: {code, status: "error", message}, result: null}`
    pub fn meta_error(code: u16, message: impl Into<String>) -> Self {
        ApiEnvelope::Meta(MetaEnvelope {
            meta: Meta {
                code,
                status: "error".to_string(),
                message: message.into(),
            },
            result: None,
        })
    }

    /// `{status: "success", message, data}`
    pub fn status_ok(data: T, message: impl Into<String>) -> Self {
        ApiEnvelope::Status(StatusEnvelope {
            status: Some("success".to_string()),
            message: Some(message.into()),
            data: Some(data),
        })
    }

    /// Human-readable message carried by the envelope, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiEnvelope::Meta(env) if !env.meta.message.is_empty() => Some(&env.meta.message),
            ApiEnvelope::Meta(_) => None,
            ApiEnvelope::Status(env) => env.message.as_deref(),
        }
    }

    /// Fold either envelope convention into one response type.
    pub fn normalize(self) -> ApiResponse<T> {
        match self {
            ApiEnvelope::Meta(env) => {
                let failed = env.meta.code >= 400 || is_failure_status(&env.meta.status);
                if failed {
                    ApiResponse::Failure {
                        code: Some(env.meta.code),
                        message: env.meta.message,
                    }
                } else {
                    ApiResponse::Success {
                        message: Some(env.meta.message).filter(|m| !m.is_empty()),
                        data: env.result,
                    }
                }
            }
            ApiEnvelope::Status(env) => {
                if env.status.as_deref().is_some_and(is_failure_status) {
                    ApiResponse::Failure {
                        code: None,
                        message: env.message.unwrap_or_else(|| "Request failed".to_string()),
                    }
                } else {
                    ApiResponse::Success {
                        message: env.message,
                        data: env.data,
                    }
                }
            }
        }
    }
}

/// Envelope-level failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The server answered with a failure envelope
    #[error("{message}")]
    Failure { code: Option<u16>, message: String },

    /// A success envelope without the payload the caller expected
    #[error("response carried no data")]
    MissingData,
}

/// Normalized API response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        message: Option<String>,
        data: Option<T>,
    },
    Failure {
        code: Option<u16>,
        message: String,
    },
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    /// Payload of a success response; a missing payload is an error.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        self.into_optional()?.ok_or(EnvelopeError::MissingData)
    }

    /// Payload of a success response, if there is one (e.g. deletes).
    pub fn into_optional(self) -> Result<Option<T>, EnvelopeError> {
        match self {
            ApiResponse::Success { data, .. } => Ok(data),
            ApiResponse::Failure { code, message } => Err(EnvelopeError::Failure { code, message }),
        }
    }
}

/// Laravel-style paginator, found inside `data`/`result` of list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "first_page")]
    pub current_page: u32,
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    /// Everything on one page.
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            current_page: 1,
            data: items,
            last_page: 1,
            per_page: None,
            total: Some(total),
        }
    }
}

impl<T: Clone> Paginated<T> {
    /// Cut page `page` (1-based) of `per_page` rows out of `items`.
    ///
    /// `last_page` is never below 1, so an empty collection still reports a
    /// single (empty) page. Pages past the end come back empty.
    pub fn slice(items: &[T], page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total = items.len() as u64;
        let last_page = (total.div_ceil(per_page as u64) as u32).max(1);
        let start = ((page - 1) as usize).saturating_mul(per_page as usize);
        let data = items
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        Self {
            current_page: page,
            data,
            last_page,
            per_page: Some(per_page),
            total: Some(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn test_both_envelopes_normalize_to_the_same_response() {
        let meta: ApiEnvelope<Row> = serde_json::from_value(json!({
            "meta": {"code": 200, "status": "success", "message": "Order fetched"},
            "result": {"id": 10}
        }))
        .unwrap();
        let status: ApiEnvelope<Row> = serde_json::from_value(json!({
            "status": "success",
            "message": "Order fetched",
            "data": {"id": 10}
        }))
        .unwrap();

        assert_eq!(meta.normalize(), status.normalize());
    }

    #[test]
    fn test_status_envelope_without_status_field() {
        // GET /floor only sends `data`
        let env: ApiEnvelope<Paginated<Row>> =
            serde_json::from_value(json!({"data": {"data": [{"id": 1}, {"id": 2}]}})).unwrap();
        let page = env.normalize().into_data().unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn test_failure_envelopes() {
        let env: ApiEnvelope<Row> = serde_json::from_value(json!({
            "meta": {"code": 422, "status": "error", "message": "The customer name field is required."},
            "result": null
        }))
        .unwrap();
        assert_eq!(
            env.normalize().into_data(),
            Err(EnvelopeError::Failure {
                code: Some(422),
                message: "The customer name field is required.".to_string()
            })
        );

        let env: ApiEnvelope<Row> =
            serde_json::from_value(json!({"status": "error", "message": "boom"})).unwrap();
        assert!(!env.normalize().is_success());
    }

    #[test]
    fn test_meta_envelope_reports_payload_errors() {
        let err = serde_json::from_value::<ApiEnvelope<Row>>(json!({
            "meta": {"code": 200, "status": "success", "message": "ok"},
            "result": {"id": "not-a-number"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn test_delete_without_result_is_success() {
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_value(json!({
            "meta": {"code": 200, "status": "success", "message": "Deleted"},
            "result": null
        }))
        .unwrap();
        assert_eq!(env.normalize().into_optional(), Ok(None));
    }

    #[test]
    fn test_error_body_message() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(json!({"message": "Unauthenticated."})).unwrap();
        assert_eq!(env.message(), Some("Unauthenticated."));
    }

    #[test]
    fn test_paginated_slice() {
        let items: Vec<i64> = (1..=25).collect();
        let page = Paginated::slice(&items, 3, 10);
        assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total, Some(25));

        let empty: Paginated<i64> = Paginated::slice(&[], 1, 10);
        assert_eq!(empty.last_page, 1);
        assert!(empty.data.is_empty());
    }
}
