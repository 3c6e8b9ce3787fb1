// resto-client/tests/common/mod.rs
// Shared setup for the integration tests

#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use resto_client::{OneshotHttpClient, RestoApi};
use resto_mock::MockState;

pub const EMAIL: &str = "kasir@resto.test";
pub const PASSWORD: &str = "password";

/// API client wired to the mock, without a token.
pub fn anonymous(state: &MockState) -> RestoApi<OneshotHttpClient> {
    RestoApi::new(OneshotHttpClient::new(resto_mock::router(state.clone())))
}

/// API client wired to the mock and logged in as the cashier.
pub async fn logged_in(state: &MockState) -> RestoApi<OneshotHttpClient> {
    let mut api = anonymous(state);
    let resp = api.login(EMAIL, PASSWORD).await.unwrap();
    api.set_token(resp.access_token);
    api
}

/// Logged-in client over a custom router, e.g. the mock with extra layers.
pub async fn logged_in_with(router: Router) -> RestoApi<OneshotHttpClient> {
    let mut api = RestoApi::new(OneshotHttpClient::new(router));
    let resp = api.login(EMAIL, PASSWORD).await.unwrap();
    api.set_token(resp.access_token);
    api
}

/// Error response in the backend's meta envelope.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "meta": {"code": status.as_u16(), "status": "error", "message": message},
        "result": null
    });
    (status, Json(body)).into_response()
}

/// Bodies of the recorded requests for `method path`.
pub fn bodies(state: &MockState, method: &str, path: &str) -> Vec<serde_json::Value> {
    state
        .requests()
        .into_iter()
        .filter(|r| r.method == method && r.path == path)
        .map(|r| r.body)
        .collect()
}
