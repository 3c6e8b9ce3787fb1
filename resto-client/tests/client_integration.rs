// resto-client/tests/client_integration.rs
// Session and transport integration tests

mod common;

use axum::{Json, Router, routing::post};
use resto_client::{
    ClientConfig, ClientError, OneshotHttpClient, RestoApi, Session, SessionStore,
};
use resto_mock::MockState;
use tempfile::TempDir;

#[tokio::test]
async fn test_login_persists_session() {
    let temp_dir = TempDir::new().unwrap();
    let state = MockState::seeded();
    let mut api = common::anonymous(&state);

    let mut session = Session::open(SessionStore::new(temp_dir.path()));
    assert!(!session.is_logged_in());

    let user = session
        .login(&mut api, common::EMAIL, common::PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.name, "Kasir");
    assert!(api.token().is_some());

    // A fresh process picks the session up from disk
    let restored = Session::open(SessionStore::new(temp_dir.path()));
    assert!(restored.is_logged_in());
    assert_eq!(restored.token(), session.token());

    let mut other = common::anonymous(&state);
    restored.attach(&mut other);
    assert_eq!(other.foods(1).await.unwrap().data.len(), 10);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let temp_dir = TempDir::new().unwrap();
    let state = MockState::seeded();
    let mut api = common::anonymous(&state);
    let mut session = Session::open(SessionStore::new(temp_dir.path()));

    let err = session
        .login(&mut api, common::EMAIL, "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");

    assert!(!session.is_logged_in());
    assert!(api.token().is_none());
    assert!(!SessionStore::new(temp_dir.path()).exists());
}

#[tokio::test]
async fn test_login_without_token_is_incomplete() {
    let temp_dir = TempDir::new().unwrap();
    let router = Router::new().route(
        "/login",
        post(|| async {
            Json(serde_json::json!({
                "meta": {"code": 200, "status": "success", "message": "ok"},
                "result": {"user": {"id": 1, "name": "Kasir", "email": "kasir@resto.test"}}
            }))
        }),
    );
    let mut api = RestoApi::new(OneshotHttpClient::new(router));
    let mut session = Session::open(SessionStore::new(temp_dir.path()));

    let err = session.login(&mut api, "kasir@resto.test", "x").await.unwrap_err();
    assert!(matches!(err, ClientError::IncompleteLogin));
    assert_eq!(
        err.to_string(),
        "Login failed: token or user data not received"
    );
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let temp_dir = TempDir::new().unwrap();
    let state = MockState::seeded();
    let mut api = common::anonymous(&state);
    let mut session = Session::open(SessionStore::new(temp_dir.path()));
    session
        .login(&mut api, common::EMAIL, common::PASSWORD)
        .await
        .unwrap();

    session.logout(&mut api).unwrap();
    assert!(!session.is_logged_in());
    assert!(matches!(session.require(), Err(ClientError::NotLoggedIn)));
    assert!(api.token().is_none());
    assert!(!SessionStore::new(temp_dir.path()).exists());

    // Protected endpoints now answer 401
    let err = api.orders(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn test_network_client_against_served_mock() {
    let state = MockState::seeded();
    let app = Router::new().nest("/api", resto_mock::router(state.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::new(format!("http://{addr}/api")).with_timeout(5);
    let mut api = RestoApi::connect(&config).unwrap();

    let floors = api.floors().await.unwrap();
    assert_eq!(floors.len(), 2);

    let err = api.foods(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let resp = api.login(common::EMAIL, common::PASSWORD).await.unwrap();
    api.set_token(resp.access_token);
    let page = api.foods(2).await.unwrap();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.data.len(), 2);

    let order = api.order(1).await.unwrap();
    assert_eq!(order.customer_name, "Budi");
}
