use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use jsonwebtoken::Algorithm;
use server::routes::{self, auth};
use service::auth::repository::mock::MockUserStore;
use service::auth::repository::UserStore;
use service::auth::service::{AuthConfig, AuthService};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

fn build_app() -> (Arc<MockUserStore>, Router) {
    let mock = Arc::new(MockUserStore::default());
    let store: Arc<dyn UserStore> = mock.clone();
    let cfg = AuthConfig {
        jwt_secret: "test-secret".into(),
        algorithm: Algorithm::HS256,
        access_ttl_secs: 1800,
        refresh_ttl_secs: 604_800,
        // Minimal work factor keeps the tests quick
        argon2_memory_kib: 8,
        argon2_iterations: 1,
        argon2_parallelism: 1,
    };
    let svc = AuthService::new(store, cfg).expect("auth config");
    let state = auth::ServerState { auth: Arc::new(svc) };
    (mock, routes::build_router(cors(), state))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_up() {
    let (_mock, mut app) = build_app();
    let resp = app
        .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_refresh_validate_flow() {
    let (_mock, mut app) = build_app();

    // Register
    let resp = app
        .call(json_request(
            "POST",
            "/auth/register",
            &json!({"email": "a@x.com", "password": "pw1secure", "full_name": "Ada"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"]["user_id"].is_i64());
    assert_eq!(body["data"]["email"], "a@x.com");
    assert!(body["error_code"].is_null());

    // Login
    let resp = app
        .call(json_request("POST", "/auth/login", &json!({"email": "a@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["token_type"], "bearer");
    assert_eq!(body["data"]["expires_in"], 1800);
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    // Refresh: fresh access token from the refresh token
    let resp = app
        .call(json_request("POST", "/auth/refresh", &json!({"refresh_token": refresh})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    let new_access = body["data"]["access_token"].as_str().unwrap().to_string();

    // Validate the new access token (the cross-service endpoint)
    let resp = app
        .call(bearer_request("GET", "/auth/validate-token", &new_access))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["data"]["email"], "a@x.com");

    // /auth/me works with the original access token too
    let resp = app.call(bearer_request("GET", "/auth/me", &access)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Logout just proves the token was valid
    let resp = app.call(bearer_request("POST", "/auth/logout", &access)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn duplicate_email_conflict() {
    let (_mock, mut app) = build_app();
    let payload = json!({"email": "dup@x.com", "password": "pw1secure"});
    let resp = app.call(json_request("POST", "/auth/register", &payload)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.call(json_request("POST", "/auth/register", &payload)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn login_wrong_password_unauthorized() {
    let (_mock, mut app) = build_app();
    let resp = app
        .call(json_request("POST", "/auth/register", &json!({"email": "b@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .call(json_request("POST", "/auth/login", &json!({"email": "b@x.com", "password": "wrong"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("www-authenticate"));
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn refresh_rejects_access_token() {
    let (_mock, mut app) = build_app();
    let resp = app
        .call(json_request("POST", "/auth/register", &json!({"email": "c@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = app
        .call(json_request("POST", "/auth/login", &json!({"email": "c@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    let body = read_json(resp).await;
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    // Access token where a refresh token is expected
    let resp = app
        .call(json_request("POST", "/auth/refresh", &json!({"refresh_token": access})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "INVALID_TOKEN");

    // Refresh token where an access token is expected
    let resp = app
        .call(bearer_request("GET", "/auth/validate-token", &refresh))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn deactivated_user_is_rejected_everywhere() {
    let (mock, mut app) = build_app();
    let resp = app
        .call(json_request("POST", "/auth/register", &json!({"email": "d@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    let body = read_json(resp).await;
    let user_id = body["data"]["user_id"].as_i64().unwrap();

    let resp = app
        .call(json_request("POST", "/auth/login", &json!({"email": "d@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    let body = read_json(resp).await;
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    mock.set_active(user_id, false);

    let resp = app.call(bearer_request("GET", "/auth/me", &access)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "USER_NOT_ACTIVE");

    let resp = app
        .call(json_request("POST", "/auth/refresh", &json!({"refresh_token": refresh})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .call(json_request("POST", "/auth/login", &json!({"email": "d@x.com", "password": "pw1secure"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "USER_NOT_ACTIVE");
}

#[tokio::test]
async fn garbage_bearer_token_is_invalid() {
    let (_mock, mut app) = build_app();
    let resp = app
        .call(bearer_request("GET", "/auth/validate-token", "not-a-token"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(resp).await;
    assert_eq!(body["error_code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn missing_authorization_header_is_a_bad_request() {
    let (_mock, mut app) = build_app();
    let resp = app
        .call(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
