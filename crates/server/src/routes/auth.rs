use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::AuthService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
}

/// Uniform response envelope shared by every auth endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: &'static str,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub error_code: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self { status: "success", message: message.into(), data, error_code: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// RegisterInput / LoginInput are provided by service::auth::domain

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered"), (status = 400, description = "Validation error or email exists")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let user = state.auth.register(input).await?;
    let data = json!({
        "user_id": user.id,
        "email": user.email,
        "full_name": user.full_name,
        "created_at": user.created_at,
    });
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User registered successfully", Some(data))),
    ))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in"), (status = 401, description = "Invalid credentials or inactive user")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<ApiResponse>, ApiError> {
    let session = state.auth.login(input).await?;
    let data = json!({
        "access_token": session.access_token,
        "refresh_token": session.refresh_token,
        "token_type": "bearer",
        "expires_in": session.expires_in,
        "user": session.user,
    });
    Ok(Json(ApiResponse::success("Login successful", Some(data))))
}

#[utoipa::path(post, path = "/auth/refresh", tag = "auth",
    request_body = crate::openapi::RefreshRequest,
    responses((status = 200, description = "Token refreshed"), (status = 401, description = "Invalid or expired refresh token")))]
pub async fn refresh(
    State(state): State<ServerState>,
    Json(input): Json<RefreshRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let refreshed = state.auth.refresh(&input.refresh_token).await?;
    let data = json!({
        "access_token": refreshed.access_token,
        "token_type": "bearer",
        "expires_in": refreshed.expires_in,
    });
    Ok(Json(ApiResponse::success("Token refreshed successfully", Some(data))))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth",
    responses((status = 200, description = "Current user"), (status = 401, description = "Invalid or expired token")))]
pub async fn me(
    State(state): State<ServerState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ApiResponse>, ApiError> {
    let user = state.auth.validate(bearer.token()).await?;
    Ok(Json(ApiResponse::success("Token is valid", Some(json!(user)))))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth",
    responses((status = 200, description = "Logged out"), (status = 401, description = "Invalid or expired token")))]
pub async fn logout(
    State(state): State<ServerState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ApiResponse>, ApiError> {
    // Tokens are stateless bearer credentials; logout only proves the caller
    // held a valid one. There is no revocation list.
    let _ = state.auth.validate(bearer.token()).await?;
    Ok(Json(ApiResponse::success("Logged out successfully", None)))
}

#[utoipa::path(get, path = "/auth/validate-token", tag = "auth",
    responses((status = 200, description = "Token is valid"), (status = 401, description = "Invalid or expired token")))]
pub async fn validate_token(
    State(state): State<ServerState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ApiResponse>, ApiError> {
    // For sibling services: verify signature/type/expiry and resolve identity
    let user = state.auth.validate(bearer.token()).await?;
    Ok(Json(ApiResponse::success("Token is valid", Some(json!(user)))))
}
