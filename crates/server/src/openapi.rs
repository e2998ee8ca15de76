use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub email: String, pub password: String, pub full_name: Option<String> }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct RefreshRequest { pub refresh_token: String }

#[derive(utoipa::ToSchema)]
pub struct UserProfileDoc {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_corporate: bool,
    pub created_at: String,
}

#[derive(utoipa::ToSchema)]
pub struct EnvelopeDoc {
    pub status: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    pub error_code: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::refresh,
        crate::routes::auth::me,
        crate::routes::auth::logout,
        crate::routes::auth::validate_token,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            UserProfileDoc,
            EnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
