//! Business layer for the auth service.
//! - Credential hashing and verification (`auth::password`)
//! - Token issuance and verification (`auth::token`)
//! - Account orchestration over a pluggable user store (`auth::service`)

pub mod auth;
