//! Auth module: three-layer architecture (domain, repository, service).
//!
//! This module centralizes registration, login, and token lifecycle logic
//! independent of the web framework.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
