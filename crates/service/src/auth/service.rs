use std::sync::Arc;

use jsonwebtoken::Algorithm;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, LoginInput, RefreshedAccess, RegisterInput, UserProfile};
use super::errors::AuthError;
use super::password::PasswordService;
use super::repository::UserStore;
use super::token::{TokenService, TokenType};

/// Immutable auth service configuration, passed explicitly at construction.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub algorithm: Algorithm,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

/// Account orchestration over a pluggable user store, independent of the
/// web framework. Composes the credential verifier and the token manager.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AuthError::Validation("invalid email".into())),
    }
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, cfg: AuthConfig) -> Result<Self, AuthError> {
        let passwords = PasswordService::new(
            cfg.argon2_memory_kib,
            cfg.argon2_iterations,
            cfg.argon2_parallelism,
        )?;
        let tokens = TokenService::new(
            &cfg.jwt_secret,
            cfg.algorithm,
            cfg.access_ttl_secs,
            cfg.refresh_ttl_secs,
        );
        Ok(Self { store, passwords, tokens })
    }

    /// Register a new account with a hashed credential.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockUserStore};
    /// use service::auth::domain::RegisterInput;
    /// use jsonwebtoken::Algorithm;
    /// use std::sync::Arc;
    /// let store = Arc::new(MockUserStore::default());
    /// let cfg = AuthConfig {
    ///     jwt_secret: "secret".into(),
    ///     algorithm: Algorithm::HS256,
    ///     access_ttl_secs: 1800,
    ///     refresh_ttl_secs: 604_800,
    ///     argon2_memory_kib: 8,
    ///     argon2_iterations: 1,
    ///     argon2_parallelism: 1,
    /// };
    /// let svc = AuthService::new(store, cfg).unwrap();
    /// let input = RegisterInput { email: "user@example.com".into(), password: "Secret123".into(), full_name: Some("Test".into()) };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserProfile, AuthError> {
        validate_email(&input.email)?;
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.store.find_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::EmailExists);
        }

        let hash = self.passwords.hash(&input.password)?;
        let user = self
            .store
            .create(&input.email, &hash, input.full_name.as_deref())
            .await?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(user.profile())
    }

    /// Verify a credential and issue an access+refresh token pair.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .store
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(&input.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::UserNotActive);
        }

        let access_token = self.tokens.issue_access(user.id, &user.email)?;
        let refresh_token = self.tokens.issue_refresh(user.id, &user.email)?;
        info!(user_id = user.id, "login_succeeded");
        Ok(AuthSession {
            user: user.profile(),
            access_token,
            refresh_token,
            expires_in: self.tokens.access_ttl_secs(),
        })
    }

    /// Exchange a valid refresh token for a new access token.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AuthError> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        let user = self.store.find_by_id(claims.user_id()?).await?;
        if !user.is_active {
            return Err(AuthError::UserNotActive);
        }
        let access_token = self.tokens.issue_access(user.id, &user.email)?;
        debug!(user_id = user.id, "access_token_refreshed");
        Ok(RefreshedAccess { access_token, expires_in: self.tokens.access_ttl_secs() })
    }

    /// Verify an access token and resolve the caller's public profile.
    /// Used by sibling services as well as this one's own endpoints.
    #[instrument(skip_all)]
    pub async fn validate(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;
        let user = self.store.find_by_id(claims.user_id()?).await?;
        if !user.is_active {
            return Err(AuthError::UserNotActive);
        }
        Ok(user.profile())
    }
}
