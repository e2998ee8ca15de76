use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Discriminates what a token may be presented for. Cross-use (a refresh
/// token where an access token is expected, or vice versa) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT claims carried by every token issued here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id in decimal string form
    pub sub: String,
    pub email: String,
    /// Expiry, unix seconds
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse::<i64>().map_err(|_| AuthError::InvalidToken)
    }
}

/// Issues and verifies signed, time-bound bearer tokens.
///
/// Symmetric signing keeps verification stateless: any service holding the
/// shared secret can validate a token without calling back to the issuer.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Short-lived token for request authentication.
    pub fn issue_access(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        self.issue(user_id, email, TokenType::Access, self.access_ttl)
    }

    /// Long-lived token, only good for minting new access tokens.
    pub fn issue_refresh(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        self.issue(user_id, email, TokenType::Refresh, self.refresh_ttl)
    }

    fn issue(&self, user_id: i64, email: &str, token_type: TokenType, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
            token_type: token_type.as_str().to_string(),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Decode and check a presented token.
    ///
    /// Check order: signature (and payload shape), then the `type` claim,
    /// then expiry. A bad signature, malformed payload, or type mismatch is
    /// `InvalidToken`; a correct token past its TTL is `TokenExpired`.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked manually below so a type mismatch wins over it
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;
        if data.claims.token_type != expected.as_str() {
            return Err(AuthError::InvalidToken);
        }
        if Utc::now().timestamp() > data.claims.exp {
            return Err(AuthError::TokenExpired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc() -> TokenService {
        TokenService::new("test-secret", Algorithm::HS256, 1800, 604800)
    }

    #[test]
    fn access_token_roundtrip() {
        let svc = svc();
        let token = svc.issue_access(42, "a@x.com").expect("issue");
        let claims = svc.verify(&token, TokenType::Access).expect("verify");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn cross_type_use_is_invalid() {
        let svc = svc();
        let access = svc.issue_access(1, "a@x.com").expect("issue");
        let refresh = svc.issue_refresh(1, "a@x.com").expect("issue");
        assert!(matches!(svc.verify(&access, TokenType::Refresh), Err(AuthError::InvalidToken)));
        assert!(matches!(svc.verify(&refresh, TokenType::Access), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_reports_expiry() {
        let svc = TokenService::new("test-secret", Algorithm::HS256, -60, 604800);
        let token = svc.issue_access(1, "a@x.com").expect("issue");
        assert!(matches!(svc.verify(&token, TokenType::Access), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn expired_token_of_wrong_type_is_invalid_not_expired() {
        // Type discrimination is checked before expiry
        let svc = TokenService::new("test-secret", Algorithm::HS256, -60, 604800);
        let token = svc.issue_access(1, "a@x.com").expect("issue");
        assert!(matches!(svc.verify(&token, TokenType::Refresh), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let ours = svc();
        let theirs = TokenService::new("other-secret", Algorithm::HS256, 1800, 604800);
        let token = theirs.issue_access(1, "a@x.com").expect("issue");
        assert!(matches!(ours.verify(&token, TokenType::Access), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_invalid() {
        let svc = svc();
        assert!(matches!(svc.verify("not.a.jwt", TokenType::Access), Err(AuthError::InvalidToken)));
        assert!(matches!(svc.verify("", TokenType::Access), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn non_numeric_subject_is_invalid() {
        let claims = Claims { sub: "abc".into(), email: "a@x.com".into(), exp: 0, token_type: "access".into() };
        assert!(matches!(claims.user_id(), Err(AuthError::InvalidToken)));
    }
}
