//! Gateway access token verification
//!
//! The hosted auth provider signs access tokens with a shared HS256 secret.
//! When that secret is configured the service verifies tokens locally and
//! skips the round trip to the provider's `/user` endpoint.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

pub struct GatewayTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl GatewayTokenVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| JwtError::InvalidSubject(claims.sub.clone()))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| JwtError::ValidationError("exp out of range".to_string()))?;

        Ok(VerifiedToken {
            user_id,
            email: claims.email,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn token(sub: &str, exp: i64, aud: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp,
            iat: Some(Utc::now().timestamp()),
            email: Some("admin@example.com".to_string()),
            role: Some("authenticated".to_string()),
            aud: Some(aud.to_string()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let user_id = Uuid::new_v4();
        let exp = (Utc::now() + Duration::minutes(10)).timestamp();
        let verifier = GatewayTokenVerifier::new(SECRET, "authenticated");

        let verified = verifier.verify(&token(&user_id.to_string(), exp, "authenticated")).unwrap();
        assert_eq!(verified.user_id, user_id);
        assert_eq!(verified.email.as_deref(), Some("admin@example.com"));
        assert_eq!(verified.expires_at.timestamp(), exp);
    }

    #[test]
    fn test_expired_token_rejected() {
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let verifier = GatewayTokenVerifier::new(SECRET, "authenticated");

        let result = verifier.verify(&token(&Uuid::new_v4().to_string(), exp, "authenticated"));
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let exp = (Utc::now() + Duration::minutes(10)).timestamp();
        let verifier = GatewayTokenVerifier::new(SECRET, "authenticated");

        let result = verifier.verify(&token(&Uuid::new_v4().to_string(), exp, "anon"));
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let exp = (Utc::now() + Duration::minutes(10)).timestamp();
        let verifier = GatewayTokenVerifier::new(SECRET, "authenticated");

        let result = verifier.verify(&token("service-account", exp, "authenticated"));
        assert!(matches!(result, Err(JwtError::InvalidSubject(_))));
    }
}
