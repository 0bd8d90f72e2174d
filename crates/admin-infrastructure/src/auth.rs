//! Auth provider adapter over `/auth/v1`

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use admin_core::domain::{AuthSession, AuthUser, SignUpAttributes, SignUpOutcome};
use admin_core::error::DomainError;
use admin_core::repositories::AuthProvider;

use crate::error::GatewayError;
use crate::gateway::GatewayClient;

pub struct RestAuthProvider {
    client: GatewayClient,
    email_redirect_to: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpAttributes,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    email: Option<String>,
}

impl From<UserBody> for AuthUser {
    fn from(body: UserBody) -> Self {
        AuthUser {
            id: body.id,
            email: body.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: UserBody,
}

impl From<SessionBody> for AuthSession {
    fn from(body: SessionBody) -> Self {
        let expires_at = body
            .expires_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(|| Utc::now() + Duration::seconds(body.expires_in.unwrap_or(3600)));
        AuthSession {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_at,
            user: body.user.into(),
        }
    }
}

/// Sign-up answers with a session when confirmation is off, otherwise with the bare user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

impl RestAuthProvider {
    pub fn new(client: GatewayClient, email_redirect_to: Option<String>) -> Self {
        Self {
            client,
            email_redirect_to,
        }
    }

    fn url(&self, path: &str) -> String {
        self.client.endpoint("auth", path)
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let request = self
            .client
            .public_request(Method::POST, &self.url("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });

        let session: SessionBody = self
            .client
            .json("auth sign-in", request)
            .await
            .map_err(|e| match e.status() {
                Some(StatusCode::BAD_REQUEST) => DomainError::InvalidCredentials,
                _ => e.into(),
            })?;
        Ok(session.into())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attributes: &SignUpAttributes,
    ) -> Result<SignUpOutcome, DomainError> {
        let mut request = self
            .client
            .public_request(Method::POST, &self.url("signup"))
            .json(&SignUpRequest {
                email,
                password,
                data: attributes,
            });
        if let Some(redirect) = &self.email_redirect_to {
            request = request.query(&[("redirect_to", redirect.as_str())]);
        }

        let body: SignUpBody = self
            .client
            .json("auth sign-up", request)
            .await
            .map_err(sign_up_error)?;

        Ok(match body {
            SignUpBody::Session(session) => {
                let session: AuthSession = session.into();
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpBody::User(user) => {
                info!("Sign-up for {} awaits e-mail confirmation", user.id);
                SignUpOutcome {
                    user: user.into(),
                    session: None,
                }
            }
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        let request = self
            .client
            .user_request(Method::POST, &self.url("logout"), access_token);
        self.client.execute("auth sign-out", request).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, DomainError> {
        let request = self
            .client
            .user_request(Method::GET, &self.url("user"), access_token);
        let user: UserBody = self
            .client
            .json("auth get-user", request)
            .await
            .map_err(|e| match e.status() {
                Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => {
                    DomainError::Unauthenticated
                }
                _ => e.into(),
            })?;
        Ok(user.into())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, DomainError> {
        let request = self
            .client
            .public_request(Method::POST, &self.url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant { refresh_token });

        let session: SessionBody = self
            .client
            .json("auth refresh", request)
            .await
            .map_err(|e| match e.status() {
                Some(StatusCode::BAD_REQUEST) | Some(StatusCode::UNAUTHORIZED) => {
                    warn!("Refresh token rejected: {}", e.message());
                    DomainError::SessionExpired
                }
                _ => e.into(),
            })?;
        Ok(session.into())
    }
}

fn sign_up_error(err: GatewayError) -> DomainError {
    match err.status() {
        Some(StatusCode::BAD_REQUEST) | Some(StatusCode::UNPROCESSABLE_ENTITY) => {
            let message = err.message();
            if message.to_lowercase().contains("registered") {
                DomainError::Conflict(message)
            } else {
                DomainError::ValidationError(message)
            }
        }
        _ => err.into(),
    }
}
