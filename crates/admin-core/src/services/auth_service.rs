// ============================================================================
// Admin Core - Authentication Service
// File: crates/admin-core/src/services/auth_service.rs
// ============================================================================
//! Sign-in, sign-up, refresh, sign-out and per-request session setup

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use validator::Validate;

use admin_security::{GatewayTokenVerifier, JwtError, PasswordTransform};
use admin_shared::utils::mask_email;

use crate::domain::{
    AuthEvent, AuthSession, AuthUser, SignInForm, SignUpAttributes, SignUpForm, SignUpOutcome,
};
use crate::error::DomainError;
use crate::repositories::{AuthProvider, ProfileRepository, UserRoleRepository};
use crate::session::SessionContext;

const EVENT_CAPACITY: usize = 64;

/// Authentication service backed by the hosted auth provider
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    roles: Arc<dyn UserRoleRepository>,
    profiles: Arc<dyn ProfileRepository>,
    verifier: Option<GatewayTokenVerifier>,
    password_transform: PasswordTransform,
    events: broadcast::Sender<AuthEvent>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        roles: Arc<dyn UserRoleRepository>,
        profiles: Arc<dyn ProfileRepository>,
        verifier: Option<GatewayTokenVerifier>,
        password_transform: PasswordTransform,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            provider,
            roles,
            profiles,
            verifier,
            password_transform,
            events,
        }
    }

    /// Receive auth state changes from now on
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: AuthEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn prepare_password(&self, raw: &str) -> Result<String, DomainError> {
        self.password_transform
            .prepare(raw)
            .map_err(|e| DomainError::ValidationError(e.to_string()))
    }

    pub async fn sign_in(&self, form: SignInForm) -> Result<AuthSession, DomainError> {
        form.validate()?;
        // sent as typed; the provider matches addresses case-insensitively
        let email = form.email.trim();
        info!("Sign-in attempt for {}", mask_email(email));

        let password = self.prepare_password(&form.password)?;
        let session = self.provider.sign_in(email, &password).await.map_err(|e| {
            warn!("Sign-in failed for {}: {}", mask_email(email), e);
            e
        })?;

        info!("Sign-in successful for {}", mask_email(email));
        self.publish(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    pub async fn sign_up(&self, form: SignUpForm) -> Result<SignUpOutcome, DomainError> {
        form.validate()?;
        let email = form.email.trim().to_lowercase();
        let password = self.prepare_password(&form.password)?;

        let outcome = self
            .provider
            .sign_up(
                &email,
                &password,
                &SignUpAttributes {
                    username: form.username.trim().to_string(),
                },
            )
            .await?;

        info!(
            "Sign-up for {} ({})",
            mask_email(&email),
            if outcome.session.is_some() { "signed in" } else { "confirmation pending" }
        );
        if outcome.session.is_some() {
            self.publish(AuthEvent::SignedIn(outcome.user.clone()));
        }
        Ok(outcome)
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, DomainError> {
        if refresh_token.trim().is_empty() {
            return Err(DomainError::Unauthenticated);
        }
        let session = self.provider.refresh(refresh_token).await?;
        debug!("Token refreshed for {}", session.user.id);
        self.publish(AuthEvent::TokenRefreshed(session.user.clone()));
        Ok(session)
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        if let Err(e) = self.provider.sign_out(access_token).await {
            // the local session ends regardless
            warn!("Provider sign-out failed: {}", e);
        }
        self.publish(AuthEvent::SignedOut);
        Ok(())
    }

    /// Identity behind an access token
    pub async fn resolve_user(&self, access_token: &str) -> Result<AuthUser, DomainError> {
        match &self.verifier {
            Some(verifier) => verifier
                .verify(access_token)
                .map(|token| AuthUser {
                    id: token.user_id,
                    email: token.email,
                })
                .map_err(|e| match e {
                    JwtError::TokenExpired => DomainError::SessionExpired,
                    other => {
                        debug!("Rejected access token: {}", other);
                        DomainError::Unauthenticated
                    }
                }),
            None => self.provider.get_user(access_token).await,
        }
    }

    /// Build the request's session: user first, then role and profile concurrently.
    ///
    /// Role or profile lookups that fail leave the field empty.
    pub async fn establish_session(&self, access_token: &str) -> Result<SessionContext, DomainError> {
        let user = self.resolve_user(access_token).await?;

        let (role, profile) = tokio::join!(
            self.roles.find_role(&user.id),
            self.profiles.find_by_user_id(&user.id)
        );

        let role = role.unwrap_or_else(|e| {
            error!("Failed to load role for {}: {}", user.id, e);
            None
        });
        let profile = profile.unwrap_or_else(|e| {
            error!("Failed to load profile for {}: {}", user.id, e);
            None
        });

        Ok(SessionContext {
            user: Some(user),
            role,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::{MockAuthProvider, MockProfileRepository, MockUserRoleRepository};
    use crate::services::test_support::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn auth_session(id: Uuid) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: AuthUser {
                id,
                email: Some("admin@example.com".to_string()),
            },
        }
    }

    fn service(
        provider: MockAuthProvider,
        roles: MockUserRoleRepository,
        profiles: MockProfileRepository,
    ) -> AuthService {
        AuthService::new(
            Arc::new(provider),
            Arc::new(roles),
            Arc::new(profiles),
            None,
            PasswordTransform::Plain,
        )
    }

    #[tokio::test]
    async fn test_sign_in_publishes_event() {
        let id = Uuid::new_v4();
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in()
            .withf(|email, password| email == "Admin@Example.com" && password == "hunter22")
            .returning(move |_, _| Ok(auth_session(id)));

        let service = service(provider, MockUserRoleRepository::new(), MockProfileRepository::new());
        let mut events = service.subscribe();

        let session = service
            .sign_in(SignInForm {
                email: " Admin@Example.com ".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.user.id, id);
        assert!(matches!(events.try_recv(), Ok(AuthEvent::SignedIn(user)) if user.id == id));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_invalid_form() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_in().times(0);
        let service = service(provider, MockUserRoleRepository::new(), MockProfileRepository::new());

        let result = service
            .sign_in(SignInForm {
                email: "nobody".to_string(),
                password: "x".to_string(),
            })
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_sign_out_always_tears_down() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_out().returning(|_| Err(gateway_error()));
        let service = service(provider, MockUserRoleRepository::new(), MockProfileRepository::new());
        let mut events = service.subscribe();

        assert!(service.sign_out("token").await.is_ok());
        assert_eq!(events.try_recv().ok(), Some(AuthEvent::SignedOut));
    }

    #[tokio::test]
    async fn test_establish_session_loads_role_and_profile() {
        let id = Uuid::new_v4();
        let mut provider = MockAuthProvider::new();
        provider.expect_get_user().returning(move |_| {
            Ok(AuthUser {
                id,
                email: Some("admin@example.com".to_string()),
            })
        });
        let mut roles = MockUserRoleRepository::new();
        roles.expect_find_role().returning(|_| Ok(Some(Role::Admin)));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |user_id| Ok(Some(profile(*user_id, "admin"))));

        let ctx = service(provider, roles, profiles)
            .establish_session("token")
            .await
            .unwrap();

        assert!(ctx.has_role(Role::Admin));
        assert_eq!(ctx.display_name(), Some("admin"));
    }

    #[tokio::test]
    async fn test_establish_session_survives_role_failure() {
        let mut provider = MockAuthProvider::new();
        provider.expect_get_user().returning(|_| {
            Ok(AuthUser {
                id: Uuid::new_v4(),
                email: None,
            })
        });
        let mut roles = MockUserRoleRepository::new();
        roles.expect_find_role().returning(|_| Err(gateway_error()));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_user_id().returning(|_| Ok(None));

        let ctx = service(provider, roles, profiles)
            .establish_session("token")
            .await
            .unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.role, None);
        assert_eq!(ctx.effective_role(), Role::User);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthenticated() {
        let mut provider = MockAuthProvider::new();
        provider.expect_get_user().times(0);
        let service = AuthService::new(
            Arc::new(provider),
            Arc::new(MockUserRoleRepository::new()),
            Arc::new(MockProfileRepository::new()),
            Some(GatewayTokenVerifier::new(
                "super-secret-jwt-token-with-at-least-32-characters",
                "authenticated",
            )),
            PasswordTransform::Plain,
        );

        let result = service.establish_session("not-a-jwt").await;
        assert_eq!(result, Err(DomainError::Unauthenticated));
    }
}
