//! User administration over profiles, roles and the auth provider

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use admin_security::PasswordTransform;

use crate::domain::{
    AuthUser, NewUser, ProfilePatch, Role, SignUpAttributes, UserSummary, UserUpdate,
};
use crate::error::DomainError;
use crate::repositories::{AuthProvider, ProfileRepository, UserRoleRepository};

pub struct UserService {
    profiles: Arc<dyn ProfileRepository>,
    roles: Arc<dyn UserRoleRepository>,
    auth: Arc<dyn AuthProvider>,
    password_transform: PasswordTransform,
}

impl UserService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        roles: Arc<dyn UserRoleRepository>,
        auth: Arc<dyn AuthProvider>,
        password_transform: PasswordTransform,
    ) -> Self {
        Self {
            profiles,
            roles,
            auth,
            password_transform,
        }
    }

    /// Profiles newest first, each with its role when one is assigned
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<UserSummary>, DomainError> {
        let (profiles, roles) = tokio::try_join!(self.profiles.list_all(), self.roles.list_all())?;
        let role_by_user: HashMap<Uuid, Role> =
            roles.into_iter().map(|r| (r.user_id, r.role)).collect();

        Ok(profiles
            .into_iter()
            .map(|profile| UserSummary {
                role: role_by_user.get(&profile.user_id).copied(),
                profile,
            })
            .filter(|summary| search.map_or(true, |term| summary.matches(term)))
            .collect())
    }

    /// Register the account with the auth provider, then promote it when
    /// the admin role was requested. The provider creates the profile and
    /// the default `user` role itself.
    pub async fn create(&self, form: NewUser) -> Result<AuthUser, DomainError> {
        form.validate()?;
        let password = self
            .password_transform
            .prepare(&form.password)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let outcome = self
            .auth
            .sign_up(
                form.email.trim(),
                &password,
                &SignUpAttributes {
                    username: form.username.trim().to_string(),
                },
            )
            .await?;

        if form.role == Role::Admin {
            self.roles.set_role(&outcome.user.id, Role::Admin).await?;
        }

        info!("User created: {} as {}", outcome.user.id, form.role);
        Ok(outcome.user)
    }

    /// Patch the profile, then the role
    pub async fn update(&self, profile_id: Uuid, form: UserUpdate) -> Result<UserSummary, DomainError> {
        form.validate()?;
        let profile = self
            .profiles
            .update(
                &profile_id,
                &ProfilePatch {
                    username: form.username.trim().to_string(),
                    status: form.status,
                },
            )
            .await?;

        self.roles.set_role(&profile.user_id, form.role).await?;

        info!("User updated: {} as {}", profile.user_id, form.role);
        Ok(UserSummary {
            profile,
            role: Some(form.role),
        })
    }

    /// Removes the profile row only; the auth account stays with the provider
    pub async fn delete(&self, profile_id: Uuid) -> Result<(), DomainError> {
        self.profiles.delete(&profile_id).await?;
        warn!("Profile {} deleted; auth account left in place", profile_id);
        Ok(())
    }
}
