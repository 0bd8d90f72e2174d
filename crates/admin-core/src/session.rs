//! Per-request session context and route guard

use serde::Serialize;

use admin_shared::constants::{DASHBOARD_PATH, LOGIN_PATH};

use crate::domain::{AuthEvent, AuthUser, Profile, Role};

/// Session state scoped to one request.
///
/// Built by `AuthService::establish_session`; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub user: Option<AuthUser>,
    pub role: Option<Role>,
    pub profile: Option<Profile>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Role used for menu resolution; an unset role resolves as `user`
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }

    /// `user` is satisfied by admin or user, `admin` only by admin, no role by nothing
    pub fn has_role(&self, required: Role) -> bool {
        self.role.is_some_and(|role| role.satisfies(required))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .map(|p| p.username.as_str())
            .or_else(|| self.user.as_ref().and_then(|u| u.email.as_deref()))
    }

    /// Clear user and everything derived from it
    pub fn teardown(&mut self) {
        self.user = None;
        self.role = None;
        self.profile = None;
    }

    pub fn apply(&mut self, event: &AuthEvent) {
        match event {
            AuthEvent::SignedOut => self.teardown(),
            AuthEvent::SignedIn(user) | AuthEvent::TokenRefreshed(user) => {
                if self.user.as_ref().map(|u| u.id) != Some(user.id) {
                    self.role = None;
                    self.profile = None;
                }
                self.user = Some(user.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl RouteDecision {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin => Some(LOGIN_PATH),
            RouteDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(session: &SessionContext, required: Option<Role>) -> RouteDecision {
        if !session.is_authenticated() {
            return RouteDecision::RedirectToLogin;
        }
        match required {
            Some(role) if !session.has_role(role) => RouteDecision::RedirectToDashboard,
            _ => RouteDecision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(role: Option<Role>) -> SessionContext {
        SessionContext {
            user: Some(AuthUser {
                id: Uuid::new_v4(),
                email: Some("someone@example.com".to_string()),
            }),
            role,
            profile: None,
        }
    }

    #[test]
    fn test_anonymous_redirected_to_login() {
        let anonymous = SessionContext::anonymous();
        assert_eq!(RouteGuard::evaluate(&anonymous, None), RouteDecision::RedirectToLogin);
        assert_eq!(
            RouteGuard::evaluate(&anonymous, Some(Role::User)),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_user_blocked_from_admin_routes() {
        let user = session(Some(Role::User));
        assert_eq!(RouteGuard::evaluate(&user, Some(Role::User)), RouteDecision::Allow);
        assert_eq!(
            RouteGuard::evaluate(&user, Some(Role::Admin)),
            RouteDecision::RedirectToDashboard
        );
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let admin = session(Some(Role::Admin));
        assert_eq!(RouteGuard::evaluate(&admin, None), RouteDecision::Allow);
        assert_eq!(RouteGuard::evaluate(&admin, Some(Role::User)), RouteDecision::Allow);
        assert_eq!(RouteGuard::evaluate(&admin, Some(Role::Admin)), RouteDecision::Allow);
    }

    #[test]
    fn test_missing_role_satisfies_nothing() {
        let unassigned = session(None);
        assert!(!unassigned.has_role(Role::User));
        assert_eq!(unassigned.effective_role(), Role::User);
        assert_eq!(
            RouteGuard::evaluate(&unassigned, Some(Role::User)),
            RouteDecision::RedirectToDashboard
        );
        assert_eq!(RouteGuard::evaluate(&unassigned, None), RouteDecision::Allow);
    }

    #[test]
    fn test_sign_out_tears_down() {
        let mut ctx = session(Some(Role::Admin));
        ctx.apply(&AuthEvent::SignedOut);
        assert_eq!(ctx, SessionContext::anonymous());
    }

    #[test]
    fn test_sign_in_as_other_user_drops_derived_state() {
        let mut ctx = session(Some(Role::Admin));
        let other = AuthUser { id: Uuid::new_v4(), email: None };
        ctx.apply(&AuthEvent::SignedIn(other.clone()));
        assert_eq!(ctx.user, Some(other));
        assert_eq!(ctx.role, None);
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(RouteDecision::RedirectToLogin.redirect_target(), Some("/login"));
        assert_eq!(RouteDecision::RedirectToDashboard.redirect_target(), Some("/dashboard"));
        assert_eq!(RouteDecision::Allow.redirect_target(), None);
    }
}
