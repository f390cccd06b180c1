//! Session manager
//!
//! Holds the signed-in user. The role is never derived on the client: it is
//! taken from the verified role claim the auth service signs, and a user record
//! that disagrees with its claim is refused.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::models::user::{LoginRequest, RegisterRequest, User, UserRole};
use crate::services::auth::{AuthGrant, AuthService, RoleClaims, TokenService};
use crate::utils::errors::{AuthError, NavigationError, Result};

/// An established session
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub claims: RoleClaims,
    pub token: String,
    pub started_at: DateTime<Utc>,
}

pub struct SessionManager {
    auth_service: Arc<dyn AuthService>,
    tokens: TokenService,
    session: Option<Session>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(auth_service: Arc<dyn AuthService>, tokens: TokenService) -> Self {
        Self {
            auth_service,
            tokens,
            session: None,
        }
    }

    /// Sign in. Empty username or password fails before the service is called.
    pub async fn login(&mut self, request: &LoginRequest, now: DateTime<Utc>) -> Result<&User> {
        if !request.is_complete() {
            return Err(AuthError::MissingFields.into());
        }

        let grant = self.auth_service.authenticate(request).await?;
        self.establish(grant, now)
    }

    /// Create an account and sign in with it
    pub async fn register(&mut self, request: &RegisterRequest, now: DateTime<Utc>) -> Result<&User> {
        request.validate()?;

        let grant = self.auth_service.register(request).await?;
        self.establish(grant, now)
    }

    /// Verify the grant's token and make it the current session
    pub fn establish(&mut self, grant: AuthGrant, now: DateTime<Utc>) -> Result<&User> {
        let claims = self.tokens.verify(&grant.token, now)?;

        if claims.sub != grant.user.id || claims.username != grant.user.username {
            warn!(user_id = %grant.user.id, "Role token issued for a different user");
            return Err(AuthError::InvalidClaim("token subject does not match user".to_string()).into());
        }
        if claims.role != grant.user.role {
            warn!(user_id = %grant.user.id, claimed = %claims.role, "User role disagrees with signed claim");
            return Err(AuthError::InvalidClaim(format!(
                "user role {} does not match claim {}",
                grant.user.role, claims.role
            ))
            .into());
        }

        info!(user_id = %grant.user.id, role = %claims.role, "Session established");
        let session = self.session.insert(Session {
            user: grant.user,
            claims,
            token: grant.token,
            started_at: now,
        });
        Ok(&session.user)
    }

    /// Clear the session. Safe to call when signed out.
    pub fn logout(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(session) = &session {
            info!(user_id = %session.user.id, "Session ended");
        }
        session
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<UserRole> {
        self.session.as_ref().map(|s| s.claims.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The signed-in user, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<&User> {
        self.current_user()
            .ok_or_else(|| NavigationError::NotAuthenticated.into())
    }
}
