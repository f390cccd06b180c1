//! Authentication service implementation
//!
//! The auth service is the authority on who a user is and which role they hold.
//! It answers with an [`AuthGrant`]: the user record plus a signed token whose
//! [`RoleClaims`] the session verifies before trusting the role.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::settings::{AuthConfig, Settings};
use crate::models::user::{LoginRequest, RegisterRequest, User, UserRole};
use crate::utils::errors::{AuthError, Result};
use crate::utils::helpers::{generate_uuid, Clock};

const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face";

/// Claims carried by the role token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleClaims {
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

/// Successful authentication: the user and the signed role token vouching for it
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

/// Issues and verifies HS256 role tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_minutes: config.token_ttl_minutes,
        }
    }

    /// Sign a role token for `user`, valid from `issued_at` for the configured TTL
    pub fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = RoleClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            iat: issued_at.timestamp() as u64,
            exp: (issued_at + chrono::Duration::minutes(self.ttl_minutes)).timestamp() as u64,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Check signature and issuer, then expiry against `now`, and return the claims
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<RoleClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        // Expiry is checked below against the injected clock instead of the system time.
        validation.validate_exp = false;

        let data = decode::<RoleClaims>(token, &self.decoding_key, &validation)?;
        if data.claims.exp <= now.timestamp() as u64 {
            return Err(jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature).into());
        }
        Ok(data.claims)
    }
}

/// Authentication seam consumed by the session manager
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, request: &LoginRequest) -> Result<AuthGrant>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant>;
}

struct Account {
    user: User,
    password: String,
}

/// In-memory stand-in for the identity provider.
///
/// Registered accounts are kept for the lifetime of the service. Unknown usernames are
/// accepted with any non-empty password and get a role from the directory stub, which
/// grants admin to usernames containing "admin". That rule is placeholder logic and lives
/// here, behind the service boundary, so clients only ever see a signed role claim.
///
/// Directory users get an id derived from the username, so the same person keeps the
/// same id across logins.
pub struct MockAuthService {
    tokens: TokenService,
    settings: Settings,
    clock: Arc<dyn Clock>,
    accounts: RwLock<HashMap<String, Account>>,
    latency: Duration,
}

impl MockAuthService {
    pub fn new(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: TokenService::new(&settings.auth),
            latency: settings.timing.mock_latency(),
            accounts: RwLock::new(HashMap::new()),
            settings,
            clock,
        }
    }

    fn directory_id(username: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, username.as_bytes()).to_string()
    }

    fn directory_role(username: &str) -> UserRole {
        if username.contains("admin") {
            UserRole::Admin
        } else {
            UserRole::Student
        }
    }

    fn directory_user(&self, username: &str) -> User {
        User {
            id: Self::directory_id(username),
            username: username.to_string(),
            role: Self::directory_role(username),
            university: self.settings.app.default_university.clone(),
            department: self
                .settings
                .app
                .registration_departments
                .first()
                .cloned()
                .unwrap_or_default(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn grant(&self, user: User) -> Result<AuthGrant> {
        let token = self.tokens.issue(&user, self.clock.now())?;
        Ok(AuthGrant { user, token })
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn authenticate(&self, request: &LoginRequest) -> Result<AuthGrant> {
        self.simulate_latency().await;

        if !request.is_complete() {
            return Err(AuthError::MissingFields.into());
        }

        let accounts = self.accounts.read().await;
        let user = match accounts.get(&request.username) {
            Some(account) if account.password == request.password => account.user.clone(),
            Some(_) => {
                warn!(username = %request.username, "Password mismatch for registered account");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => self.directory_user(&request.username),
        };
        drop(accounts);

        debug!(user_id = %user.id, role = %user.role, "Authenticated user");
        self.grant(user)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant> {
        self.simulate_latency().await;

        request.validate()?;
        let role = request.role.ok_or(crate::utils::errors::ValidationError::MissingFields)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&request.username) {
            return Err(AuthError::UsernameTaken.into());
        }

        let user = User {
            id: generate_uuid(),
            username: request.username.clone(),
            role,
            university: request.university.clone(),
            department: request.department.clone(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
        };
        accounts.insert(
            request.username.clone(),
            Account {
                user: user.clone(),
                password: request.password.clone(),
            },
        );
        drop(accounts);

        info!(user_id = %user.id, role = %user.role, "Registered new user");
        self.grant(user)
    }
}
