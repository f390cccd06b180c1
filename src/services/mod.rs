//! Services module
//!
//! The external collaborators the client core consumes: authentication,
//! elections and notifications. Each is a trait so a networked backend can
//! replace the in-memory implementations.

pub mod auth;
pub mod election;
pub mod notification;

// Re-export commonly used services
pub use auth::{AuthGrant, AuthService, MockAuthService, RoleClaims, TokenService};
pub use election::{ElectionFilter, ElectionService, InMemoryElectionService};
pub use notification::{InMemoryNotificationService, NotificationService};

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::utils::helpers::Clock;

/// Service factory bundling one implementation of every service
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: Arc<dyn AuthService>,
    pub election_service: Arc<dyn ElectionService>,
    pub notification_service: Arc<dyn NotificationService>,
}

impl ServiceFactory {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        election_service: Arc<dyn ElectionService>,
        notification_service: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            auth_service,
            election_service,
            notification_service,
        }
    }

    /// In-memory services seeded with the demo data, anchored at the clock's current time
    pub fn in_memory(settings: &Settings, clock: Arc<dyn Clock>) -> Self {
        let auth_service = MockAuthService::new(settings.clone(), clock.clone());
        let election_service = InMemoryElectionService::with_demo_data(settings, clock.clone());
        let notification_service = InMemoryNotificationService::with_demo_data(settings, clock);

        Self::new(
            Arc::new(auth_service),
            Arc::new(election_service),
            Arc::new(notification_service),
        )
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory").finish_non_exhaustive()
    }
}
