//! Test context for unified test setup
//!
//! Builds a client over in-memory services whose clock only moves when the
//! test advances it. The concrete services stay reachable for assertions.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use univote::config::Settings;
use univote::services::{
    ElectionService, InMemoryElectionService, InMemoryNotificationService, MockAuthService, NotificationService,
    ServiceFactory,
};
use univote::utils::ManualClock;
use univote::VotingClient;

/// Fixed "now" every test starts from: Monday, March 4 2024, noon UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub settings: Settings,
    pub clock: ManualClock,
    pub elections: Arc<InMemoryElectionService>,
    pub notifications: Arc<InMemoryNotificationService>,
    pub services: ServiceFactory,
}

/// Test configuration options
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Artificial delay of the election service only
    pub election_latency_ms: u64,
    /// Deadline applied by the client to every service call
    pub service_timeout_ms: Option<u64>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::new_with_config(TestConfig::default())
    }

    pub fn new_with_config(config: TestConfig) -> Self {
        let mut settings = Settings::default();
        if let Some(timeout) = config.service_timeout_ms {
            settings.timing.service_timeout_ms = timeout;
        }

        let clock = ManualClock::new(test_now());

        let mut election_settings = settings.clone();
        election_settings.timing.mock_latency_ms = config.election_latency_ms;
        let elections = Arc::new(InMemoryElectionService::with_demo_data(
            &election_settings,
            Arc::new(clock.clone()),
        ));
        let notifications = Arc::new(InMemoryNotificationService::with_demo_data(
            &settings,
            Arc::new(clock.clone()),
        ));

        let services = ServiceFactory::new(
            Arc::new(MockAuthService::new(settings.clone(), Arc::new(clock.clone()))),
            elections.clone(),
            notifications.clone(),
        );

        Self {
            settings,
            clock,
            elections,
            notifications,
            services,
        }
    }

    /// Fresh client on the auth screen
    pub fn client(&self) -> VotingClient {
        VotingClient::new(self.settings.clone(), self.services.clone(), Arc::new(self.clock.clone()))
    }

    /// Client whose election service is replaced
    pub fn client_with_elections(&self, elections: Arc<dyn ElectionService>) -> VotingClient {
        let services = ServiceFactory::new(
            self.services.auth_service.clone(),
            elections,
            self.services.notification_service.clone(),
        );
        VotingClient::new(self.settings.clone(), services, Arc::new(self.clock.clone()))
    }

    /// Client whose notification service is replaced
    pub fn client_with_notifications(&self, notifications: Arc<dyn NotificationService>) -> VotingClient {
        let services = ServiceFactory::new(
            self.services.auth_service.clone(),
            self.services.election_service.clone(),
            notifications,
        );
        VotingClient::new(self.settings.clone(), services, Arc::new(self.clock.clone()))
    }

    /// Client already signed in as `username` and sitting on its dashboard
    pub async fn signed_in(&self, username: &str) -> VotingClient {
        let mut client = self.client();
        client.login(username, "password").await.expect("login should succeed");
        client
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
