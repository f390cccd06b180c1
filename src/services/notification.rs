//! Notification service implementation
//!
//! The feed is shared by every user of the in-memory backend; the user id is
//! accepted for the service contract and recorded in logs.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::settings::Settings;
use crate::models::notification::{Notification, NotificationKind};
use crate::repositories::{seed, NotificationStore};
use crate::utils::errors::Result;
use crate::utils::helpers::{generate_uuid, Clock};

/// Notification seam consumed by the dashboards and the notifications screen
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Mark the given notifications read. Unknown ids are ignored.
    async fn mark_read(&self, ids: &BTreeSet<String>) -> Result<()>;
}

#[derive(Debug)]
pub struct InMemoryNotificationService {
    store: RwLock<NotificationStore>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl InMemoryNotificationService {
    pub fn new(settings: &Settings, clock: Arc<dyn Clock>, notifications: Vec<Notification>) -> Self {
        Self {
            store: RwLock::new(NotificationStore::new(notifications)),
            clock,
            latency: settings.timing.mock_latency(),
        }
    }

    pub fn with_demo_data(settings: &Settings, clock: Arc<dyn Clock>) -> Self {
        let anchor = clock.now();
        Self::new(settings, clock, seed::demo_notifications(anchor))
    }

    /// Append a notification stamped with the current time
    pub async fn publish(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: generate_uuid(),
            message: message.into(),
            timestamp: self.clock.now(),
            read: false,
            kind,
        };
        self.store.write().await.push(notification.clone());
        notification
    }

    pub async fn unread_count(&self) -> usize {
        self.store.read().await.unread_count()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.simulate_latency().await;

        let notifications = self.store.read().await.all().to_vec();
        debug!(user_id = user_id, count = notifications.len(), "Listed notifications");
        Ok(notifications)
    }

    async fn mark_read(&self, ids: &BTreeSet<String>) -> Result<()> {
        self.simulate_latency().await;

        let changed = self.store.write().await.mark_read(ids);
        debug!(requested = ids.len(), changed = changed, "Marked notifications read");
        Ok(())
    }
}
