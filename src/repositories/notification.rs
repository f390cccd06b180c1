//! Notification store implementation

use std::collections::BTreeSet;

use crate::models::notification::{Notification, NotificationFilter};

#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Notifications passing `filter`, in store order
    pub fn filter(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| filter.matches(n)).collect()
    }

    /// Mark every matching notification as read. Unknown ids are ignored.
    /// Returns how many notifications changed state.
    pub fn mark_read(&mut self, ids: &BTreeSet<String>) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut() {
            if ids.contains(&notification.id) && !notification.read {
                notification.read = true;
                changed += 1;
            }
        }
        changed
    }

    /// Recomputed on every call
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
