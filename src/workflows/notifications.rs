//! Notifications screen view state

use std::collections::BTreeSet;

use crate::models::notification::{Notification, NotificationFilter};

/// Filter and selection of the notifications screen. Dropped when the screen is left.
#[derive(Debug, Clone, Default)]
pub struct NotificationsView {
    filter: NotificationFilter,
    selected: BTreeSet<String>,
}

impl NotificationsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> NotificationFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: NotificationFilter) {
        self.filter = filter;
    }

    /// Select or deselect one notification; returns whether it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Hand over the selection for a mark-as-read call, leaving it empty
    pub fn take_selection(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.selected)
    }

    /// Apply the current filter to a feed
    pub fn visible<'a>(&self, notifications: &'a [Notification]) -> Vec<&'a Notification> {
        notifications.iter().filter(|n| self.filter.matches(n)).collect()
    }
}
