//! Navigation context
//!
//! Where the user currently is and which election the voting screen works on.

use chrono::{DateTime, Utc};

use super::navigation::Screen;
use crate::models::election::Election;

#[derive(Debug, Clone)]
pub struct NavigationContext {
    /// Screen currently shown
    pub current: Screen,
    /// Screen shown before the last transition
    pub previous: Option<Screen>,
    /// Election carried into the voting screen
    pub selected_election: Option<Election>,
    /// When the current screen was entered
    pub entered_at: DateTime<Utc>,
}

impl NavigationContext {
    /// Signed-out context on the auth screen
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current: Screen::Auth,
            previous: None,
            selected_election: None,
            entered_at: now,
        }
    }

    pub(crate) fn enter(&mut self, screen: Screen, election: Option<Election>, now: DateTime<Utc>) {
        self.previous = Some(self.current);
        self.current = screen;
        if election.is_some() {
            self.selected_election = election;
        }
        self.entered_at = now;
    }

    /// Back to the auth screen with nothing selected
    pub(crate) fn reset(&mut self, now: DateTime<Utc>) {
        self.previous = Some(self.current);
        self.current = Screen::Auth;
        self.selected_election = None;
        self.entered_at = now;
    }

    pub fn selected_election_id(&self) -> Option<&str> {
        self.selected_election.as_ref().map(|e| e.id.as_str())
    }

    /// Get context summary for logging
    pub fn summary(&self) -> String {
        format!(
            "screen={}, previous={}, election={}",
            self.current,
            self.previous.map(|s| s.as_str()).unwrap_or("none"),
            self.selected_election_id().unwrap_or("none")
        )
    }
}
