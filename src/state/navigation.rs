//! Screen navigation
//!
//! The client is a finite set of named screens. Every screen lists the screens
//! reachable from it; [`NavigationController::navigate`] checks a requested
//! transition against that table and the signed-in role before updating the
//! [`NavigationContext`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::NavigationContext;
use crate::models::election::Election;
use crate::models::user::UserRole;
use crate::utils::errors::{NavigationError, Result, UniVoteError};

/// Named client screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Auth,
    StudentDashboard,
    AdminDashboard,
    Voting,
    Notifications,
    RequestElection,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Auth,
        Screen::StudentDashboard,
        Screen::AdminDashboard,
        Screen::Voting,
        Screen::Notifications,
        Screen::RequestElection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Auth => "auth",
            Screen::StudentDashboard => "student-dashboard",
            Screen::AdminDashboard => "admin-dashboard",
            Screen::Voting => "voting",
            Screen::Notifications => "notifications",
            Screen::RequestElection => "request-election",
        }
    }

    /// Home screen for a role
    pub fn dashboard_for(role: UserRole) -> Screen {
        match role {
            UserRole::Student => Screen::StudentDashboard,
            UserRole::Admin => Screen::AdminDashboard,
        }
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(self, Screen::StudentDashboard | Screen::AdminDashboard)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = UniVoteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| {
                NavigationError::InvalidTransition {
                    from: "unknown".to_string(),
                    to: s.to_string(),
                }
                .into()
            })
    }
}

/// One entry of the transition table
#[derive(Debug, Clone)]
pub struct ScreenNode {
    pub screen: Screen,
    /// Human-readable title
    pub title: String,
    /// Screens reachable from this one, besides `auth` which every screen reaches by logging out
    pub next_screens: Vec<Screen>,
    /// Whether entering the screen needs a signed-in user
    pub requires_session: bool,
}

/// Transition table and navigation entry point
#[derive(Debug, Clone)]
pub struct NavigationController {
    screens: HashMap<Screen, ScreenNode>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Create a controller with the client's screens registered
    pub fn new() -> Self {
        let mut controller = Self {
            screens: HashMap::new(),
        };

        controller.register_default_screens();
        controller
    }

    fn register_default_screens(&mut self) {
        let dashboards = vec![Screen::StudentDashboard, Screen::AdminDashboard];
        let features = vec![Screen::Voting, Screen::Notifications, Screen::RequestElection];

        self.register(ScreenNode {
            screen: Screen::Auth,
            title: "Sign in".to_string(),
            next_screens: dashboards.clone(),
            requires_session: false,
        });
        self.register(ScreenNode {
            screen: Screen::StudentDashboard,
            title: "Student dashboard".to_string(),
            next_screens: features.clone(),
            requires_session: true,
        });
        self.register(ScreenNode {
            screen: Screen::AdminDashboard,
            title: "Admin dashboard".to_string(),
            next_screens: features,
            requires_session: true,
        });
        self.register(ScreenNode {
            screen: Screen::Voting,
            title: "Cast your vote".to_string(),
            next_screens: dashboards.clone(),
            requires_session: true,
        });
        self.register(ScreenNode {
            screen: Screen::Notifications,
            title: "Notifications".to_string(),
            next_screens: dashboards.clone(),
            requires_session: true,
        });
        self.register(ScreenNode {
            screen: Screen::RequestElection,
            title: "Request an election".to_string(),
            next_screens: dashboards,
            requires_session: true,
        });
    }

    pub fn register(&mut self, node: ScreenNode) {
        self.screens.insert(node.screen, node);
    }

    pub fn node(&self, screen: Screen) -> Option<&ScreenNode> {
        self.screens.get(&screen)
    }

    /// Whether the table allows `from -> to`, ignoring session and payload rules
    pub fn allows(&self, from: Screen, to: Screen) -> bool {
        if to == Screen::Auth {
            return true;
        }
        self.node(from)
            .map(|node| node.next_screens.contains(&to))
            .unwrap_or(false)
    }

    /// Move `context` to `to`.
    ///
    /// `role` is the signed-in role, `None` when signed out. A supplied election
    /// replaces the selected one; entering `voting` without any selection fails.
    /// Nothing in `context` changes when the transition is refused.
    pub fn navigate(
        &self,
        context: &mut NavigationContext,
        role: Option<UserRole>,
        to: Screen,
        election: Option<Election>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let from = context.current;

        if to == Screen::Auth {
            context.reset(now);
            return Ok(());
        }

        let node = self.node(to).ok_or_else(|| NavigationError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        let role = match role {
            Some(role) => role,
            None if node.requires_session => return Err(NavigationError::NotAuthenticated.into()),
            None => UserRole::Student,
        };

        if to.is_dashboard() && to != Screen::dashboard_for(role) {
            return Err(NavigationError::WrongDashboard {
                requested: to.to_string(),
            }
            .into());
        }

        if !self.allows(from, to) {
            return Err(NavigationError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        if to == Screen::Voting && election.is_none() && context.selected_election.is_none() {
            return Err(NavigationError::NoElectionSelected.into());
        }

        context.enter(to, election, now);
        Ok(())
    }
}
