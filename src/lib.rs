//! UniVote
//!
//! Election, session and navigation core of a university voting client.
//! This library models the client's screens, the signed-in session, the
//! election and notification data, and the vote and election-request
//! workflows, independent of any UI toolkit. Backends are reached through
//! the service traits in [`services`].

pub mod client;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflows;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, UniVoteError};

// Re-export main components for easy access
pub use client::{Banner, DashboardSummary, ScreenView, VotingClient};
pub use services::ServiceFactory;
pub use state::{NavigationController, Screen, SessionManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
