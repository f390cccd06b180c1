//! Screen workflows
//!
//! View state owned by a single screen: the ballot, the request form and the
//! notification selection. Each lives only while its screen is shown.

pub mod countdown;
pub mod notifications;
pub mod request;
pub mod vote;

pub use countdown::Countdown;
pub use notifications::NotificationsView;
pub use request::{validate_request, RequestState, RequestWorkflow};
pub use vote::{TimeRemaining, VoteState, VoteWorkflow};
