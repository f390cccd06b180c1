//! In-memory repositories module
//!
//! Collections owned for the lifetime of a session: elections with their
//! candidates, notifications, and the pending election request queue.

pub mod election;
pub mod notification;
pub mod request;
pub mod seed;

// Re-export repositories
pub use election::ElectionRepository;
pub use notification::NotificationStore;
pub use request::RequestQueue;
