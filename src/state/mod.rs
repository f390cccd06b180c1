//! State management module
//!
//! Session, screen navigation and the screen-lifetime task scope

pub mod context;
pub mod navigation;
pub mod scope;
pub mod session;

// Re-export commonly used state components
pub use context::NavigationContext;
pub use navigation::{NavigationController, Screen, ScreenNode};
pub use scope::{ScopeCanceller, ScreenScope};
pub use session::{Session, SessionManager};
