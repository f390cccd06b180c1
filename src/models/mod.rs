//! Data models module

pub mod election;
pub mod notification;
pub mod request;
pub mod user;

pub use election::*;
pub use notification::*;
pub use request::*;
pub use user::*;
