//! Test helpers module
//!
//! Shared setup for the integration tests: a fixed clock, in-memory services
//! and a few ready-made forms.

pub mod failing_service;
pub mod test_context;

pub use failing_service::*;
pub use test_context::*;
pub use test_data::*;
