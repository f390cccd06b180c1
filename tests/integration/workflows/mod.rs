//! Screen workflow tests

pub mod notifications_test;
pub mod request_test;
pub mod voting_test;
