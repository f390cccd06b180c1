//! Integration tests module
//!
//! Organized by user journey (scenarios) and by screen workflow.

pub mod scenarios;
pub mod workflows;

use std::sync::Once;

use crate::helpers::{TestConfig, TestContext};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("univote=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Common setup function for integration tests
pub fn setup_integration_test() -> TestContext {
    init_test_logging();
    TestContext::new()
}

/// Setup with a slow election service
pub fn setup_slow_election_test(latency_ms: u64, timeout_ms: u64) -> TestContext {
    init_test_logging();
    TestContext::new_with_config(TestConfig {
        election_latency_ms: latency_ms,
        service_timeout_ms: Some(timeout_ms),
    })
}
