//! Unit tests for the Aethel bridge
//!
//! This module contains tests for the various components of the bridge.

pub mod aethel_mock_tests;

/// Route log output through the test harness; safe to call repeatedly.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
