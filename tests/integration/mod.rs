//! Shared helpers for integration tests.

pub mod http_roundtrip_test;
pub mod registry_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
