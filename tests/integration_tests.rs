//! Integration tests entry point.
//!
//! Tests live in the integration subdirectory so they share one test binary
//! and the helpers in `integration/mod.rs`.

mod integration;

#[test]
fn integration_tests_module_loads() {
    integration::init_test_env();
}
