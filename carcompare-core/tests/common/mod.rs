//! Test helper functions for integration tests
//!
//! Shared across the integration test files using the tests/common/ pattern.

#![allow(dead_code)]

use carcompare_core::catalog::{CatalogStore, CatalogTree};
use std::path::PathBuf;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cars.json")
}

/// The shared fixture catalog as a tree
pub fn fixture_tree() -> CatalogTree {
    let content = std::fs::read_to_string(fixture_path()).expect("fixture should be readable");
    CatalogTree::from_json(&content).expect("fixture should parse")
}

/// A store loaded from the shared fixture
pub fn fixture_store() -> CatalogStore {
    init_test_logging();
    let store = CatalogStore::new();
    store
        .load_from_path(&fixture_path())
        .expect("fixture should load");
    store
}
