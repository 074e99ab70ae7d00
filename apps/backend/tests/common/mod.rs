//! Common test utilities and fixtures for integration tests.
//!
//! Tests run against an in-memory catalog built from fixture level files,
//! so no external services are needed.

pub mod fixtures;

use axum::Router;

use dictation_backend::{build_router, AppState};
use dictation_core::{parse_level, AnswerChecker, Catalog, CheckerConfig, SubLevel};

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Create a context serving the fixture levels with default thresholds.
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    /// Create a context serving the fixture levels with the given thresholds.
    pub fn with_config(config: CheckerConfig) -> Self {
        let checker = AnswerChecker::try_new(config).expect("fixture config should be valid");
        let state = AppState::new(checker, fixture_catalog());

        Self {
            app: build_router(state),
        }
    }

    /// Create a context serving the fixture levels with custom sub-levels.
    pub fn with_sub_levels(sub_levels: Vec<SubLevel>) -> Self {
        let state =
            AppState::with_sub_levels(AnswerChecker::default(), fixture_catalog(), sub_levels);

        Self {
            app: build_router(state),
        }
    }

    /// Create a context with no items loaded.
    pub fn empty() -> Self {
        let state = AppState::new(AnswerChecker::default(), Catalog::new());
        Self {
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

fn fixture_catalog() -> Catalog {
    let levels = [fixtures::level1_json(), fixtures::level2_json()]
        .iter()
        .map(|content| parse_level(content).expect("fixture level should parse"))
        .collect::<Vec<_>>();
    Catalog::from_levels(levels)
}
