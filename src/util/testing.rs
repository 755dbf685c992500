//! Test setup and catalog fixtures shared by unit and integration tests.

use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Catalog, Course};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "coursenav=trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Course fixture: name mirrors the code, no prerequisites, no credits.
pub fn course(code: &str, category: &[&str]) -> Course {
    Course::new(
        code,
        format!("Course {code}"),
        category.iter().map(|s| s.to_string()).collect(),
    )
}

/// Two-level catalog used across tests:
///
/// ```text
/// Major
/// ├── Required   GB101, GB102 (needs GB101)
/// └── Elective   GB201 (needs GB999, never satisfiable)
/// Liberal Arts   LA100
/// ```
pub fn sample_catalog() -> Catalog {
    let courses = vec![
        course("GB101", &["Major", "Required"]).with_credits(2.0),
        course("GB102", &["Major", "Required"])
            .with_prerequisites(vec!["GB101".into()])
            .with_credits(2.0),
        course("GB201", &["Major", "Elective"])
            .with_prerequisites(vec!["GB999".into()])
            .with_credits(1.0),
        course("LA100", &["Liberal Arts"]).with_credits(1.0),
    ];
    match Catalog::new(courses) {
        Ok(catalog) => catalog,
        Err(e) => panic!("sample catalog is invalid: {e}"),
    }
}
