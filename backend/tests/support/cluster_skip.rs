//! Skip policy for suites that need embedded PostgreSQL.
//!
//! Suites skip with a `SKIP-TEST-CLUSTER` marker when no cluster can be
//! bootstrapped. Setting `REQUIRE_TEST_CLUSTER` turns that into a failure so
//! CI cannot silently lose coverage.

fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// True when `REQUIRE_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
pub fn cluster_required() -> bool {
    is_truthy("REQUIRE_TEST_CLUSTER")
}

/// Report a cluster setup failure.
///
/// Prints a skip marker and returns `None`, or panics when the cluster is
/// required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
