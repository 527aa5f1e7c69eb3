//! Social core for a film-rating platform.
//!
//! Provides the follow graph, the review ledger with vote-based usefulness,
//! and the append-only activity log, exposed as driving ports implemented by
//! domain services and backed by PostgreSQL adapters.

pub mod config;
pub mod domain;
pub mod outbound;
/// In-memory doubles shared by unit and integration tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
