//! Test utilities for the social core.
//!
//! This module provides shared doubles for unit tests (in `src/`) and
//! integration tests (in `tests/`). It is compiled for tests and when the
//! `test-support` feature is enabled.

mod clock;
mod memory;

pub use clock::MutableClock;
pub use memory::InMemorySocialStore;
