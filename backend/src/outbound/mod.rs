//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed stores using Diesel ORM.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic beyond the atomicity the
//! ports require.

pub mod persistence;
