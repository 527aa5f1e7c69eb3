//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL via
//! Diesel with async support through `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Validation lives in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One transaction per mutation**: follow and review writes append their
//!   activity event on the same connection before committing.
//! - **Typed errors**: Diesel and pool failures map to each port's error
//!   enum; foreign key violations become missing-reference variants.
//!
//! # Example
//!
//! ```rust,no_run
//! use filmorate::outbound::persistence::{DbPool, DieselReviewRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/filmorate")).await?;
//! let reviews = DieselReviewRepository::new(pool);
//! # let _ = reviews;
//! # Ok(())
//! # }
//! ```

mod diesel_activity_log;
mod diesel_error_mapping;
mod diesel_follow_repository;
mod diesel_review_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_activity_log::DieselActivityLog;
pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_directory::{DieselFilmCatalogue, DieselUserDirectory};
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
