//! Port for the externally owned film catalogue.

use async_trait::async_trait;

use crate::domain::FilmId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by film catalogue adapters.
    pub enum FilmCatalogueError {
        /// Catalogue connection could not be established.
        Connection { message: String } => "film catalogue connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "film catalogue query failed: {message}",
    }
}

/// Existence checks against the film catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilmCatalogue: Send + Sync {
    /// Report whether a film with this id exists.
    async fn exists(&self, id: FilmId) -> Result<bool, FilmCatalogueError>;
}
