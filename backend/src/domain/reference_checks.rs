//! Existence checks against the external user directory and film catalogue.
//!
//! Services call these before accepting an id as a foreign key so unknown
//! references surface as `NotFound` before anything is written.

use crate::domain::ports::{FilmCatalogue, FilmCatalogueError, UserDirectory, UserDirectoryError};
use crate::domain::{DomainError, FilmId, UserId};

pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> DomainError {
    match error {
        UserDirectoryError::Connection { message } => {
            DomainError::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            DomainError::internal(format!("user directory error: {message}"))
        }
    }
}

pub(crate) fn map_film_catalogue_error(error: FilmCatalogueError) -> DomainError {
    match error {
        FilmCatalogueError::Connection { message } => {
            DomainError::service_unavailable(format!("film catalogue unavailable: {message}"))
        }
        FilmCatalogueError::Query { message } => {
            DomainError::internal(format!("film catalogue error: {message}"))
        }
    }
}

pub(crate) fn user_not_found(id: UserId) -> DomainError {
    DomainError::not_found(format!("user {id} not found"))
}

pub(crate) async fn require_user<U>(users: &U, id: UserId) -> Result<(), DomainError>
where
    U: UserDirectory + ?Sized,
{
    if users.exists(id).await.map_err(map_user_directory_error)? {
        Ok(())
    } else {
        Err(user_not_found(id))
    }
}

pub(crate) async fn require_film<F>(films: &F, id: FilmId) -> Result<(), DomainError>
where
    F: FilmCatalogue + ?Sized,
{
    if films.exists(id).await.map_err(map_film_catalogue_error)? {
        Ok(())
    } else {
        Err(DomainError::not_found(format!("film {id} not found")))
    }
}
