//! PostgreSQL-backed user directory and film catalogue lookups.
//!
//! Both tables are owned by external catalogues; these adapters only read
//! them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FilmCatalogue, FilmCatalogueError, UserDirectory, UserDirectoryError};
use crate::domain::{FilmId, UserId, UserProfile};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::{films, users};

/// Diesel-backed implementation of [`UserDirectory`].
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory adapter with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use filmorate::outbound::persistence::{DbPool, DieselUserDirectory, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/filmorate")).await?;
    /// let directory = DieselUserDirectory::new(pool);
    /// # let _ = directory;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_user_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, UserDirectoryError::connection)
}

fn map_user_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn exists(&self, id: UserId) -> Result<bool, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        diesel::select(diesel::dsl::exists(users::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_user_diesel_error)
    }

    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;
        Ok(row.map(UserProfile::from))
    }
}

/// Diesel-backed implementation of [`FilmCatalogue`].
#[derive(Clone)]
pub struct DieselFilmCatalogue {
    pool: DbPool,
}

impl DieselFilmCatalogue {
    /// Create a catalogue reader over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilmCatalogue for DieselFilmCatalogue {
    async fn exists(&self, id: FilmId) -> Result<bool, FilmCatalogueError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, FilmCatalogueError::connection))?;
        diesel::select(diesel::dsl::exists(films::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    FilmCatalogueError::query,
                    FilmCatalogueError::connection,
                )
            })
    }
}
