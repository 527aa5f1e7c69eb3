//! Per-test databases on an embedded cluster, migrated and seeded.
//!
//! Databases are created and seeded through `postgres` so no Diesel
//! transaction wraps `CREATE DATABASE`. Schema setup reuses the crate's
//! embedded migrations so test schemas never drift from production.

use filmorate::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;
use super::pg_embed::test_cluster;

/// A migrated database that lives as long as its cluster.
pub struct TestDatabase {
    url: String,
    _cluster: TestCluster,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Insert directory users with placeholder profiles.
    pub fn seed_users(&self, ids: &[i64]) -> Result<(), String> {
        let mut client = self.client()?;
        for id in ids {
            client
                .execute(
                    "INSERT INTO users (id, email, login, name, birthday) \
                     VALUES ($1, $2, $3, $4, DATE '1990-01-01')",
                    &[
                        id,
                        &format!("user{id}@example.test"),
                        &format!("user{id}"),
                        &format!("User {id}"),
                    ],
                )
                .map_err(|err| format_postgres_error(&err))?;
        }
        Ok(())
    }

    /// Insert catalogue films.
    pub fn seed_films(&self, ids: &[i64]) -> Result<(), String> {
        let mut client = self.client()?;
        for id in ids {
            client
                .execute(
                    "INSERT INTO films (id, name) VALUES ($1, $2)",
                    &[id, &format!("Film {id}")],
                )
                .map_err(|err| format_postgres_error(&err))?;
        }
        Ok(())
    }

    /// Count rows matching a scalar query such as `SELECT COUNT(*) ...`.
    pub fn count(&self, sql: &str) -> Result<i64, String> {
        let mut client = self.client()?;
        let row = client
            .query_one(sql, &[])
            .map_err(|err| format_postgres_error(&err))?;
        Ok(row.get(0))
    }

    /// Run a statement and return the number of rows it touched.
    pub fn execute(&self, sql: &str) -> Result<u64, String> {
        let mut client = self.client()?;
        client
            .execute(sql, &[])
            .map_err(|err| format_postgres_error(&err))
    }

    fn client(&self) -> Result<Client, String> {
        Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))
    }
}

/// Start a cluster, create a fresh database and apply migrations.
pub fn provision_database() -> Result<TestDatabase, String> {
    let cluster = test_cluster()?;
    let name = format!("filmorate_{}", Uuid::new_v4().simple());

    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    run_migrations(&url).map_err(|err| err.to_string())?;

    Ok(TestDatabase {
        url,
        _cluster: cluster,
    })
}
