//! Apply the social core schema migrations and verify the pool can connect.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use color_eyre::eyre::{Context, Report, Result};
use filmorate::config::DatabaseSettings;
use filmorate::outbound::persistence::{DbPool, run_migrations};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let settings = DatabaseSettings::load_from_iter(std::env::args_os())
        .map_err(|err| Report::msg(err.to_string()).wrap_err("failed to load settings"))?;
    let pool_config = settings
        .to_pool_config()
        .wrap_err("invalid database settings")?;

    let url = pool_config.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;

    if applied.is_empty() {
        info!("schema already up to date");
    } else {
        for version in &applied {
            info!(%version, "applied migration");
        }
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build pool")?;
    drop(pool.get().await.wrap_err("pool checkout failed")?);
    info!(applied = applied.len(), "database ready");
    Ok(())
}
