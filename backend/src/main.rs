//! Backend entry-point: configuration, migrations, and server startup.

use actix_web::web;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mantenix::inbound::http::health::HealthState;
use mantenix::outbound::persistence::{DbPool, PoolConfig};
use mantenix::server::{ServerConfig, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    for migration in &applied {
        info!(migration = %migration, "applied migration");
    }
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;

    run_migrations(&config.database_url)?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("pool initialisation failed: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, pool)?;
    server.await
}
