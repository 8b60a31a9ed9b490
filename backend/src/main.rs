//! Backend entry-point: loads settings, prepares storage, seeds default data
//! and serves the REST API.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use inventory_backend::inbound::http::health::HealthState;
use inventory_backend::outbound::memory::InMemoryStore;
use inventory_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use inventory_backend::outbound::security::{BcryptPasswordHasher, JwtSessionTokenIssuer};
use inventory_backend::settings::AppSettings;
use server::{AccountSecurity, ServerConfig, Storage, create_server, seed_default_data};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let storage = connect_storage(&settings).await?;
    let security = account_security(&settings, clock.clone());
    if settings.seed_defaults() {
        let outcome = seed_default_data(&storage, &security)
            .await
            .map_err(io::Error::other)?;
        info!(
            users_seeded = outcome.users_seeded,
            items_seeded = outcome.items_seeded,
            "default data checked"
        );
    }

    let config = ServerConfig::new(bind_addr, storage, security, clock)
        .with_request_timeout(settings.request_timeout());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "inventory backend listening");
    server.await
}

async fn connect_storage(settings: &AppSettings) -> io::Result<Storage> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; data is kept in memory only");
        return Ok(Storage::Memory(Arc::new(InMemoryStore::new())));
    };

    run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(io::Error::other)?;
    info!("connected to PostgreSQL");
    Ok(Storage::Postgres(pool))
}

fn account_security(settings: &AppSettings, clock: Arc<dyn Clock>) -> AccountSecurity {
    let tokens = match settings.token_secret() {
        Some(secret) => JwtSessionTokenIssuer::new(secret, settings.token_ttl(), clock),
        None => {
            warn!("no token secret configured; sessions will not survive a restart");
            JwtSessionTokenIssuer::with_random_secret(settings.token_ttl(), clock)
        }
    };
    AccountSecurity::new(
        Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost())),
        Arc::new(tokens),
    )
}
