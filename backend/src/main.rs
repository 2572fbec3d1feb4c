//! Service entry point: loads settings, selects the store and runs the HTTP
//! server.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::AppSettings;
use backend::domain::ports::LiqueurRepository;
use backend::inbound::http::health::HealthState;
use backend::outbound::memory::InMemoryLiqueurRepository;
use backend::outbound::persistence::{
    DbPool, DieselLiqueurRepository, PoolConfig, run_pending_migrations,
};

use server::{ServerConfig, create_server, drain};

async fn migrate(database_url: String) -> io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    info!(applied, "database schema up to date");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Open the configured store. The pool, when present, is returned so `main`
/// controls its lifetime explicitly.
async fn build_store(
    settings: &AppSettings,
) -> io::Result<(Arc<dyn LiqueurRepository>, Option<DbPool>)> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; using the in-memory store");
        return Ok((Arc::new(InMemoryLiqueurRepository::new()), None));
    };

    if settings.run_migrations() {
        migrate(database_url.clone()).await?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(io::Error::other)?;
    info!(max_size = settings.pool_max_size(), "using the PostgreSQL store");
    Ok((Arc::new(DieselLiqueurRepository::new(pool.clone())), Some(pool)))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_process()?;
    let bind_addr = settings.bind_addr()?;
    let (liqueurs, pool) = build_store(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, liqueurs))?;
    info!(%bind_addr, "liqueur service listening");

    let handle = server.handle();
    let drain_state = health_state.clone();
    let grace = settings.drain_grace();
    actix_web::rt::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            warn!(error = %e, "shutdown signal handler failed; stopping now");
        }
        drain(handle, drain_state, grace).await;
    });

    let result = server.await;
    drop(pool);
    info!("liqueur service stopped");
    result
}
