//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LIQUEUR_*` environment variables or a config
//! file. The conventional `DATABASE_URL` and `PORT` variables are honoured as
//! fallbacks when the prefixed forms are absent.

use std::env;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_DRAIN_GRACE_SECS: u64 = 5;

/// Configuration for the liqueur service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIQUEUR")]
pub struct AppSettings {
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Serve without applying the embedded migration first.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds liveness fails before the listener closes on shutdown.
    pub drain_grace_secs: Option<u64>,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when a value cannot be parsed.
    pub fn load_from_process() -> io::Result<Self> {
        Self::load().map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("invalid settings: {err}"))
        })
    }

    /// Connection string, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Interface to bind, defaulting to every IPv4 interface.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Listening port, falling back to `PORT` and then 3001.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when `PORT` is not a port number.
    pub fn port(&self) -> io::Result<u16> {
        if let Some(port) = self.port {
            return Ok(port);
        }
        match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("invalid PORT: {raw}"))
            }),
            Err(_) => Ok(DEFAULT_PORT),
        }
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address or the port is invalid.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("invalid host: {host}"))
        })?;
        Ok(SocketAddr::new(ip, self.port()?))
    }

    /// Whether start-up applies the embedded migration; true unless
    /// `skip_migrations` is set.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    /// Pool size, defaulting to 10 connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Shutdown grace period, defaulting to five seconds.
    pub fn drain_grace(&self) -> Duration {
        Duration::from_secs(self.drain_grace_secs.unwrap_or(DEFAULT_DRAIN_GRACE_SECS))
    }
}
