//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Async access goes through `diesel-async` with a `bb8` pool. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) are internal; only the
//! repository, the pool and the migration entry point are exported.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselLiqueurRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/liqueurs")).await?;
//! let repository = DieselLiqueurRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_liqueur_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_liqueur_repository::DieselLiqueurRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
