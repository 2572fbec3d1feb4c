//! Liqueur catalogue service library.
//!
//! Hexagonal layout: [`domain`] holds the record types and the repository
//! port, [`outbound`] the PostgreSQL and in-memory adapters, and [`inbound`]
//! the actix-web handlers.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
