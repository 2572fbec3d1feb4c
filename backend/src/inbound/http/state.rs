//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the domain port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::LiqueurRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Liqueur store shared by every worker.
    pub liqueurs: Arc<dyn LiqueurRepository>,
}

impl HttpState {
    /// Wrap the store handlers call into.
    pub fn new(liqueurs: Arc<dyn LiqueurRepository>) -> Self {
        Self { liqueurs }
    }
}
