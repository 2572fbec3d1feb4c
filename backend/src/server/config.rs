//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use backend::domain::ports::LiqueurRepository;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) liqueurs: Arc<dyn LiqueurRepository>,
}

impl ServerConfig {
    /// Bundle the listen address with the store handlers will use.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, liqueurs: Arc<dyn LiqueurRepository>) -> Self {
        Self {
            bind_addr,
            liqueurs,
        }
    }

    /// Address the listener binds.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
