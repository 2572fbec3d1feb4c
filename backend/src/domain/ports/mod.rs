//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod liqueur_repository;

#[cfg(test)]
pub use liqueur_repository::MockLiqueurRepository;
pub use liqueur_repository::{LiqueurRepository, LiqueurRepositoryError};
