//! Port for liqueur persistence.
//!
//! The [`LiqueurRepository`] trait is the store contract the HTTP handlers
//! call into. Each handler performs exactly one repository call, so the port
//! mirrors the five operations of the public API one to one.
//!
//! "Not found" is never an error here: lookups return `None`, and updates or
//! deletes that match nothing report zero counts.

use async_trait::async_trait;

use crate::domain::{
    DeleteOutcome, Error, Liqueur, LiqueurId, LiqueurPatch, NewLiqueur, UpdateOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by liqueur repository adapters.
    pub enum LiqueurRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "liqueur repository connection failed: {message}",
        /// The store refused the write (for example a constraint violation).
        Rejected { message: String } =>
            "liqueur repository rejected the write: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "liqueur repository query failed: {message}",
    }
}

/// Store contract for liqueur records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiqueurRepository: Send + Sync {
    /// Persist a new record under a freshly generated identifier and return
    /// it as stored.
    async fn insert(&self, liqueur: NewLiqueur) -> Result<Liqueur, LiqueurRepositoryError>;

    /// Return every stored record in storage-native order.
    async fn find_all(&self) -> Result<Vec<Liqueur>, LiqueurRepositoryError>;

    /// Fetch a record by identifier; `None` when no record matches.
    async fn find_by_id(&self, id: &LiqueurId) -> Result<Option<Liqueur>, LiqueurRepositoryError>;

    /// Apply the fields present in `patch` to the matching record.
    ///
    /// Never creates a record. The outcome reports whether a record matched
    /// and whether any stored value actually changed.
    async fn update_by_id(
        &self,
        id: &LiqueurId,
        patch: LiqueurPatch,
    ) -> Result<UpdateOutcome, LiqueurRepositoryError>;

    /// Remove the matching record. Deleting an unknown id is a no-op that
    /// reports a zero count.
    async fn delete_by_id(&self, id: &LiqueurId) -> Result<DeleteOutcome, LiqueurRepositoryError>;
}

impl From<LiqueurRepositoryError> for Error {
    fn from(err: LiqueurRepositoryError) -> Self {
        match err {
            LiqueurRepositoryError::Connection { message } => Error::service_unavailable(message),
            LiqueurRepositoryError::Rejected { message } => Error::invalid_request(message),
            LiqueurRepositoryError::Query { message } => Error::internal(message),
        }
    }
}
