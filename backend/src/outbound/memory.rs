//! Process-local liqueur store.
//!
//! Backs the service when no database URL is configured, and gives tests a
//! real adapter without a PostgreSQL cluster. Records are kept in insertion
//! order behind a mutex; nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{LiqueurRepository, LiqueurRepositoryError};
use crate::domain::{
    DeleteOutcome, Liqueur, LiqueurId, LiqueurPatch, NewLiqueur, UpdateOutcome,
};

/// In-memory implementation of the [`LiqueurRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryLiqueurRepository {
    records: Mutex<Vec<Liqueur>>,
}

impl InMemoryLiqueurRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Liqueur>>, LiqueurRepositoryError> {
        self.records
            .lock()
            .map_err(|_| LiqueurRepositoryError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl LiqueurRepository for InMemoryLiqueurRepository {
    async fn insert(&self, liqueur: NewLiqueur) -> Result<Liqueur, LiqueurRepositoryError> {
        let stored = Liqueur::new(LiqueurId::random(), liqueur);
        self.lock()?.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Liqueur>, LiqueurRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: &LiqueurId) -> Result<Option<Liqueur>, LiqueurRepositoryError> {
        Ok(self.lock()?.iter().find(|record| record.id() == *id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &LiqueurId,
        patch: LiqueurPatch,
    ) -> Result<UpdateOutcome, LiqueurRepositoryError> {
        let mut records = self.lock()?;
        let outcome = match records.iter_mut().find(|record| record.id() == *id) {
            Some(record) => UpdateOutcome::matched(patch.apply_to(record)),
            None => UpdateOutcome::unmatched(),
        };
        Ok(outcome)
    }

    async fn delete_by_id(&self, id: &LiqueurId) -> Result<DeleteOutcome, LiqueurRepositoryError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| record.id() != *id);
        let deleted_count = u64::try_from(before - records.len())
            .map_err(|_| LiqueurRepositoryError::query("deleted count overflow"))?;
        Ok(DeleteOutcome { deleted_count })
    }
}
