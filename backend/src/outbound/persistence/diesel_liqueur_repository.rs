//! PostgreSQL-backed `LiqueurRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{LiqueurRepository, LiqueurRepositoryError};
use crate::domain::{
    DeleteOutcome, Liqueur, LiqueurId, LiqueurPatch, NewLiqueur, UpdateOutcome,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LiqueurChangeset, LiqueurRow, NewLiqueurRow};
use super::pool::DbPool;
use super::schema::liqueurs;

/// Diesel-backed implementation of the [`LiqueurRepository`] port.
///
/// Listings are ordered by insertion time, then identifier, so repeated
/// reads of an unchanged table are stable.
#[derive(Clone)]
pub struct DieselLiqueurRepository {
    pool: DbPool,
}

impl DieselLiqueurRepository {
    /// Serve the port from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_liqueur(row: LiqueurRow) -> Result<Liqueur, LiqueurRepositoryError> {
    Liqueur::try_from(row).map_err(LiqueurRepositoryError::query)
}

fn affected(count: usize) -> Result<u64, LiqueurRepositoryError> {
    u64::try_from(count).map_err(|_| LiqueurRepositoryError::query("affected row count overflow"))
}

#[async_trait]
impl LiqueurRepository for DieselLiqueurRepository {
    async fn insert(&self, liqueur: NewLiqueur) -> Result<Liqueur, LiqueurRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = Liqueur::new(LiqueurId::random(), liqueur);

        diesel::insert_into(liqueurs::table)
            .values(&NewLiqueurRow::from_domain(&stored))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(id = %stored.id(), "liqueur inserted");
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Liqueur>, LiqueurRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LiqueurRow> = liqueurs::table
            .select(LiqueurRow::as_select())
            .order_by((liqueurs::created_at.asc(), liqueurs::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_liqueur).collect()
    }

    async fn find_by_id(&self, id: &LiqueurId) -> Result<Option<Liqueur>, LiqueurRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LiqueurRow> = liqueurs::table
            .filter(liqueurs::id.eq(id.as_uuid()))
            .select(LiqueurRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_liqueur).transpose()
    }

    async fn update_by_id(
        &self,
        id: &LiqueurId,
        patch: LiqueurPatch,
    ) -> Result<UpdateOutcome, LiqueurRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let current: Option<LiqueurRow> = liqueurs::table
            .filter(liqueurs::id.eq(id.as_uuid()))
            .select(LiqueurRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = current else {
            return Ok(UpdateOutcome::unmatched());
        };

        // An unchanged record must not be written: Diesel refuses an empty
        // changeset and the modified count has to stay at zero.
        let mut record = row_to_liqueur(row)?;
        if !patch.apply_to(&mut record) {
            return Ok(UpdateOutcome::matched(false));
        }

        let updated = diesel::update(liqueurs::table.filter(liqueurs::id.eq(id.as_uuid())))
            .set(&LiqueurChangeset::from_patch(&patch))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Zero rows here means a concurrent delete won the race.
        if updated == 0 {
            return Ok(UpdateOutcome::unmatched());
        }
        Ok(UpdateOutcome::matched(true))
    }

    async fn delete_by_id(&self, id: &LiqueurId) -> Result<DeleteOutcome, LiqueurRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(liqueurs::table.filter(liqueurs::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(DeleteOutcome {
            deleted_count: affected(deleted)?,
        })
    }
}
