//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    DegreeOfAlcohol, Liqueur, LiqueurId, LiqueurName, LiqueurPatch, ManufacturingDate, NewLiqueur,
};

use super::schema::liqueurs;

/// Row read from the `liqueurs` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = liqueurs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LiqueurRow {
    pub id: Uuid,
    pub name: String,
    pub degree_of_alcohol: f64,
    pub manufacturing_date: DateTime<Utc>,
}

impl TryFrom<LiqueurRow> for Liqueur {
    type Error = String;

    fn try_from(row: LiqueurRow) -> Result<Self, Self::Error> {
        let name = LiqueurName::new(row.name)
            .map_err(|err| format!("liqueur {}: {err}", row.id))?;
        let degree_of_alcohol = DegreeOfAlcohol::new(row.degree_of_alcohol)
            .map_err(|err| format!("liqueur {}: {err}", row.id))?;
        let manufacturing_date = ManufacturingDate::new(row.manufacturing_date)
            .map_err(|err| format!("liqueur {}: {err}", row.id))?;
        Ok(Liqueur::new(
            LiqueurId::from_uuid(row.id),
            NewLiqueur {
                name,
                degree_of_alcohol,
                manufacturing_date,
            },
        ))
    }
}

/// Insertable row; `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = liqueurs)]
pub(crate) struct NewLiqueurRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub degree_of_alcohol: f64,
    pub manufacturing_date: DateTime<Utc>,
}

impl<'a> NewLiqueurRow<'a> {
    pub fn from_domain(liqueur: &'a Liqueur) -> Self {
        Self {
            id: *liqueur.id().as_uuid(),
            name: liqueur.name().as_ref(),
            degree_of_alcohol: liqueur.degree_of_alcohol().value(),
            manufacturing_date: liqueur.manufacturing_date().as_datetime(),
        }
    }
}

/// Changeset written after a patch has been applied to a loaded record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = liqueurs)]
pub(crate) struct LiqueurChangeset<'a> {
    pub name: Option<&'a str>,
    pub degree_of_alcohol: Option<f64>,
    pub manufacturing_date: Option<DateTime<Utc>>,
}

impl<'a> LiqueurChangeset<'a> {
    pub fn from_patch(patch: &'a LiqueurPatch) -> Self {
        Self {
            name: patch.name.as_ref().map(AsRef::as_ref),
            degree_of_alcohol: patch.degree_of_alcohol.map(DegreeOfAlcohol::value),
            manufacturing_date: patch
                .manufacturing_date
                .map(|date| date.as_datetime()),
        }
    }
}
