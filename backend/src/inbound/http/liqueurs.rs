//! Liqueur CRUD handlers.
//!
//! ```text
//! POST   /api/liqueurs
//! GET    /api/liqueurs
//! GET    /api/liqueurs/{id}
//! PUT    /api/liqueurs/{id}
//! DELETE /api/liqueurs/{id}
//! ```
//!
//! Each handler converts its request into domain values, performs one
//! repository call and serialises the outcome. Unknown identifiers are not
//! errors: lookups answer `null` and writes report zero counts.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{DeleteOutcome, Liqueur, LiqueurPatch, NewLiqueur, UpdateOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DEGREE_OF_ALCOHOL, DateInput, DegreeInput, MANUFACTURING_DATE, NAME, json_config, parse_degree,
    parse_id, parse_manufacturing_date, parse_name, require,
};

/// Request payload for creating a liqueur; every field is required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiqueurRequestBody {
    /// Non-blank display name.
    #[schema(example = "Johnnie Walker")]
    pub name: Option<String>,
    /// Number, or a numeric string.
    #[schema(value_type = f64, example = 40)]
    pub degree_of_alcohol: Option<DegreeInput>,
    /// `YYYY-MM-DD`, an RFC 3339 timestamp, or epoch milliseconds.
    #[schema(value_type = String, example = "2020-01-01")]
    pub manufacturing_date: Option<DateInput>,
}

/// Request payload for a partial update; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLiqueurRequestBody {
    /// Replacement name.
    #[schema(example = "Johnnie Walker")]
    pub name: Option<String>,
    /// Replacement degree; number or numeric string.
    #[schema(value_type = Option<f64>, example = 43)]
    pub degree_of_alcohol: Option<DegreeInput>,
    /// Replacement manufacturing date.
    #[schema(value_type = Option<String>, example = "2021-06-30")]
    pub manufacturing_date: Option<DateInput>,
}

fn parse_create_request(payload: CreateLiqueurRequestBody) -> ApiResult<NewLiqueur> {
    let CreateLiqueurRequestBody {
        name,
        degree_of_alcohol,
        manufacturing_date,
    } = payload;
    Ok(NewLiqueur {
        name: parse_name(require(name, NAME)?)?,
        degree_of_alcohol: parse_degree(require(degree_of_alcohol, DEGREE_OF_ALCOHOL)?)?,
        manufacturing_date: parse_manufacturing_date(require(
            manufacturing_date,
            MANUFACTURING_DATE,
        )?)?,
    })
}

fn parse_update_request(payload: UpdateLiqueurRequestBody) -> ApiResult<LiqueurPatch> {
    let UpdateLiqueurRequestBody {
        name,
        degree_of_alcohol,
        manufacturing_date,
    } = payload;
    Ok(LiqueurPatch {
        name: name.map(parse_name).transpose()?,
        degree_of_alcohol: degree_of_alcohol.map(parse_degree).transpose()?,
        manufacturing_date: manufacturing_date
            .map(parse_manufacturing_date)
            .transpose()?,
    })
}

/// Stored liqueur as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Liqueur)]
pub struct LiqueurResponse {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name.
    #[schema(example = "Johnnie Walker")]
    pub name: String,
    /// Alcohol content.
    #[schema(example = 40)]
    pub degree_of_alcohol: f64,
    /// RFC 3339 instant with millisecond precision.
    #[schema(example = "2020-01-01T00:00:00.000Z")]
    pub manufacturing_date: String,
}

impl From<Liqueur> for LiqueurResponse {
    fn from(value: Liqueur) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            degree_of_alcohol: value.degree_of_alcohol().value(),
            manufacturing_date: value.manufacturing_date().to_string(),
        }
    }
}

/// Outcome of `PUT /api/liqueurs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultResponse {
    /// Always true once the store answered.
    pub acknowledged: bool,
    /// Records matching the identifier.
    pub matched_count: u64,
    /// Records whose values changed.
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResultResponse {
    fn from(value: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: value.matched_count,
            modified_count: value.modified_count,
        }
    }
}

/// Outcome of `DELETE /api/liqueurs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResultResponse {
    /// Always true once the store answered.
    pub acknowledged: bool,
    /// Records removed.
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResultResponse {
    fn from(value: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: value.deleted_count,
        }
    }
}

/// Register the liqueur routes and their JSON body configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_liqueur)
        .service(list_liqueurs)
        .service(get_liqueur)
        .service(update_liqueur)
        .service(delete_liqueur);
}

/// Create a liqueur.
#[utoipa::path(
    post,
    path = "/api/liqueurs",
    request_body = CreateLiqueurRequestBody,
    responses(
        (status = 200, description = "Created liqueur", body = LiqueurResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["liqueurs"],
    operation_id = "createLiqueur"
)]
#[post("/api/liqueurs")]
pub async fn create_liqueur(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLiqueurRequestBody>,
) -> ApiResult<web::Json<LiqueurResponse>> {
    let new_liqueur = parse_create_request(payload.into_inner())?;
    let stored = state.liqueurs.insert(new_liqueur).await?;
    info!(id = %stored.id(), "liqueur created");
    Ok(web::Json(stored.into()))
}

/// List every liqueur.
#[utoipa::path(
    get,
    path = "/api/liqueurs",
    responses(
        (status = 200, description = "All liqueurs", body = Vec<LiqueurResponse>),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["liqueurs"],
    operation_id = "listLiqueurs"
)]
#[get("/api/liqueurs")]
pub async fn list_liqueurs(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LiqueurResponse>>> {
    let liqueurs = state.liqueurs.find_all().await?;
    Ok(web::Json(
        liqueurs.into_iter().map(LiqueurResponse::from).collect(),
    ))
}

/// Fetch one liqueur; the body is `null` when the id is unknown.
#[utoipa::path(
    get,
    path = "/api/liqueurs/{id}",
    params(("id" = String, Path, description = "Liqueur identifier (UUID)")),
    responses(
        (status = 200, description = "Matching liqueur, or null", body = Option<LiqueurResponse>),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["liqueurs"],
    operation_id = "getLiqueur"
)]
#[get("/api/liqueurs/{id}")]
pub async fn get_liqueur(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<LiqueurResponse>>> {
    let id = parse_id(&path.into_inner())?;
    let found = state.liqueurs.find_by_id(&id).await?;
    Ok(web::Json(found.map(LiqueurResponse::from)))
}

/// Apply a partial update.
#[utoipa::path(
    put,
    path = "/api/liqueurs/{id}",
    params(("id" = String, Path, description = "Liqueur identifier (UUID)")),
    request_body = UpdateLiqueurRequestBody,
    responses(
        (status = 200, description = "Update counts", body = UpdateResultResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["liqueurs"],
    operation_id = "updateLiqueur"
)]
#[put("/api/liqueurs/{id}")]
pub async fn update_liqueur(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateLiqueurRequestBody>,
) -> ApiResult<web::Json<UpdateResultResponse>> {
    let id = parse_id(&path.into_inner())?;
    let patch = parse_update_request(payload.into_inner())?;
    let outcome = state.liqueurs.update_by_id(&id, patch).await?;
    info!(
        %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "liqueur update applied"
    );
    Ok(web::Json(outcome.into()))
}

/// Delete a liqueur; unknown ids report a zero count.
#[utoipa::path(
    delete,
    path = "/api/liqueurs/{id}",
    params(("id" = String, Path, description = "Liqueur identifier (UUID)")),
    responses(
        (status = 200, description = "Delete count", body = DeleteResultResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["liqueurs"],
    operation_id = "deleteLiqueur"
)]
#[delete("/api/liqueurs/{id}")]
pub async fn delete_liqueur(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResultResponse>> {
    let id = parse_id(&path.into_inner())?;
    let outcome = state.liqueurs.delete_by_id(&id).await?;
    info!(%id, deleted = outcome.deleted_count, "liqueur delete applied");
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
#[path = "liqueurs_tests.rs"]
mod tests;
