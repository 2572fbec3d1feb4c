//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schemas they exchange.
//! Swagger UI serves it under `/api-doc`, and the `openapi-dump` binary
//! prints it for external tooling.

use crate::inbound::http::liqueurs::{
    CreateLiqueurRequestBody, DeleteResultResponse, LiqueurResponse, UpdateLiqueurRequestBody,
    UpdateResultResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Liqueur API",
        description = "CRUD operations over the liqueur catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::welcome,
        crate::inbound::http::liqueurs::create_liqueur,
        crate::inbound::http::liqueurs::list_liqueurs,
        crate::inbound::http::liqueurs::get_liqueur,
        crate::inbound::http::liqueurs::update_liqueur,
        crate::inbound::http::liqueurs::delete_liqueur,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LiqueurResponse,
        CreateLiqueurRequestBody,
        UpdateLiqueurRequestBody,
        UpdateResultResponse,
        DeleteResultResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "liqueurs", description = "Liqueur catalogue"),
        (name = "root", description = "Service landing page"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
