//! OpenAPI documentation.

use crate::models::{HealthResponse, PriceQuote};
use axum::Json;
use utoipa::OpenApi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health_check,
        crate::api::handlers::get_cotacao,
    ),
    components(schemas(HealthResponse, PriceQuote)),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Quotes", description = "Exchange-rate quotes"),
    ),
    info(
        title = "Cotação API",
        version = "0.1.0",
        description = "Fetches, stores and serves the latest USD-BRL bid",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
