use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::host::HostClient;
use crate::logic::SpecEvolutionPipeline;
use crate::model::{
    CatalogueId, ResolveError, SpecEvolution, SpecEvolutionSummary, UserContext,
};

pub type AppState<H> = Arc<H>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Catalogue entry view returned by the catalogue endpoint. The id echoes
/// back the opaque encoded form the client used.
#[derive(Debug, Serialize)]
pub struct CatalogueResponse {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub manifest_url: String,
}

/// Map a resolution error onto the transport taxonomy: not-found is 404,
/// a structurally broken entry is 400, host transport failure is 500. The
/// resolver's message passes through unchanged.
pub fn error_status(err: &ResolveError) -> StatusCode {
    match err {
        ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
        ResolveError::Config(_) => StatusCode::BAD_REQUEST,
        ResolveError::Host(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn into_response_error(err: ResolveError) -> (StatusCode, Json<ErrorResponse>) {
    (error_status(&err), Json(ErrorResponse::new(&err.to_string())))
}

/// GET /catalogues/{encoded_id}
pub async fn get_catalogue<H: HostClient>(
    Path(encoded_id): Path<String>,
    State(host): State<AppState<H>>,
    user: UserContext,
) -> Result<Json<CatalogueResponse>, (StatusCode, Json<ErrorResponse>)> {
    let catalogue_id = CatalogueId::decode(&encoded_id).map_err(into_response_error)?;
    let resolved = SpecEvolutionPipeline::resolve_catalogue(&*host, &catalogue_id, &user)
        .await
        .map_err(into_response_error)?;

    let mut interfaces: Vec<String> = resolved
        .catalogue
        .interfaces
        .as_ref()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    interfaces.sort();

    Ok(Json(CatalogueResponse {
        id: catalogue_id.encode(),
        name: catalogue_id.catalogue_name().to_string(),
        title: resolved.catalogue.title.clone(),
        description: resolved.catalogue.description.clone(),
        interfaces,
        manifest_url: resolved.manifest_url,
    }))
}

/// GET /catalogues/{encoded_id}/interfaces/{interface_name}
pub async fn get_interface_evolution<H: HostClient>(
    Path((encoded_id, interface_name)): Path<(String, String)>,
    State(host): State<AppState<H>>,
    user: UserContext,
) -> Result<Json<SpecEvolution>, (StatusCode, Json<ErrorResponse>)> {
    let catalogue_id = CatalogueId::decode(&encoded_id).map_err(into_response_error)?;
    SpecEvolutionPipeline::resolve_evolution(&*host, &catalogue_id, &interface_name, &user)
        .await
        .map(Json)
        .map_err(into_response_error)
}

/// GET /catalogues/{encoded_id}/interfaces/{interface_name}/summary
pub async fn get_interface_summary<H: HostClient>(
    Path((encoded_id, interface_name)): Path<(String, String)>,
    State(host): State<AppState<H>>,
    user: UserContext,
) -> Result<Json<SpecEvolutionSummary>, (StatusCode, Json<ErrorResponse>)> {
    let catalogue_id = CatalogueId::decode(&encoded_id).map_err(into_response_error)?;
    SpecEvolutionPipeline::resolve_summary(&*host, &catalogue_id, &interface_name, &user)
        .await
        .map(Json)
        .map_err(into_response_error)
}
