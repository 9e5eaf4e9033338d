//! HTTP handlers for the VO endpoints.
//!
//! Query handlers decode the request, hand the parameters to the protocol's
//! orchestrator and wrap the resulting VOTable. All validation and error
//! mapping happens here; the service layer never sees raw HTTP.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, Instrument};
use uuid::Uuid;

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::parsing::{parse_query, RawQuery};
use crate::services::vosi::{self, VOSI_CONTENT_TYPE};
use crate::services::{ObservabilityProtocol, QueryOrchestrator};
use crate::votable::VOTABLE_CONTENT_TYPE;

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AppError>;

/// URL echoed in the `REQUEST` INFO: public base, request path and raw query.
pub fn request_url(public_base_url: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}{}?{}", public_base_url, uri.path(), query),
        None => format!("{}{}", public_base_url, uri.path()),
    }
}

fn xml_response(content_type: &'static str, body: String) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

async fn run_query<P: ObservabilityProtocol>(
    orchestrator: &QueryOrchestrator<P>,
    public_base_url: &str,
    uri: &Uri,
    pairs: Vec<(String, String)>,
) -> HandlerResult<Response> {
    let protocol = orchestrator.protocol().descriptor().name;
    let span = tracing::info_span!("vo_query", protocol, request_id = %Uuid::new_v4());

    async move {
        let params = parse_query(&RawQuery::from_pairs(pairs))?;
        let query_url = request_url(public_base_url, uri);
        let xml = orchestrator.run(&params, &query_url).await?;
        info!("{} query served ({} bytes)", protocol, xml.len());
        Ok(xml_response(VOTABLE_CONTENT_TYPE, xml))
    }
    .instrument(span)
    .await
}

// =============================================================================
// VO Queries
// =============================================================================

/// GET /objobssap/query
///
/// Visibility windows of a fixed target.
pub async fn objobssap_query(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<Response> {
    let Query(pairs) = query?;
    run_query(&state.objobssap, &state.public_base_url, &uri, pairs).await
}

/// GET /obsloctap/query
///
/// Planned observations inside a cone.
pub async fn obsloctap_query(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<Response> {
    let Query(pairs) = query?;
    run_query(&state.obsloctap, &state.public_base_url, &uri, pairs).await
}

// =============================================================================
// VOSI
// =============================================================================

/// GET /availability
pub async fn availability() -> HandlerResult<Response> {
    let xml = vosi::availability_document(vosi::service_started_at())?;
    Ok(xml_response(VOSI_CONTENT_TYPE, xml))
}

/// GET /capabilities
pub async fn capabilities(State(state): State<AppState>) -> HandlerResult<Response> {
    let xml = vosi::capabilities_document(&state.public_base_url)?;
    Ok(xml_response(VOSI_CONTENT_TYPE, xml))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.engine.name().to_string(),
    })
}
