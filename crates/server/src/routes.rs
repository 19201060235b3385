use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use utoipa::OpenApi;

use common::types::Health;
use service::lookup::{LookupService, OutputFormat};

use crate::errors::JsonApiError;
use crate::observability;
use crate::openapi::ApiDoc;

pub type AppState = Arc<LookupService>;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/metrics", tag = "health", responses((status = 200, description = "Prometheus text exposition")))]
pub async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Resolve one wallpaper and redirect to it, or return it as JSON with `format=json`.
#[utoipa::path(
    get, path = "/v1", tag = "image",
    params(crate::openapi::ImageQueryDoc),
    responses(
        (status = 200, description = "Record and image URL (format=json)", body = crate::openapi::ImageViewDoc),
        (status = 307, description = "Redirect to the image URL"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "No image for the requested index or date", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store unreadable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_image(
    State(lookup): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, JsonApiError> {
    let _timer = observability::LOOKUP_DURATION.start_timer();

    let resolved = match lookup.parse_query(&pairs) {
        Ok(query) => lookup.resolve(&query).await.map(|view| (query, view)),
        Err(e) => Err(e),
    };
    let (query, view) = resolved.map_err(|e| {
        observability::LOOKUP_FAILURES_TOTAL.with_label_values(&[e.kind()]).inc();
        JsonApiError::from(e)
    })?;

    observability::LOOKUPS_TOTAL.with_label_values(&[query.selector.label()]).inc();
    info!(selector = query.selector.label(), startdate = %view.image.startdate, url = %view.url, "image lookup");

    Ok(match query.format {
        OutputFormat::Json => Json(view).into_response(),
        OutputFormat::Redirect => Redirect::temporary(&view.url).into_response(),
    })
}

/// Browsers may call the API from any page; only reads are exposed.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET])
}

/// Build the full application router
pub fn build_router(lookup: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/v1", get(get_image))
        .route("/v1/", get(get_image))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/openapi.json", get(openapi_json))
        .with_state(lookup)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
