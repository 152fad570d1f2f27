use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use redline_engine::RevisionEngine;

use crate::error::{ServerError, ServerResult};
use crate::handler;

/// Build the axum router with all review endpoints.
///
/// `allowed_origin` enables a credentialed CORS layer for that exact
/// origin; `None` leaves CORS off (same-origin or proxied deployments).
pub fn build_router(
    engine: Arc<RevisionEngine>,
    allowed_origin: Option<&str>,
) -> ServerResult<Router> {
    let mut router = Router::new()
        .route("/api/health", get(handler::health))
        .route("/api/assessment/:service", get(handler::assessment))
        .route("/api/metadata/:service", get(handler::metadata))
        .route("/api/accept_change/:service", post(handler::accept_change))
        .route("/api/reject_change/:service", post(handler::reject_change))
        .route(
            "/api/accept_block_change/:service",
            post(handler::accept_block_change),
        )
        .with_state(engine)
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = allowed_origin {
        router = router.layer(cors_layer(origin)?);
    }
    Ok(router)
}

fn cors_layer(origin: &str) -> ServerResult<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|err| ServerError::Config(format!("invalid allowed origin: {err}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
