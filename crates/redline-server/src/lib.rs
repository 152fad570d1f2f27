//! HTTP adapter for redline.
//!
//! Exposes the revision review engine over the API the review frontend
//! speaks: assessment and metadata reads, and accept / reject / block
//! mutations. The adapter is thin: handlers translate between HTTP and
//! [`RevisionEngine`](redline_engine::RevisionEngine) calls, and every
//! engine failure class maps to one status code.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::{ApplyResponse, HealthResponse};
pub use router::build_router;
pub use server::RedlineServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use redline_engine::{EngineConfig, RevisionEngine};
    use redline_store::InMemoryDocumentStore;
    use redline_types::ChangeDescriptor;

    fn test_router() -> (Router, Arc<RevisionEngine>) {
        let engine = Arc::new(RevisionEngine::new(
            Arc::new(InMemoryDocumentStore::new()),
            EngineConfig::default(),
        ));
        let router = build_router(engine.clone(), Some("http://localhost:3000")).unwrap();
        (router, engine)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &impl serde::Serialize) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = test_router();
        let response = app.oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_of_open_pair() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a\nb\nc").unwrap();
        engine.propose_update("svc", "a\nX\nc", None).unwrap();

        let response = app.oneshot(get("/api/assessment/svc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_service_is_404() {
        let (app, _) = test_router();
        let response = app.oneshot(get("/api/assessment/ghost")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_service_name_is_400() {
        let (app, _) = test_router();
        let response = app
            .oneshot(get("/api/assessment/bad%20name"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accept_change_mutates_and_converges() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a\nb\nc").unwrap();
        let descs = engine.propose_update("svc", "a\nX\nc", None).unwrap();

        let response = app
            .oneshot(post_json("/api/accept_change/svc", &descs[0]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = engine.assessment("svc").unwrap();
        assert_eq!(view.current_assessment, "a\nX\nc");
        assert!(view.is_converged());
    }

    #[tokio::test]
    async fn reject_change_restores_the_proposal() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a\nb\nc").unwrap();
        let descs = engine.propose_update("svc", "a\nX\nc", None).unwrap();

        let response = app
            .oneshot(post_json("/api/reject_change/svc", &descs[0]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = engine.assessment("svc").unwrap();
        assert_eq!(view.updated_assessment.as_deref(), Some("a\nb\nc"));
        assert!(!view.is_converged());
    }

    #[tokio::test]
    async fn block_endpoint_takes_a_bare_array() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a\nb\nc\nd\ne").unwrap();
        let descs = engine.propose_update("svc", "a\nX\nc\nY\ne", None).unwrap();

        let response = app
            .oneshot(post_json("/api/accept_block_change/svc", &descs))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(engine.assessment("svc").unwrap().is_converged());
    }

    #[tokio::test]
    async fn out_of_bounds_descriptor_is_400() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a\nb\nc").unwrap();
        engine.propose_update("svc", "a\nX\nc", None).unwrap();

        let stale = ChangeDescriptor::new(2, 9, 2, 3);
        let response = app
            .oneshot(post_json("/api/accept_change/svc", &stale))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn metadata_absent_is_404() {
        let (app, engine) = test_router();
        engine.save_baseline("svc", "a").unwrap();

        let response = app.oneshot(get("/api/metadata/svc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_echoes_the_allowed_origin() {
        let (app, _) = test_router();
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
    }
}
