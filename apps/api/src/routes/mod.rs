pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::readiness_handler))
        .route("/api/v1/talent-match", post(handlers::handle_talent_match))
        .route(
            "/api/v1/talent-match/candidates/:employee_id",
            post(handlers::handle_candidate_detail),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::matching::pipeline::tests::sample_snapshot;
    use crate::store::memory::InMemoryAttributeStore;

    fn app(store: InMemoryAttributeStore) -> Router {
        build_router(AppState {
            store: Arc::new(store),
        })
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(InMemoryAttributeStore::unavailable())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_reports_unreachable_source() {
        let response = app(InMemoryAttributeStore::unavailable())
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_talent_match_ranked_output() {
        let (status, body) = post_json(
            app(InMemoryAttributeStore::new(sample_snapshot())),
            "/api/v1/talent-match",
            json!({ "role_name": "Data Analyst", "benchmark_ids": ["E1"] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"]["role_name"], "Data Analyst");
        let ranked = body["ranked"].as_array().unwrap();
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0]["employee_id"], "E1");
        assert_eq!(ranked[0]["final_match_rate"], 100.0);
        assert_eq!(body["rows"].as_array().unwrap().len(), 40);
        assert_eq!(body["rows"][0]["tgv_name"], "Leadership");
        assert_eq!(body["baselines"].as_array().unwrap().len(), 10);
        assert_eq!(body["distribution"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_talent_match_rejects_empty_benchmark() {
        let (status, body) = post_json(
            app(InMemoryAttributeStore::new(sample_snapshot())),
            "/api/v1/talent-match",
            json!({ "benchmark_ids": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_talent_match_source_unavailable_is_fatal() {
        let (status, body) = post_json(
            app(InMemoryAttributeStore::unavailable()),
            "/api/v1/talent-match",
            json!({ "benchmark_ids": ["E1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_talent_match_unknown_benchmark_is_empty_not_error() {
        let (status, body) = post_json(
            app(InMemoryAttributeStore::new(sample_snapshot())),
            "/api/v1/talent-match",
            json!({ "benchmark_ids": ["GHOST"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing_benchmark_ids"], json!(["GHOST"]));
        assert!(body["ranked"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_detail() {
        let (status, body) = post_json(
            app(InMemoryAttributeStore::new(sample_snapshot())),
            "/api/v1/talent-match/candidates/E4",
            json!({ "benchmark_ids": ["E1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["final_match_rate"], 92.5);
        assert_eq!(body["tgv_comparison"].as_array().unwrap().len(), 4);
        assert_eq!(body["tv_breakdown"][0]["tv_name"], "Cognitive_Filter");
    }

    #[tokio::test]
    async fn test_candidate_detail_not_found() {
        let (status, _) = post_json(
            app(InMemoryAttributeStore::new(sample_snapshot())),
            "/api/v1/talent-match/candidates/E5",
            json!({ "benchmark_ids": ["E1"] }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
