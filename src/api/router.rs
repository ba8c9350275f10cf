//! HTTP router assembly

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use crate::infrastructure::observability::{PrometheusMetrics, create_metrics_router};

/// Health probes, the `/api` read surface and, when enabled, the metrics endpoint
pub fn create_router(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", handlers::create_dashboard_router())
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics, metrics_path));
    }

    // Outermost last: the request id must exist before logging reads it
    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::LocationCatalog;
    use crate::domain::geo::EARTH_RADIUS_KM;
    use crate::infrastructure::assistant::AssistantService;
    use crate::infrastructure::http::mock::MockHttpClient;
    use crate::infrastructure::services::dashboard_service::test_support::{
        OVERPASS_URL, offline_client, service,
    };

    fn app(client: MockHttpClient) -> Router {
        let state = AppState::new(Arc::new(service(client)), AssistantService::disabled());
        create_router(state, None, "/metrics")
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_news_with_every_feed_down_still_answers() {
        let app = app(offline_client());

        let (status, body) = get_json(&app, "/api/news?language=english&category=all").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["total"].as_u64().unwrap() >= 1);
        assert_eq!(body["sourceStatus"], "fallback-default");
        assert_eq!(body["language"], "english");
        assert_eq!(body["category"], "all");
        assert!(body["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_query_values_use_defaults() {
        let app = app(offline_client());

        let (_, news) = get_json(&app, "/api/news?language=klingon&category=sports").await;
        assert_eq!(news["language"], "english");
        assert_eq!(news["category"], "all");

        let (_, prices) = get_json(&app, "/api/market-prices?location=atlantis").await;
        assert_eq!(prices["location"]["slug"], "vijayawada");
    }

    #[tokio::test]
    async fn test_market_prices_identical_within_a_day() {
        let app = app(offline_client());

        let (status, first) = get_json(&app, "/api/market-prices?location=vijayawada").await;
        let (_, second) = get_json(&app, "/api/market-prices?location=vijayawada").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!first["prices"].as_array().unwrap().is_empty());
        assert_eq!(first["prices"], second["prices"]);
        assert_eq!(first["date"], "2026-10-19");
    }

    #[tokio::test]
    async fn test_weather_unavailable_is_200() {
        let app = app(offline_client());

        let (status, body) = get_json(&app, "/api/weather?location=guntur").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], false);
        assert_eq!(body["location"]["slug"], "guntur");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_hospitals_nearest_first() {
        let origin = LocationCatalog::default_location().coordinates;
        let node = |id: u64, km: f64| {
            json!({
                "type": "node", "id": id,
                "lat": origin.lat + km / EARTH_RADIUS_KM.to_radians(), "lon": origin.lon,
                "tags": {"name": format!("Hospital {}", id), "amenity": "hospital"}
            })
        };
        let client = MockHttpClient::new().with_json(
            OVERPASS_URL,
            json!({"elements": [node(1, 5.2), node(2, 1.1), node(3, 3.4)]}),
        );
        let app = app(client);

        let (status, body) = get_json(&app, "/api/hospitals?location=vijayawada").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["sourceStatus"], "live");
        let distances: Vec<f64> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["distanceKm"].as_f64().unwrap())
            .collect();
        assert_eq!(distances, vec![1.1, 3.4, 5.2]);
    }

    #[tokio::test]
    async fn test_blood_banks_fall_back_to_helpline() {
        let app = app(offline_client());

        let (status, body) = get_json(&app, "/api/blood-banks").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["sourceStatus"], "fallback-default");
    }

    #[tokio::test]
    async fn test_assistant_without_backend() {
        let app = app(offline_client());

        let (status, body) = post_json(
            &app,
            "/api/assistant",
            r#"{"message":"When should I sow groundnut?","language":"te"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["response"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_assistant_malformed_body() {
        let app = app(offline_client());

        let (status, body) = post_json(&app, "/api/assistant", "{\"message\": 42}").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_locations_and_status() {
        let app = app(offline_client());

        let (_, locations) = get_json(&app, "/api/locations").await;
        assert_eq!(
            locations["locations"].as_array().unwrap().len(),
            LocationCatalog::all().len()
        );
        assert_eq!(locations["defaultLocation"], "vijayawada");

        get_json(&app, "/api/news").await;
        let (_, status) = get_json(&app, "/api/status").await;
        assert_eq!(status["total"], 1);
        assert_eq!(status["entries"][0]["key"], "news:english");
    }

    #[tokio::test]
    async fn test_ready_degraded_until_cache_filled() {
        let app = app(offline_client());

        let (status, before) = get_json(&app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(before["status"], "degraded");

        get_json(&app, "/api/news").await;
        let (_, after) = get_json(&app, "/ready").await;
        assert_eq!(after["status"], "healthy");
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = app(offline_client());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
