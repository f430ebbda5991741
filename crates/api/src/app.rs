use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::TenantConfigStore;

use crate::config::Config;
use crate::middleware::{security_headers_middleware, trace_id};
use crate::routes::{health, settings, webhook};
use crate::services::ScreeningPipeline;

#[derive(Clone)]
pub struct AppState {
    pub store: TenantConfigStore,
    pub pipeline: Arc<ScreeningPipeline>,
    pub config: Arc<Config>,
}

pub fn create_app(
    config: Config,
    store: TenantConfigStore,
    pipeline: Arc<ScreeningPipeline>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        store,
        pipeline,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Webhook intake; the event dispatcher retries on non-2xx, so this
    // route must stay cheap and must never surface screening failures.
    let webhook_routes = Router::new().route("/hooks/message", post(webhook::receive_event));

    // Tenant settings (v1)
    let settings_routes = Router::new().route(
        "/api/v1/tenants/:tenant_id/settings",
        get(settings::get_settings).put(settings::update_settings),
    );

    // Public health endpoints
    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    // Merge all routes
    Router::new()
        .merge(webhook_routes)
        .merge(settings_routes)
        .merge(health_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use domain::services::LexiconScorer;

    use crate::services::{ChatPlatformClient, DispatchCoordinator, WebhookNotifier};

    async fn test_app() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_for_test(&[]).unwrap();
        let store = TenantConfigStore::new(dir.path());
        store.ensure_data_dir().await.unwrap();

        let api = Arc::new(ChatPlatformClient::new(&config.chat_api).unwrap());
        let dispatcher = DispatchCoordinator::new(api, Arc::new(WebhookNotifier::new().unwrap()));
        let pipeline = Arc::new(ScreeningPipeline::new(
            store.clone(),
            Arc::new(LexiconScorer::new()),
            dispatcher,
            Vec::new(),
            0.9,
            "https://app.chat.invalid".to_string(),
        ));

        (dir, create_app(config, store, pipeline))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check_reports_storage() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"]["available"], true);
    }

    #[tokio::test]
    async fn test_get_settings_returns_defaults_for_unknown_tenant() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/tenants/acme/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["alert_tag"], "moderation");
        assert_eq!(body["negative_threshold"], -0.75);
        assert_eq!(body["notification_enabled"], false);
    }

    #[tokio::test]
    async fn test_get_settings_rejects_bad_tenant_id() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/tenants/..%2Fescape/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_settings_persists_partial_update() {
        let (_dir, app) = test_app().await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/tenants/acme/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"alert_tag": "  Abuse "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["alert_tag"], "abuse");
        assert_eq!(body["negative_threshold"], -0.75);

        // Read back through the API
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/tenants/acme/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["alert_tag"], "abuse");
    }

    #[tokio::test]
    async fn test_put_settings_rejects_enabled_without_target() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/tenants/acme/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"notification_enabled": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_put_settings_rejects_out_of_range_threshold() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/tenants/acme/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"negative_threshold": 1.5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_stored_record_intact() {
        let (_dir, app) = test_app().await;
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/tenants/acme/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"alert_tag": "abuse"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/tenants/acme/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"alert_tag": "flagged", "negative_threshold": 9.0}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/tenants/acme/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["alert_tag"], "abuse");
    }

    #[tokio::test]
    async fn test_webhook_acks_immediately() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hooks/message")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"event": "conversation:opened", "data": {}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["received"], true);
    }

    #[tokio::test]
    async fn test_webhook_acks_envelope_without_event_name() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hooks/message")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"data": {"tenantId": "acme"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["received"], true);
    }

    #[tokio::test]
    async fn test_webhook_acks_undecodable_envelope() {
        let (_dir, app) = test_app().await;
        // Wrong types everywhere, still valid JSON: ack and drop.
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hooks/message")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"event": 5, "data": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["received"], true);
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()["x-content-type-options"],
            "nosniff"
        );
    }
}
