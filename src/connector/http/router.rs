use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::connector::api::Container;

use super::handlers::{self, AppState};

/// Slack on top of the upload limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the HTTP API router.
///
/// CORS is fully permissive so a browser front end served from any origin
/// can call the API.
pub fn api_router(container: Arc<Container>) -> Router {
    let upload_limit = container
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let state = AppState { container };

    let api = Router::new()
        .route("/analyze/symptoms", post(handlers::analyze_symptoms))
        .route(
            "/analyze/report",
            post(handlers::analyze_report).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/chat", post(handlers::chat))
        .route("/analyses", get(handlers::list_analyses))
        .route("/analyses/{id}", get(handlers::get_analysis));

    Router::new()
        .route("/health-check", get(handlers::health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the API until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let app = api_router(container);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::{CompletionService, DocumentTextExtractor};
    use crate::connector::api::ContainerConfig;
    use crate::domain::{DomainError, GenerationParams, Prompt};

    struct FixedCompletion(&'static str);

    #[async_trait]
    impl CompletionService for FixedCompletion {
        async fn complete(
            &self,
            _prompt: &Prompt,
            _params: GenerationParams,
        ) -> Result<String, DomainError> {
            Ok(self.0.to_string())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct Unreachable;

    #[async_trait]
    impl CompletionService for Unreachable {
        async fn complete(
            &self,
            _prompt: &Prompt,
            _params: GenerationParams,
        ) -> Result<String, DomainError> {
            Err(DomainError::transport("connection refused"))
        }

        fn model_name(&self) -> &str {
            "unreachable"
        }
    }

    struct FixedText;

    impl DocumentTextExtractor for FixedText {
        fn extract_text(&self, _bytes: &[u8]) -> Result<String, DomainError> {
            Ok("LDL cholesterol 160 mg/dL (high)".to_string())
        }
    }

    fn app_with(completion: Arc<dyn CompletionService>, max_upload_bytes: usize) -> Router {
        let config = ContainerConfig {
            offline: false,
            request_timeout: Duration::from_secs(5),
            max_upload_bytes,
        };
        api_router(Arc::new(Container::with_services(
            config,
            completion,
            Arc::new(FixedText),
        )))
    }

    fn app(reply: &'static str) -> Router {
        app_with(Arc::new(FixedCompletion(reply)), 1024 * 1024)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(filename: &str, content: &[u8]) -> Request<Body> {
        let boundary = "X-TEST-BOUNDARY";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/analyze/report")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn symptom_body(symptoms: Value) -> Value {
        json!({
            "symptoms": symptoms,
            "age": 30,
            "gender": "male",
            "duration": "2 days",
            "severity": "mild",
        })
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let request = Request::builder()
            .uri("/health-check")
            .body(Body::empty())
            .unwrap();
        let response = app("{}").oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn analyze_symptoms_returns_result_and_stores_it() {
        let app = app(r#"{"preliminary_assessment":"rest and hydrate","urgency_level":"low","recommendations":["drink water"],"possible_conditions":[]}"#);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/analyze/symptoms",
                symptom_body(json!(["headache"])),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["urgency_level"], "low");
        assert_eq!(body["recommendations"], json!(["drink water"]));

        let id = body["analysis_id"].as_str().unwrap().to_string();
        let request = Request::builder()
            .uri(format!("/api/analyses/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analysis_id"], id.as_str());

        let request = Request::builder()
            .uri("/api/analyses")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_json(response).await["analyses"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_symptoms_is_bad_request() {
        let response = app("{}")
            .oneshot(json_request(
                "POST",
                "/api/analyze/symptoms",
                symptom_body(json!([])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze/symptoms")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app("{}").oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unreachable_provider_is_bad_gateway() {
        let response = app_with(Arc::new(Unreachable), 1024)
            .oneshot(json_request(
                "POST",
                "/api/analyze/symptoms",
                symptom_body(json!(["cough"])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "TRANSPORT_ERROR");
    }

    #[tokio::test]
    async fn missing_analysis_is_not_found() {
        let request = Request::builder()
            .uri("/api/analyses/does-not-exist")
            .body(Body::empty())
            .unwrap();
        let response = app("{}").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn report_upload_is_summarized() {
        let response = app("Your LDL is elevated.")
            .oneshot(multipart_request("labs.pdf", b"%PDF-1.4 fake"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["filename"], "labs.pdf");
        assert_eq!(body["analysis"], "Your LDL is elevated.");
        assert!(body.get("extracted_text").is_none());
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected() {
        let response = app("unused")
            .oneshot(multipart_request("notes.txt", b"hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let response = app_with(Arc::new(FixedCompletion("unused")), 16)
            .oneshot(multipart_request("labs.pdf", &[b'a'; 64]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn unbounded_upload_limit_builds_a_router() {
        let request = Request::builder()
            .uri("/health-check")
            .body(Body::empty())
            .unwrap();
        let response = app_with(Arc::new(FixedCompletion("unused")), usize::MAX)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn upload_past_the_body_limit_is_invalid_input() {
        let content = vec![b'a'; MULTIPART_OVERHEAD_BYTES + 1024];
        let response = app_with(Arc::new(FixedCompletion("unused")), 16)
            .oneshot(multipart_request("labs.pdf", &content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn chat_continues_a_session() {
        let app = app("Stay hydrated.");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/chat", json!({"message": "I feel tired"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], "Stay hydrated.");
        let session_id = body["session_id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/chat",
                json!({"message": "Anything else?", "session_id": session_id}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["session_id"], session_id.as_str());
    }

    #[tokio::test]
    async fn blank_chat_message_is_bad_request() {
        let response = app("unused")
            .oneshot(json_request("POST", "/api/chat", json!({"message": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
