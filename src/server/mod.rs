//! Web UI for analyzing documents.
//!
//! A single page collects endpoint, key, and a file or URL; submitting it
//! runs one analysis and re-renders the page with the result inline.
//! Nothing is stored between requests.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::sync::Arc;

use crate::client::{DocumentAnalyzer, FormRecognizer};
use crate::config::Settings;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn DocumentAnalyzer>,
    /// Pre-filled endpoint for the form.
    pub default_endpoint: Option<String>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            analyzer: Arc::new(FormRecognizer::new(settings.client_options())),
            default_endpoint: settings.endpoint.clone(),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    use crate::error::AnalyzeError;
    use crate::models::{
        AnalysisRequest, AnalysisResult, DocumentLine, DocumentPage, DocumentSource, DocumentWord,
    };

    const BOUNDARY: &str = "docscan-test-boundary";

    struct StubAnalyzer {
        calls: AtomicUsize,
        outcome: Result<AnalysisResult, AnalyzeError>,
        last_source: std::sync::Mutex<Option<DocumentSource>>,
    }

    #[async_trait]
    impl DocumentAnalyzer for StubAnalyzer {
        async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_source.lock().unwrap() = Some(request.source);
            self.outcome.clone()
        }
    }

    fn hello() -> AnalysisResult {
        AnalysisResult {
            content: "Hello".to_string(),
            styles: Vec::new(),
            pages: vec![DocumentPage {
                page_number: 1,
                width: 8.5,
                height: 11.0,
                unit: "inch".to_string(),
                lines: vec![DocumentLine {
                    content: "Hello".to_string(),
                    polygon: None,
                }],
                words: vec![DocumentWord {
                    content: "Hello".to_string(),
                    confidence: 0.93,
                    polygon: None,
                }],
            }],
        }
    }

    fn setup_test_app(
        outcome: Result<AnalysisResult, AnalyzeError>,
    ) -> (axum::Router, Arc<StubAnalyzer>) {
        let analyzer = Arc::new(StubAnalyzer {
            calls: AtomicUsize::new(0),
            outcome,
            last_source: std::sync::Mutex::new(None),
        });
        let state = AppState {
            analyzer: analyzer.clone(),
            default_endpoint: Some("https://prefilled.example".to_string()),
            max_upload_bytes: 1024 * 1024,
        };
        (create_router(state), analyzer)
    }

    /// Build a multipart body from text fields and an optional file part.
    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    BOUNDARY, file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn post_form(app: axum::Router, body: Vec<u8>) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (app, _) = setup_test_app(Ok(hello()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("https://prefilled.example"));
        assert!(html.contains("accept=\".png,.jpg,.jpeg,.pdf\""));
    }

    #[tokio::test]
    async fn test_url_submission_renders_result() {
        let (app, analyzer) = setup_test_app(Ok(hello()));
        let body = multipart_body(
            &[
                ("endpoint", "https://svc.example"),
                ("key", "secret-key"),
                ("mode", "url"),
                ("url", "https://doc.example/a.pdf"),
            ],
            None,
        );

        let (status, html) = post_form(app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *analyzer.last_source.lock().unwrap(),
            Some(DocumentSource::Url("https://doc.example/a.pdf".to_string()))
        );
        assert!(html.contains("Page Analysis:"));
        assert!(html.contains("- Dimensions: 8.5 x 11 inch"));
        assert!(html.contains("Hello (Confidence: 0.93)"));
        assert!(!html.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_file_submission_passes_bytes() {
        let (app, analyzer) = setup_test_app(Ok(hello()));
        let body = multipart_body(
            &[
                ("endpoint", "https://svc.example"),
                ("key", "k"),
                ("mode", "file"),
            ],
            Some(("scan.png", b"\x89PNG")),
        );

        let (status, _) = post_form(app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            *analyzer.last_source.lock().unwrap(),
            Some(DocumentSource::Bytes {
                file_name: "scan.png".to_string(),
                data: b"\x89PNG".to_vec(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_key_warns_without_analyzing() {
        let (app, analyzer) = setup_test_app(Ok(hello()));
        let body = multipart_body(
            &[
                ("endpoint", "https://svc.example"),
                ("key", ""),
                ("mode", "url"),
                ("url", "https://doc.example/a.pdf"),
            ],
            None,
        );

        let (status, html) = post_form(app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("Endpoint and Key fields"));
        assert!(!html.contains("Page Analysis:"));
    }

    #[tokio::test]
    async fn test_remote_failure_shows_error_only() {
        let (app, _) = setup_test_app(Err(AnalyzeError::RemoteFailure("auth denied".to_string())));
        let body = multipart_body(
            &[
                ("endpoint", "https://svc.example"),
                ("key", "k"),
                ("mode", "url"),
                ("url", "https://doc.example/a.pdf"),
            ],
            None,
        );

        let (_, html) = post_form(app, body).await;
        assert!(html.contains("An error occurred: auth denied"));
        assert!(!html.contains("Document Content:"));
    }

    #[tokio::test]
    async fn test_api_analyze() {
        let (app, _) = setup_test_app(Ok(hello()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"endpoint": "https://svc.example", "key": "k", "url": "https://doc.example/a.pdf"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["result"]["content"], "Hello");
        assert_eq!(json["result"]["pages"][0]["page_number"], 1);
        assert!(json["text"].as_str().unwrap().contains("Page 1:"));
    }

    #[tokio::test]
    async fn test_api_analyze_errors() {
        let (app, analyzer) = setup_test_app(Ok(hello()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"endpoint": "https://svc.example"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);

        let (app, _) = setup_test_app(Err(AnalyzeError::RemoteFailure("auth denied".to_string())));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"endpoint": "https://svc.example", "key": "k", "url": "https://doc.example/a.pdf"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "An error occurred: auth denied");
        assert_eq!(json["kind"], "remote_failure");
    }

    #[tokio::test]
    async fn test_static_assets() {
        let (app, _) = setup_test_app(Ok(hello()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
