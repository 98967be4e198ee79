//! Client for the Form Recognizer `prebuilt-read` analysis.
//!
//! One call to [`DocumentAnalyzer::analyze`] submits the document (raw bytes
//! or a URL the service fetches), then polls the returned operation until it
//! reaches a terminal state.
//!
//! Nothing here retries or classifies failures: every transport, auth, or
//! service-side problem surfaces as [`AnalyzeError::RemoteFailure`].

pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::AnalyzeError;
use crate::models::{AnalysisRequest, AnalysisResult, Credentials, DocumentSource};
use wire::{AnalyzeUrlRequest, ErrorResponse, OperationResponse};

/// Prebuilt model used for every submission.
pub const READ_MODEL_ID: &str = "prebuilt-read";

/// REST API version sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "2023-07-31";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";

/// Something that can turn an analysis request into a result.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}

/// Options shared by every session.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_version: String,
    /// Wait between polls when the service sends no `Retry-After`.
    pub poll_interval: Duration,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: Duration::from_secs(1),
            request_timeout: None,
        }
    }
}

/// Analyzer backed by the Form Recognizer REST API.
#[derive(Debug, Clone, Default)]
pub struct FormRecognizer {
    options: ClientOptions,
}

impl FormRecognizer {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl DocumentAnalyzer for FormRecognizer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        if !request.credentials.is_complete() {
            return Err(AnalyzeError::InvalidInput(
                crate::input::MISSING_CREDENTIALS.to_string(),
            ));
        }
        let session = Session::open(request.credentials, &self.options)?;
        session.analyze(&request.source).await
    }
}

/// An HTTP session scoped to one endpoint and key.
struct Session {
    client: Client,
    credentials: Credentials,
    base: Url,
    api_version: String,
    poll_interval: Duration,
}

impl Session {
    fn open(credentials: Credentials, options: &ClientOptions) -> Result<Self, AnalyzeError> {
        let base = parse_endpoint(&credentials.endpoint)?;

        let mut builder = Client::builder()
            .user_agent(concat!("docscan/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AnalyzeError::RemoteFailure(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            credentials,
            base,
            api_version: options.api_version.clone(),
            poll_interval: options.poll_interval,
        })
    }

    async fn analyze(&self, source: &DocumentSource) -> Result<AnalysisResult, AnalyzeError> {
        let operation = self.submit(source).await?;
        self.poll(&operation).await
    }

    /// Submit the document and return the operation URL to poll.
    async fn submit(&self, source: &DocumentSource) -> Result<Url, AnalyzeError> {
        let url = analyze_url(&self.base, &self.api_version);
        info!("Submitting {} for {} analysis", source.describe(), READ_MODEL_ID);

        let builder = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key());
        let builder = match source {
            DocumentSource::Bytes { file_name, data } => builder
                .header(CONTENT_TYPE, content_type_for(file_name))
                .body(data.clone()),
            DocumentSource::Url(document_url) => builder.json(&AnalyzeUrlRequest {
                url_source: document_url,
            }),
        };

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let location = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AnalyzeError::RemoteFailure(
                    "Service response is missing the Operation-Location header".to_string(),
                )
            })?;

        // Absolute in practice; resolve against the endpoint otherwise.
        self.base.join(location).map_err(|e| {
            AnalyzeError::RemoteFailure(format!("Invalid operation location '{}': {}", location, e))
        })
    }

    /// Poll the operation until it succeeds or fails.
    async fn poll(&self, operation: &Url) -> Result<AnalysisResult, AnalyzeError> {
        let mut polls: u32 = 0;
        loop {
            let response = self
                .client
                .get(operation.clone())
                .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key())
                .send()
                .await?;
            polls += 1;

            if !response.status().is_success() {
                return Err(remote_error(response).await);
            }

            let wait = retry_after(response.headers()).unwrap_or(self.poll_interval);
            let body = response.text().await?;
            let state: OperationResponse = serde_json::from_str(&body)?;

            match state.status.as_str() {
                "succeeded" => {
                    debug!("Analysis succeeded after {} poll(s)", polls);
                    return state.analyze_result.map(AnalysisResult::from).ok_or_else(|| {
                        AnalyzeError::RemoteFailure(
                            "Analysis succeeded but returned no result".to_string(),
                        )
                    });
                }
                "failed" | "canceled" => {
                    let message = state
                        .error
                        .map(|e| e.describe())
                        .unwrap_or_else(|| format!("Analysis {}", state.status));
                    warn!("Analysis {}: {}", state.status, message);
                    return Err(AnalyzeError::RemoteFailure(message));
                }
                other => {
                    debug!("Analysis status '{}' (poll {}), waiting {:?}", other, polls, wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, AnalyzeError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    Url::parse(&format!("{}/", trimmed)).map_err(|e| {
        AnalyzeError::RemoteFailure(format!("Invalid endpoint URL '{}': {}", endpoint, e))
    })
}

/// `{endpoint}/formrecognizer/documentModels/prebuilt-read:analyze?api-version=...`
fn analyze_url(base: &Url, api_version: &str) -> Url {
    let mut url = base.clone();
    let path = format!(
        "{}formrecognizer/documentModels/{}:analyze",
        base.path(),
        READ_MODEL_ID
    );
    url.set_path(&path);
    url.query_pairs_mut()
        .clear()
        .append_pair("api-version", api_version);
    url
}

/// Content type for a byte submission, guessed from the file name.
fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Parse a `Retry-After` header given in seconds, capped at 60s.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(60)))
}

/// Build a `RemoteFailure` from a non-2xx response.
async fn remote_error(response: Response) -> AnalyzeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error.describe(),
        Err(_) if body.trim().is_empty() => format!("Service returned {}", status),
        Err(_) => format!("Service returned {}: {}", status, body.trim()),
    };
    warn!("Form Recognizer request failed ({}): {}", status, message);
    AnalyzeError::RemoteFailure(message)
}
