//! In-process stand-in for the Form Recognizer REST API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

use docscan::ClientOptions;

/// What the fake service does with a submission.
#[derive(Clone)]
pub enum Behavior {
    /// Accept the job and finish with this `analyzeResult`.
    Succeed(Value),
    /// Accept the job, then report it failed with this error body.
    FailJob(Value),
    /// Accept the job, then report it canceled with no error body.
    CancelJob,
    /// Reject the submission with a status and error body.
    RejectSubmit(u16, Value),
    /// Accept with 202 but omit the Operation-Location header.
    NoOperationLocation,
}

/// A recorded analyze submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub path: String,
    pub query: String,
    pub content_type: String,
    pub key: String,
    pub body: Vec<u8>,
}

pub struct FakeService {
    behavior: Behavior,
    /// Polls answered with "running" before the terminal state.
    pending_polls: usize,
    submissions: Mutex<Vec<Submission>>,
    polls: AtomicUsize,
}

impl FakeService {
    pub fn new(behavior: Behavior, pending_polls: usize) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            pending_polls,
            submissions: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        })
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral port and return the endpoint URL.
    pub async fn spawn(self: &Arc<Self>) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn handle(
    State(svc): State<Arc<FakeService>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    if method == Method::POST && path.ends_with("prebuilt-read:analyze") {
        svc.submissions.lock().unwrap().push(Submission {
            path: path.clone(),
            query: uri.query().unwrap_or_default().to_string(),
            content_type: header_str("content-type"),
            key: header_str("ocp-apim-subscription-key"),
            body: body.to_vec(),
        });

        return match &svc.behavior {
            Behavior::RejectSubmit(status, error) => (
                StatusCode::from_u16(*status).unwrap(),
                Json(error.clone()),
            )
                .into_response(),
            Behavior::NoOperationLocation => StatusCode::ACCEPTED.into_response(),
            _ => {
                let location = format!(
                    "http://{}/formrecognizer/documentModels/prebuilt-read/analyzeResults/op-1?api-version=2023-07-31",
                    header_str("host")
                );
                (StatusCode::ACCEPTED, [("operation-location", location)]).into_response()
            }
        };
    }

    if method == Method::GET && path.contains("/analyzeResults/") {
        let n = svc.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= svc.pending_polls {
            return (
                [(header::RETRY_AFTER, "0")],
                Json(json!({"status": "running"})),
            )
                .into_response();
        }
        return match &svc.behavior {
            Behavior::Succeed(result) => {
                Json(json!({"status": "succeeded", "analyzeResult": result})).into_response()
            }
            Behavior::FailJob(error) => {
                Json(json!({"status": "failed", "error": error})).into_response()
            }
            Behavior::CancelJob => Json(json!({"status": "canceled"})).into_response(),
            _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };
    }

    StatusCode::NOT_FOUND.into_response()
}

/// Client options with a negligible poll interval.
pub fn fast_options() -> ClientOptions {
    ClientOptions {
        poll_interval: Duration::from_millis(1),
        ..ClientOptions::default()
    }
}

/// The single-page "Hello" result used across tests.
pub fn hello_result() -> Value {
    json!({
        "apiVersion": "2023-07-31",
        "modelId": "prebuilt-read",
        "content": "Hello",
        "pages": [{
            "pageNumber": 1,
            "width": 8.5,
            "height": 11,
            "unit": "inch",
            "lines": [{"content": "Hello", "polygon": [0, 0, 1, 0, 1, 1, 0, 1]}],
            "words": [{"content": "Hello", "polygon": [0, 0, 1, 0, 1, 1, 0, 1], "confidence": 0.93}]
        }],
        "styles": []
    })
}
