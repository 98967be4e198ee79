//! Request models built fresh for each analysis action.

use std::fmt;

/// Service credentials supplied per invocation.
///
/// The key is never shown: `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    key: String,
}

impl Credentials {
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }

    /// The secret key, for building the authentication header.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether both endpoint and key carry a value.
    pub fn is_complete(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// The document to analyze: exactly one of an uploaded payload or a URL.
#[derive(Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// In-memory file contents with the name they were uploaded under.
    Bytes { file_name: String, data: Vec<u8> },
    /// Remote document the service fetches itself.
    Url(String),
}

impl DocumentSource {
    /// Short description for logs (never includes the payload).
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Bytes { file_name, data } => {
                format!("file '{}' ({} bytes)", file_name, data.len())
            }
            DocumentSource::Url(url) => format!("url {}", url),
        }
    }
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Bytes { file_name, data } => f
                .debug_struct("Bytes")
                .field("file_name", file_name)
                .field("len", &data.len())
                .finish(),
            DocumentSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
        }
    }
}

/// Which input the user chose to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    FileUpload,
    Url,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::FileUpload => "file",
            InputMode::Url => "url",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" | "file upload" | "upload" => Some(InputMode::FileUpload),
            "url" => Some(InputMode::Url),
            _ => None,
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated analysis request, passed by value through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub credentials: Credentials,
    pub source: DocumentSource,
}
