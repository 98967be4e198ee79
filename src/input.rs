//! Input collection and validation.
//!
//! Turns raw user-entered values (web form fields or CLI flags) into an
//! [`AnalysisRequest`]. All checks here happen before any network activity.

use std::path::Path;

use crate::error::AnalyzeError;
use crate::models::{AnalysisRequest, Credentials, DocumentSource, InputMode};

/// File extensions accepted in upload mode.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

pub const MISSING_CREDENTIALS: &str =
    "Please fill in the Azure Form Recognizer Endpoint and Key fields.";

pub const MISSING_DOCUMENT: &str = "Please provide a document file or URL.";

/// An uploaded file held in memory for the duration of one request.
#[derive(Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Raw values as entered by the user.
///
/// `mode` is `None` when the caller did not say which input to use; in that
/// case exactly one of `file`/`url` must be present.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    pub endpoint: String,
    pub key: String,
    pub mode: Option<InputMode>,
    pub file: Option<UploadedFile>,
    pub url: Option<String>,
}

impl AnalysisForm {
    /// Validate the form and build a request.
    ///
    /// The payload belonging to the non-selected mode is ignored.
    pub fn into_request(self) -> Result<AnalysisRequest, AnalyzeError> {
        let credentials = Credentials::new(self.endpoint.trim(), self.key.trim());
        if !credentials.is_complete() {
            return Err(AnalyzeError::InvalidInput(MISSING_CREDENTIALS.to_string()));
        }

        let file = self.file.filter(|f| !f.file_name.trim().is_empty());
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let source = match (self.mode, file, url) {
            (Some(InputMode::FileUpload), Some(file), _) => file_source(file)?,
            (Some(InputMode::Url), _, Some(url)) => DocumentSource::Url(url),
            (None, Some(_), Some(_)) => {
                return Err(AnalyzeError::InvalidInput(
                    "Provide either a document file or a URL, not both.".to_string(),
                ))
            }
            (None, Some(file), None) => file_source(file)?,
            (None, None, Some(url)) => DocumentSource::Url(url),
            _ => return Err(AnalyzeError::InvalidInput(MISSING_DOCUMENT.to_string())),
        };

        Ok(AnalysisRequest {
            credentials,
            source,
        })
    }
}

fn file_source(file: UploadedFile) -> Result<DocumentSource, AnalyzeError> {
    if !is_allowed_file(&file.file_name) {
        return Err(AnalyzeError::InvalidInput(format!(
            "Unsupported file type '{}'. Allowed types: {}.",
            file.file_name,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(DocumentSource::Bytes {
        file_name: file.file_name,
        data: file.data,
    })
}

/// Check a file name against the upload allow-list (case-insensitive).
pub fn is_allowed_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
}

/// Read a local file into an upload, as the CLI does for `--file`.
pub async fn read_upload(path: &Path) -> std::io::Result<UploadedFile> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(UploadedFile { file_name, data })
}
