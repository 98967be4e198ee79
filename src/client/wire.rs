//! REST payloads for the Form Recognizer analyze operation.

use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, DocumentLine, DocumentPage, DocumentStyle, DocumentWord, Point};

/// Body for URL submissions.
#[derive(Debug, Serialize)]
pub struct AnalyzeUrlRequest<'a> {
    #[serde(rename = "urlSource")]
    pub url_source: &'a str,
}

/// Polled state of an analyze operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub status: String,
    pub error: Option<ErrorBody>,
    pub analyze_result: Option<WireAnalyzeResult>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: Option<String>,
    pub message: String,
}

impl ErrorBody {
    pub fn describe(&self) -> String {
        match &self.code {
            Some(code) => format!("({}) {}", code, self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAnalyzeResult {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pages: Vec<WirePage>,
    #[serde(default)]
    pub styles: Vec<WireStyle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePage {
    pub page_number: u32,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub lines: Vec<WireLine>,
    #[serde(default)]
    pub words: Vec<WireWord>,
}

#[derive(Debug, Deserialize)]
pub struct WireLine {
    pub content: String,
    pub polygon: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct WireWord {
    pub content: String,
    pub confidence: f64,
    pub polygon: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStyle {
    pub is_handwritten: Option<bool>,
    pub confidence: Option<f64>,
}

/// Convert the service's flat `[x1, y1, x2, y2, ...]` list into points.
///
/// A trailing unpaired coordinate is dropped.
fn to_points(flat: Option<Vec<f64>>) -> Option<Vec<Point>> {
    flat.map(|coords| {
        coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect()
    })
}

impl From<WireAnalyzeResult> for AnalysisResult {
    fn from(wire: WireAnalyzeResult) -> Self {
        AnalysisResult {
            content: wire.content,
            styles: wire
                .styles
                .into_iter()
                .map(|s| DocumentStyle {
                    is_handwritten: s.is_handwritten.unwrap_or(false),
                    confidence: s.confidence,
                })
                .collect(),
            pages: wire.pages.into_iter().map(DocumentPage::from).collect(),
        }
    }
}

impl From<WirePage> for DocumentPage {
    fn from(page: WirePage) -> Self {
        DocumentPage {
            page_number: page.page_number,
            width: page.width.unwrap_or_default(),
            height: page.height.unwrap_or_default(),
            unit: page.unit.unwrap_or_default(),
            lines: page
                .lines
                .into_iter()
                .map(|l| DocumentLine {
                    content: l.content,
                    polygon: to_points(l.polygon),
                })
                .collect(),
            words: page
                .words
                .into_iter()
                .map(|w| DocumentWord {
                    content: w.content,
                    confidence: w.confidence,
                    polygon: to_points(w.polygon),
                })
                .collect(),
        }
    }
}
