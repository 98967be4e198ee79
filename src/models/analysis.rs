//! Analysis result models.
//!
//! These mirror the parts of a `prebuilt-read` analysis that get rendered:
//! whole-document text, handwriting styles, and per-page geometry.

use serde::{Deserialize, Serialize};

/// A point on a page, in the page's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Structured result of one document analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whole-document text content.
    pub content: String,
    /// Detected text styles, in service order.
    pub styles: Vec<DocumentStyle>,
    /// Pages, in service order.
    pub pages: Vec<DocumentPage>,
}

/// A detected text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyle {
    pub is_handwritten: bool,
    pub confidence: Option<f64>,
}

/// A single analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// 1-based page number.
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
    /// Unit of `width`, `height` and all polygon coordinates ("inch" or "pixel").
    pub unit: String,
    pub lines: Vec<DocumentLine>,
    pub words: Vec<DocumentWord>,
}

/// A line of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub content: String,
    pub polygon: Option<Vec<Point>>,
}

/// A word on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWord {
    pub content: String,
    /// Confidence in [0.0, 1.0].
    pub confidence: f64,
    pub polygon: Option<Vec<Point>>,
}

impl AnalysisResult {
    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Total number of words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|p| p.words.len()).sum()
    }
}
