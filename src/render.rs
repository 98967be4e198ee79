//! Result rendering.
//!
//! Walks an [`AnalysisResult`] in service order and produces labeled blocks
//! that both the CLI and the web page draw. Output is deterministic: the
//! same result always renders to the same blocks.

use serde::Serialize;

use crate::error::AnalyzeError;
use crate::models::{AnalysisResult, DocumentLine, DocumentPage, DocumentStyle, DocumentWord, Point};

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    /// Section heading.
    Heading(String),
    /// Preformatted text, shown verbatim.
    Text(String),
    /// A single line of output.
    Line(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading(s) | Block::Text(s) | Block::Line(s) => s,
        }
    }
}

/// Render a result into ordered blocks.
pub fn render_blocks(result: &AnalysisResult) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading("Document Content:".to_string()),
        Block::Text(result.content.clone()),
        Block::Heading("Document Styles:".to_string()),
    ];

    for (idx, style) in result.styles.iter().enumerate() {
        blocks.push(Block::Line(format!("Style {}: {}", idx + 1, style_label(style))));
    }

    blocks.push(Block::Heading("Page Analysis:".to_string()));
    for page in &result.pages {
        render_page(page, &mut blocks);
    }

    blocks
}

fn render_page(page: &DocumentPage, blocks: &mut Vec<Block>) {
    blocks.push(Block::Line(format!("Page {}:", page.page_number)));
    blocks.push(Block::Line(format!(
        "- Dimensions: {} x {} {}",
        page.width, page.height, page.unit
    )));

    blocks.push(Block::Line("Lines:".to_string()));
    for (idx, line) in page.lines.iter().enumerate() {
        render_line(idx + 1, line, blocks);
    }

    blocks.push(Block::Line("Words:".to_string()));
    for word in &page.words {
        blocks.push(Block::Line(format!("  - {}", format_word(word))));
    }
}

fn render_line(number: usize, line: &DocumentLine, blocks: &mut Vec<Block>) {
    blocks.push(Block::Line(format!("  - Line {}: '{}'", number, line.content)));
    blocks.push(Block::Line(format!(
        "    Bounding Box: {}",
        format_polygon(line.polygon.as_deref())
    )));
}

/// Render a result as plain text, one block per line.
pub fn render_text(result: &AnalysisResult) -> String {
    render_blocks(result)
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message shown in place of a result when the action failed.
pub fn render_error(error: &AnalyzeError) -> String {
    match error {
        AnalyzeError::InvalidInput(msg) => msg.clone(),
        AnalyzeError::RemoteFailure(msg) => format!("An error occurred: {}", msg),
    }
}

pub fn style_label(style: &DocumentStyle) -> &'static str {
    if style.is_handwritten {
        "Handwritten"
    } else {
        "Not handwritten"
    }
}

pub fn format_word(word: &DocumentWord) -> String {
    format!(
        "{} (Confidence: {})",
        word.content,
        format_fixed2(word.confidence)
    )
}

/// Format a polygon as `[x, y], [x, y], ...`, or `N/A` when absent.
pub fn format_polygon(polygon: Option<&[Point]>) -> String {
    match polygon {
        Some(points) if !points.is_empty() => points
            .iter()
            .map(|p| format!("[{}, {}]", format_fixed2(p.x), format_fixed2(p.y)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "N/A".to_string(),
    }
}

/// Format with two decimals, rounding half away from zero on the shortest
/// decimal representation of the value (1.005 -> "1.01").
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.2}", value);
    }

    // Display for f64 never uses exponent notation.
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let mut frac: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();
    let round_up = frac.get(2).is_some_and(|d| *d >= 5);
    frac.resize(2, 0);
    digits.extend(frac);

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let to_str = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, to_str(&digits[..split]), to_str(&digits[split..]))
}
