//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

use crate::models::InputMode;
use crate::pipeline::Outcome;
use crate::render::Block;

/// One rendered result block, flattened for the template.
pub struct BlockView {
    /// "heading", "text", or "line".
    pub kind: &'static str,
    pub text: String,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        let kind = match block {
            Block::Heading(_) => "heading",
            Block::Text(_) => "text",
            Block::Line(_) => "line",
        };
        Self {
            kind,
            text: block.text().to_string(),
        }
    }
}

/// The analyzer page: input form plus the outcome of the last action.
///
/// The key is never carried back into the page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub endpoint: String,
    pub url: String,
    pub url_mode: bool,
    pub accept: String,
    pub blocks: Vec<BlockView>,
    pub has_result: bool,
    pub warning: String,
    pub has_warning: bool,
    pub error: String,
    pub has_error: bool,
}

impl<'a> IndexTemplate<'a> {
    pub fn new(endpoint: String) -> Self {
        Self {
            title: "Document Analyzer",
            endpoint,
            url: String::new(),
            url_mode: false,
            accept: crate::input::ALLOWED_EXTENSIONS
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(","),
            blocks: Vec::new(),
            has_result: false,
            warning: String::new(),
            has_warning: false,
            error: String::new(),
            has_error: false,
        }
    }

    pub fn with_input(mut self, mode: InputMode, url: String) -> Self {
        self.url_mode = mode == InputMode::Url;
        self.url = url;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Rendered(blocks) => {
                self.blocks = blocks.iter().map(BlockView::from).collect();
                self.has_result = true;
            }
            Outcome::Warning(msg) => {
                self.warning = msg;
                self.has_warning = true;
            }
            Outcome::Error(msg) => {
                self.error = msg;
                self.has_error = true;
            }
        }
        self
    }
}
