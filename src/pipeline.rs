//! The single analysis action: collect input, analyze, render.

use tracing::{info, warn};

use crate::client::DocumentAnalyzer;
use crate::error::AnalyzeError;
use crate::input::AnalysisForm;
use crate::models::AnalysisResult;
use crate::render::{render_blocks, render_error, Block};

/// Validate the form and run the analysis.
///
/// Invalid input returns before the analyzer is touched.
pub async fn run(
    analyzer: &dyn DocumentAnalyzer,
    form: AnalysisForm,
) -> Result<AnalysisResult, AnalyzeError> {
    let request = form.into_request()?;
    let description = request.source.describe();

    match analyzer.analyze(request).await {
        Ok(result) => {
            info!(
                "Analyzed {}: {} page(s), {} line(s), {} word(s)",
                description,
                result.pages.len(),
                result.line_count(),
                result.word_count()
            );
            Ok(result)
        }
        Err(e) => {
            warn!("Analysis of {} failed: {}", description, e);
            Err(e)
        }
    }
}

/// What the user sees after one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered result sections.
    Rendered(Vec<Block>),
    /// Input problem; nothing was sent.
    Warning(String),
    /// The service or transport failed.
    Error(String),
}

impl Outcome {
    pub fn from_result(result: &Result<AnalysisResult, AnalyzeError>) -> Self {
        match result {
            Ok(result) => Outcome::Rendered(render_blocks(result)),
            Err(e @ AnalyzeError::InvalidInput(_)) => Outcome::Warning(render_error(e)),
            Err(e @ AnalyzeError::RemoteFailure(_)) => Outcome::Error(render_error(e)),
        }
    }
}
