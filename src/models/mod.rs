//! Data models for docscan.

mod analysis;
mod request;

pub use analysis::{AnalysisResult, DocumentLine, DocumentPage, DocumentStyle, DocumentWord, Point};
pub use request::{AnalysisRequest, Credentials, DocumentSource, InputMode};
