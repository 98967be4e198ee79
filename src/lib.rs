//! docscan - document analysis front end for Azure Form Recognizer.
//!
//! Collects credentials and a document (uploaded bytes or a URL), runs the
//! `prebuilt-read` analysis, and renders the content, handwriting styles,
//! and per-page lines and words.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod server;

pub use client::{ClientOptions, DocumentAnalyzer, FormRecognizer};
pub use error::AnalyzeError;
pub use input::{AnalysisForm, UploadedFile};
pub use models::{AnalysisRequest, AnalysisResult, Credentials, DocumentSource, InputMode};
pub use pipeline::Outcome;
