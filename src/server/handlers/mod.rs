//! HTTP request handlers for the web server.

mod api;
mod pages;
mod static_files;

// Re-export handlers for use by the router
pub use api::{api_analyze, health};
pub use pages::{analyze_form, index};
pub use static_files::{serve_css, serve_js};
