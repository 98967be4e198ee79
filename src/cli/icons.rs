//! Terminal markers for analysis output.

use console::{style, StyledObject};

pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

/// Startup notices such as the serve address.
pub fn info() -> StyledObject<&'static str> {
    style("→").cyan()
}

/// Input problems; nothing was sent.
pub fn warn() -> StyledObject<&'static str> {
    style("!").yellow()
}

/// Service or transport failures.
pub fn error() -> StyledObject<&'static str> {
    style("✗").red()
}

/// Lead-in for `config` detail rows.
pub fn dim_arrow() -> StyledObject<&'static str> {
    style("→").dim()
}

/// Result section headings ("Document Content:", "Page Analysis:").
pub fn heading(text: &str) -> StyledObject<&str> {
    style(text).bold()
}
