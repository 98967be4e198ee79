//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("styles.css");

/// Form behaviour: input mode toggle and busy indicator.
pub const JS: &str = include_str!("scripts.js");
