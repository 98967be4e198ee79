//! Configuration display command.

use console::style;

use crate::cli::icons::{dim_arrow, success, warn};
use crate::config::Settings;

/// Print the resolved settings. The key is reported as set or unset only.
pub fn cmd_config_show(settings: &Settings) -> anyhow::Result<()> {
    match settings.config_path {
        Some(ref path) => println!("{} Config file: {}", success(), path.display()),
        None => println!("{} No config file found, using defaults", warn()),
    }

    let endpoint = settings.endpoint.as_deref().unwrap_or("(not set)");
    let key = if settings.key.is_some() {
        style("set").green()
    } else {
        style("not set").yellow()
    };

    println!("  {} Endpoint: {}", dim_arrow(), endpoint);
    println!("  {} Key: {}", dim_arrow(), key);
    println!("  {} API version: {}", dim_arrow(), settings.api_version);
    println!(
        "  {} Poll interval: {}ms",
        dim_arrow(),
        settings.poll_interval.as_millis()
    );
    match settings.request_timeout {
        Some(t) => println!("  {} Request timeout: {}s", dim_arrow(), t.as_secs()),
        None => println!("  {} Request timeout: none", dim_arrow()),
    }
    println!("  {} Bind: {}", dim_arrow(), settings.bind);
    println!(
        "  {} Max upload: {} MB",
        dim_arrow(),
        settings.max_upload_bytes / (1024 * 1024)
    );

    Ok(())
}
