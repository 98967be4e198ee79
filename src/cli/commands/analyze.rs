//! One-shot document analysis from the command line.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::icons::{error, heading, warn};
use crate::client::FormRecognizer;
use crate::config::Settings;
use crate::input::{read_upload, AnalysisForm};
use crate::models::InputMode;
use crate::pipeline::{self, Outcome};
use crate::render::Block;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Local document to upload (png, jpg, jpeg, pdf)
    #[arg(short, long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Document URL for the service to fetch
    #[arg(short, long)]
    pub url: Option<String>,

    /// Form Recognizer endpoint (default: config or FORM_RECOGNIZER_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Form Recognizer key (default: FORM_RECOGNIZER_KEY)
    #[arg(long, hide = true)]
    pub key: Option<String>,

    /// Print the structured result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Analyze a document and print the result.
///
/// Analysis failures are printed, not returned: the command still exits
/// cleanly.
pub async fn cmd_analyze(settings: &Settings, args: AnalyzeArgs) -> anyhow::Result<()> {
    let mode = match (&args.file, &args.url) {
        (Some(_), _) => Some(InputMode::FileUpload),
        (None, Some(_)) => Some(InputMode::Url),
        (None, None) => None,
    };

    let file = match args.file {
        Some(ref path) => match read_upload(path).await {
            Ok(upload) => Some(upload),
            Err(e) => {
                eprintln!("{} Could not read {}: {}", warn(), path.display(), e);
                return Ok(());
            }
        },
        None => None,
    };

    let form = AnalysisForm {
        endpoint: args.endpoint.or_else(|| settings.endpoint.clone()).unwrap_or_default(),
        key: args.key.or_else(|| settings.key.clone()).unwrap_or_default(),
        mode,
        file,
        url: args.url,
    };

    let analyzer = FormRecognizer::new(settings.client_options());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Analyzing document...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline::run(&analyzer, form).await;
    pb.finish_and_clear();

    if args.json {
        if let Ok(ref analysis) = result {
            println!("{}", serde_json::to_string_pretty(analysis)?);
            return Ok(());
        }
    }

    match Outcome::from_result(&result) {
        Outcome::Rendered(blocks) => print_blocks(&blocks),
        Outcome::Warning(msg) => eprintln!("{} {}", warn(), msg),
        Outcome::Error(msg) => eprintln!("{} {}", error(), msg),
    }

    Ok(())
}

fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading(text) => println!("\n{}", heading(text)),
            Block::Text(text) | Block::Line(text) => println!("{}", text),
        }
    }
}
