//! confpost CLI - Confluence document poster.
//!
//! Converts a Markdown/HTML file or directory into Confluence storage
//! format and upserts the result into a Confluence space.

mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use confpost_confluence::{ConfluenceClient, ConfluencePoster, Credentials};
use confpost_core::FileConverter;

use error::CliError;
use output::Output;

/// Confluence document poster.
#[derive(Parser)]
#[command(name = "confpost", version, about)]
struct Cli {
    /// The file or directory to process.
    path: PathBuf,

    /// The root Confluence URL.
    #[arg(short = 'c', long)]
    base_url: String,

    /// The service account user name.
    #[arg(short, long)]
    username: Option<String>,

    /// The service account password.
    #[arg(short, long, env = "CONFLUENCE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The SSL key registered with Confluence.
    #[arg(short = 'l', long)]
    key: Option<PathBuf>,

    /// The SSL certificate.
    #[arg(short = 't', long)]
    cert: Option<PathBuf>,

    /// The Confluence space (parent page title) to post under.
    #[arg(short, long)]
    space: String,

    /// The Confluence space key.
    #[arg(short = 'k', long)]
    space_key: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to INFO
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    // Validate credentials before touching any input file.
    let credentials = Credentials::resolve(cli.username, cli.password, cli.key, cli.cert)?;

    output.info(&format!("Converting {}...", cli.path.display()));
    let documents = FileConverter::new().convert(&cli.path)?;
    output.info(&format!(
        "Converted {} file(s)",
        documents.iter().flatten().count()
    ));

    let client = ConfluenceClient::new(&cli.base_url, &credentials)?;
    let poster = ConfluencePoster::new(&client, &cli.space, &cli.space_key);
    let report = poster.post_all(&documents);

    for title in &report.posted {
        output.success(&format!("Posted {title}"));
    }
    for failure in &report.failed {
        output.warning(&format!("Failed {}: {}", failure.title, failure.error));
    }

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} page(s) failed to post",
            report.failed.len()
        )))
    }
}
