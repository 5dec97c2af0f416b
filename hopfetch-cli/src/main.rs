// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! hopfetch CLI - fetch a URL, following a bounded chain of redirects.
//!
//! # Examples
//!
//! ```bash
//! # Print the body to stdout
//! hopfetch https://example.com/
//!
//! # Save the body to a file
//! hopfetch https://example.com/archive.tar.gz -o archive.tar.gz
//!
//! # Follow at most two redirects
//! hopfetch http://example.com/ --max-redirects 2
//!
//! # Machine-readable summary on stderr
//! hopfetch https://example.com/ --format json --pretty -o /dev/null
//! ```

mod config;
mod output;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hopfetch_core::FetchRequest;
use hopfetch_fetch::{HttpTransport, RedirectingFetcher};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;
use output::{BodyTarget, BodyWriter, ExitCode, FetchReport};

// ============================================================================
// CLI Definition
// ============================================================================

/// hopfetch - redirect-following HTTP fetcher.
#[derive(Parser)]
#[command(name = "hopfetch")]
#[command(about = "Fetch a URL, following a bounded chain of redirects")]
#[command(long_about = r#"
hopfetch downloads a single URL. Redirects (any 3xx with a Location header)
are followed up to a limit, and a chain that revisits a URL is rejected as a
loop.

Exit codes:
  0  body fetched
  1  general error
  2  server answered with an error status
  3  redirect loop, limit, or malformed Location
  4  network failure
"#)]
#[command(version)]
pub struct Cli {
    /// URL to fetch.
    #[arg(required_unless_present = "init_config")]
    pub url: Option<String>,

    /// Write the body to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Maximum number of redirects to follow.
    #[arg(long)]
    pub max_redirects: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User agent to send.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Only connect to this domain and its subdomains. Repeatable.
    #[arg(long = "allow-domain")]
    pub allow_domains: Vec<String>,

    /// Ignore proxy environment variables.
    #[arg(long)]
    pub no_proxy: bool,

    /// Configuration file to read instead of the default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    pub init_config: bool,

    /// Summary format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no summary, no logging).
    #[arg(long, short)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Layers command-line overrides on top of the file configuration.
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(max_redirects) = self.max_redirects {
            config.max_redirects = max_redirects;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            config.user_agent = Some(user_agent.clone());
        }
        if !self.allow_domains.is_empty() {
            config.allowed_domains = Some(self.allow_domains.clone());
        }
        if self.no_proxy {
            config.system_proxy = false;
        }
        config
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("hopfetch=debug,info")
    } else {
        EnvFilter::new("hopfetch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => {
            if code != ExitCode::Success {
                std::process::exit(code as i32);
            }
            Ok(())
        }
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}

/// Runs one fetch and prints its summary. Returns the exit code to use.
fn run(cli: &Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path).context("failed to load configuration")?;
    let config = cli.apply_overrides(config);

    if cli.init_config {
        config
            .save_to(&config_path)
            .context("failed to save configuration")?;
        if !cli.quiet {
            eprintln!("Wrote {}", config_path.display());
        }
        return Ok(ExitCode::Success);
    }
    let Some(ref url) = cli.url else {
        anyhow::bail!("no URL given");
    };

    let settings = config.into_settings();
    debug!(
        max_redirects = settings.max_redirects,
        timeout = ?settings.timeout,
        "Resolved settings"
    );

    let transport =
        HttpTransport::with_settings(&settings).context("failed to build HTTP client")?;
    let fetcher = RedirectingFetcher::with_settings(transport, &settings);

    let target = cli
        .output
        .clone()
        .map_or(BodyTarget::Stdout, BodyTarget::File);

    let mut report = None;
    fetcher.fetch_sync(
        &FetchRequest::new(url.as_str()),
        BodyWriter::new(&target, &mut report),
    );

    let report = report.context("fetch finished without reporting a result")?;
    if !cli.quiet {
        print_summary(cli, url, &report)?;
    }
    Ok(report.exit_code())
}

/// Writes the summary to stderr so it never mixes with a body on stdout.
fn print_summary(cli: &Cli, url: &str, report: &FetchReport) -> Result<()> {
    let summary = match cli.format {
        OutputFormat::Text => report.to_text(url),
        OutputFormat::Json => report.to_json(url, cli.pretty)?,
    };
    eprintln!("{summary}");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
