//! Fetch result reporting for the CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use hopfetch_core::{FetchCallback, FetchError, ResponseBody};
use serde::Serialize;

// ============================================================================
// Fetch Report
// ============================================================================

/// What happened to one fetch run from the command line.
#[derive(Debug)]
pub enum FetchReport {
    /// The body was copied to the output.
    Fetched {
        /// Bytes written.
        bytes: u64,
        /// Declared length, or -1.
        content_length: i64,
    },
    /// The fetch succeeded but the body could not be copied.
    CopyFailed(io::Error),
    /// The fetch failed.
    Failed(FetchError),
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Server answered with an error status.
    HttpStatus = 2,
    /// Redirect chain was malformed, looping, or too long.
    Redirect = 3,
    /// Network or I/O failure.
    Transport = 4,
}

impl FetchReport {
    /// Returns the process exit code for this report.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Fetched { .. } => ExitCode::Success,
            Self::CopyFailed(_) => ExitCode::Error,
            Self::Failed(FetchError::HttpStatus { .. }) => ExitCode::HttpStatus,
            Self::Failed(FetchError::Transport(_)) => ExitCode::Transport,
            Self::Failed(e) if e.is_redirect_error() => ExitCode::Redirect,
            Self::Failed(_) => ExitCode::Error,
        }
    }

    /// Renders a one-line human-readable summary.
    pub fn to_text(&self, url: &str) -> String {
        match self {
            Self::Fetched {
                bytes,
                content_length,
            } if *content_length >= 0 => {
                format!("✓ {url}: {bytes} bytes (declared {content_length})")
            }
            Self::Fetched { bytes, .. } => format!("✓ {url}: {bytes} bytes"),
            Self::CopyFailed(e) => format!("✗ {url}: failed writing body: {e}"),
            Self::Failed(e) => format!("✗ {url}: {e}"),
        }
    }

    /// Renders the summary as JSON.
    pub fn to_json(&self, url: &str, pretty: bool) -> Result<String> {
        let output = ReportOutput::new(self, url);
        let json = if pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(json)
    }
}

/// JSON form of a [`FetchReport`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput<'a> {
    url: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> ReportOutput<'a> {
    fn new(report: &FetchReport, url: &'a str) -> Self {
        let mut output = Self {
            url,
            success: false,
            bytes: None,
            content_length: None,
            status: None,
            error: None,
        };
        match report {
            FetchReport::Fetched {
                bytes,
                content_length,
            } => {
                output.success = true;
                output.bytes = Some(*bytes);
                output.content_length = (*content_length >= 0).then_some(*content_length);
            }
            FetchReport::CopyFailed(e) => output.error = Some(e.to_string()),
            FetchReport::Failed(e) => {
                output.status = e.status_code();
                output.error = Some(e.to_string());
            }
        }
        output
    }
}

// ============================================================================
// Body Writer
// ============================================================================

/// Where a fetched body is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyTarget {
    /// Standard output.
    Stdout,
    /// A file, created or truncated only once a response arrives.
    File(PathBuf),
}

impl BodyTarget {
    fn open(&self) -> io::Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| {
                    io::Error::new(e.kind(), format!("cannot create {}: {e}", path.display()))
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Callback that copies the response body into a [`BodyTarget`].
pub struct BodyWriter<'a> {
    target: &'a BodyTarget,
    report: &'a mut Option<FetchReport>,
}

impl<'a> BodyWriter<'a> {
    /// Creates a writer that records what happened into `report`.
    pub fn new(target: &'a BodyTarget, report: &'a mut Option<FetchReport>) -> Self {
        Self { target, report }
    }
}

impl FetchCallback for BodyWriter<'_> {
    fn on_response(self, mut body: ResponseBody, content_length: i64) {
        let copied = self.target.open().and_then(|mut sink| {
            let bytes = io::copy(&mut body, &mut sink)?;
            sink.flush()?;
            Ok(bytes)
        });
        *self.report = Some(match copied {
            Ok(bytes) => FetchReport::Fetched {
                bytes,
                content_length,
            },
            Err(e) => FetchReport::CopyFailed(e),
        });
    }

    fn on_failure(self, error: FetchError) {
        *self.report = Some(FetchReport::Failed(error));
    }
}

// ============================================================================
// Tests
// ============================================================================
