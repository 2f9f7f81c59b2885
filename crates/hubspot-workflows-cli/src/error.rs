use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

// BSD sysexits.h
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_UNAVAILABLE: u8 = 69;
const EX_CONFIG: u8 = 78;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("HUBSPOT_API_KEY environment variable not set.")]
    MissingCredential,

    #[error("failed to read {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method} {url} failed")]
    Network {
        method: &'static str,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl WorkflowError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingCredential => 1,
            Self::File { .. } => EX_NOINPUT,
            Self::Parse { .. } => EX_DATAERR,
            Self::Network { .. } => EX_UNAVAILABLE,
            Self::Config(_) => EX_CONFIG,
        }
    }
}

/// Exit code for an error surfaced by [`crate::run`]. Errors outside the
/// taxonomy exit with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<WorkflowError>()
        .map_or(1, WorkflowError::exit_code)
}

/// Print `err` and return the process exit code. A missing credential goes
/// to `stdout` as a single line; everything else goes to `stderr` with its
/// cause chain.
pub fn report(err: &anyhow::Error, stdout: &mut impl Write, stderr: &mut impl Write) -> u8 {
    // Nowhere left to report a failed write.
    let _ = match err.downcast_ref::<WorkflowError>() {
        Some(WorkflowError::MissingCredential) => writeln!(stdout, "Error: {err}"),
        _ => writeln!(stderr, "Error: {err:#}"),
    };
    exit_code(err)
}
