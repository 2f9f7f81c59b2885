use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::client::{Transport, UreqTransport, WorkflowsClient};
use crate::config::ClientConfig;
use crate::payload::WorkflowPayload;

const LOG_ENV: &str = "HUBSPOT_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "hubspot-workflows",
    version,
    about = "CLI for the HubSpot Automation v4 workflows API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new workflow
    Create {
        /// JSON file with workflow definition
        file: PathBuf,
    },
    /// Read a workflow by ID
    Read {
        /// Workflow ID
        workflow_id: String,
    },
    /// List all workflows
    List,
    /// Update a workflow by ID
    Update {
        /// Workflow ID
        workflow_id: String,
        /// JSON file with updated workflow definition
        file: PathBuf,
    },
    /// Delete a workflow by ID
    Delete {
        /// Workflow ID
        workflow_id: String,
    },
}

/// Diagnostics go to stderr so stdout only ever carries the API response.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    // Already initialised is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Check the credential, issue exactly one request and print `<status> <body>`.
fn execute(
    command: Commands,
    env_var: impl Fn(&str) -> Result<String, std::env::VarError>,
    transport: impl Transport,
    out: &mut impl Write,
) -> Result<()> {
    let config = ClientConfig::from_env_with(env_var)?;
    debug!(base_url = config.base_url(), "resolved configuration");
    let client = WorkflowsClient::new(config, transport);

    let resp = match command {
        Commands::Create { file } => {
            let payload = WorkflowPayload::from_file(&file)?;
            client.create(&payload)?
        }
        Commands::Read { workflow_id } => client.read(&workflow_id)?,
        Commands::List => client.list()?,
        Commands::Update { workflow_id, file } => {
            let payload = WorkflowPayload::from_file(&file)?;
            client.update(&workflow_id, &payload)?
        }
        Commands::Delete { workflow_id } => client.delete(&workflow_id)?,
    };

    writeln!(out, "{resp}").context("failed to write response")?;
    Ok(())
}

// -- main dispatch --

/// Parse CLI arguments and execute the corresponding workflows API call.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_logging();

    execute(
        cli.command,
        |k| std::env::var(k),
        UreqTransport::new(),
        &mut std::io::stdout().lock(),
    )
}
