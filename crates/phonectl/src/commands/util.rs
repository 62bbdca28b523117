//! Shared helpers for the fleet-bound command handlers.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use phonectl_core::{Connector, FleetOperation, drain};

use crate::cli::GlobalOpts;
use crate::config::FleetContext;
use crate::error::CliError;
use crate::output;

/// Run one operation over the whole fleet and print the report.
///
/// Per-device failures end up in the report, not in the returned `Result`;
/// the process succeeds even when some addresses failed. The only error
/// here is failing to build the shared HTTP client, which aborts before
/// any device is contacted.
pub async fn run_fleet(
    ctx: &FleetContext,
    global: &GlobalOpts,
    operation: FleetOperation,
) -> Result<(), CliError> {
    let connector = Connector::new(ctx.credentials.clone(), ctx.transport.clone());
    let (tx, rx) = mpsc::channel(1);

    let (report, run) = tokio::join!(
        drain(rx, output::live_printer(global.verbose > 0)),
        connector.run(ctx.addresses.clone(), operation, tx),
    );
    run.map_err(|source| CliError::ClientSetup { source })?;

    output::print_summary(&report, global.quiet);
    Ok(())
}

/// Ask for confirmation unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt {
            reason: e.to_string(),
        })
}

/// Create the output directory up front. Failure aborts the whole run
/// before any device is contacted.
pub fn prepare_out_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir).map_err(|source| CliError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Per-device output path: `<dir>/<sanitized host>_<name>`.
pub fn device_file(dir: &Path, authority: &str, name: &str) -> PathBuf {
    let host = authority.replace([':', '/'], "_");
    dir.join(format!("{host}_{name}"))
}
