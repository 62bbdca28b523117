//! Command dispatch: bridges CLI args -> fleet operations -> output.

pub mod config_cmd;
pub mod keys;
pub mod maintenance;
pub mod parameters;
pub mod phonebook;
pub mod scan;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::FleetContext;
use crate::error::CliError;

/// Dispatch a fleet-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    ctx: &FleetContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Scan => scan::handle(ctx, global).await,
        Command::Phonebook(args) => phonebook::handle(ctx, args, global).await,
        Command::Parameters(args) => parameters::handle(ctx, args, global).await,
        Command::Keys(args) => keys::handle(ctx, args, global).await,
        Command::Backup(args) => maintenance::backup(ctx, args, global).await,
        Command::Restore(args) => maintenance::restore(ctx, args, global).await,
        Command::Reset => maintenance::reset(ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
