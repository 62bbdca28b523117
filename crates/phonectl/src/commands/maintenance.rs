//! Settings backup, restore, and factory reset handlers.

use std::sync::Arc;

use phonectl_core::{Action, FleetOperation};

use crate::cli::{BackupArgs, GlobalOpts, RestoreArgs};
use crate::config::FleetContext;
use crate::error::CliError;

use super::util;

pub async fn backup(
    ctx: &FleetContext,
    args: BackupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::prepare_out_dir(&args.out_dir)?;
    let out_dir = Arc::new(args.out_dir);
    // One timestamp for the whole run, so a fleet backup sorts as a batch.
    let file_name = Arc::new(format!(
        "AllSettings_{}.cfg",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));

    let operation = FleetOperation::new(Action::Backup, move |session, reporter| {
        let out_dir = Arc::clone(&out_dir);
        let file_name = Arc::clone(&file_name);
        Box::pin(async move {
            match session.backup_settings().await {
                Ok(blob) => {
                    let path =
                        util::device_file(&out_dir, session.address().authority(), &file_name);
                    match tokio::fs::write(&path, blob).await {
                        Ok(()) => reporter.report(Action::Backup, Ok(())).await,
                        Err(e) => {
                            reporter
                                .report_raw(
                                    false,
                                    format!(
                                        "{} failed: cannot write {}: {e}",
                                        Action::Backup,
                                        path.display()
                                    ),
                                )
                                .await;
                        }
                    }
                }
                Err(e) => reporter.report(Action::Backup, Err(e)).await,
            }
            session
        })
    });
    util::run_fleet(ctx, global, operation).await
}

pub async fn restore(
    ctx: &FleetContext,
    args: RestoreArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Read before any network call; a missing backup file contacts nobody.
    let blob = std::fs::read(&args.file).map_err(|source| CliError::LocalRead {
        path: args.file.clone(),
        source,
    })?;

    let prompt = format!(
        "Restore settings to {} device(s)? Their current configuration will be overwritten.",
        ctx.addresses.len()
    );
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    let blob = Arc::new(blob);
    let operation = FleetOperation::new(Action::Restore, move |session, reporter| {
        let blob = Arc::clone(&blob);
        Box::pin(async move {
            let outcome = session.restore_settings(&blob).await;
            reporter.report(Action::Restore, outcome).await;
            session
        })
    });
    util::run_fleet(ctx, global, operation).await
}

pub async fn reset(ctx: &FleetContext, global: &GlobalOpts) -> Result<(), CliError> {
    let prompt = format!(
        "Factory reset {} device(s)? This wipes their configuration.",
        ctx.addresses.len()
    );
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    // Reset-class: the device drops the session on its own, so the
    // trailing logout's outcome is suppressed instead of reported.
    let operation = FleetOperation::new(Action::Reset, |session, reporter| {
        Box::pin(async move {
            let outcome = session.factory_reset().await;
            reporter.report(Action::Reset, outcome).await;
            session
        })
    })
    .suppress_logout();
    util::run_fleet(ctx, global, operation).await
}
