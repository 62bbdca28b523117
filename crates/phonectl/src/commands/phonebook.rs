//! Phone book transfer handlers.

use std::sync::Arc;

use phonectl_core::{Action, FleetOperation};

use crate::cli::{GlobalOpts, PhonebookArgs, PhonebookCommand};
use crate::config::FleetContext;
use crate::error::CliError;

use super::util;

pub async fn handle(
    ctx: &FleetContext,
    args: PhonebookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PhonebookCommand::Upload { file } => {
            // Read before any network: a missing source file is a single
            // local error and no device is contacted.
            let xml = std::fs::read_to_string(&file).map_err(|source| CliError::LocalRead {
                path: file.clone(),
                source,
            })?;
            let xml = Arc::new(xml);

            let operation =
                FleetOperation::new(Action::UploadPhoneBook, move |session, reporter| {
                    let xml = Arc::clone(&xml);
                    Box::pin(async move {
                        let outcome = session.upload_phonebook(&xml).await;
                        reporter.report(Action::UploadPhoneBook, outcome).await;
                        session
                    })
                });
            util::run_fleet(ctx, global, operation).await
        }

        PhonebookCommand::Download { out_dir } => {
            util::prepare_out_dir(&out_dir)?;
            let out_dir = Arc::new(out_dir);

            let operation =
                FleetOperation::new(Action::DownloadPhoneBook, move |session, reporter| {
                    let out_dir = Arc::clone(&out_dir);
                    Box::pin(async move {
                        match session.download_phonebook().await {
                            Ok(xml) => {
                                let path = util::device_file(
                                    &out_dir,
                                    session.address().authority(),
                                    "LocalPhonebook.xml",
                                );
                                match tokio::fs::write(&path, xml).await {
                                    Ok(()) => {
                                        reporter.report(Action::DownloadPhoneBook, Ok(())).await;
                                    }
                                    Err(e) => {
                                        reporter
                                            .report_raw(
                                                false,
                                                format!(
                                                    "{} failed: cannot write {}: {e}",
                                                    Action::DownloadPhoneBook,
                                                    path.display()
                                                ),
                                            )
                                            .await;
                                    }
                                }
                            }
                            Err(e) => reporter.report(Action::DownloadPhoneBook, Err(e)).await,
                        }
                        session
                    })
                });
            util::run_fleet(ctx, global, operation).await
        }
    }
}
