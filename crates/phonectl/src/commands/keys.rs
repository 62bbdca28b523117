//! Function-key rewrite handler.

use std::sync::Arc;

use phonectl_core::keys::{purge_trailing, replace_display_name};
use phonectl_core::{Action, FleetOperation, Parameters};

use crate::cli::{GlobalOpts, KeysArgs, KeysCommand};
use crate::config::FleetContext;
use crate::error::CliError;

use super::util;

pub async fn handle(
    ctx: &FleetContext,
    args: KeysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        KeysCommand::Replace {
            original,
            replacement,
        } => {
            let original = Arc::new(original);
            let replacement = Arc::new(replacement);

            let operation =
                FleetOperation::new(Action::ReplaceFunctionKeys, move |session, reporter| {
                    let original = Arc::clone(&original);
                    let replacement = Arc::clone(&replacement);
                    Box::pin(async move {
                        let downloaded = match session.download_parameters().await {
                            Ok(params) => params,
                            Err(e) => {
                                reporter.report(Action::ReplaceFunctionKeys, Err(e)).await;
                                return session;
                            }
                        };

                        let current = purge_trailing(&downloaded.function_keys);
                        let (rewritten, changed) =
                            replace_display_name(&current, &original, &replacement);

                        if changed.is_empty() {
                            // Nothing matched; uploading an all-blank table
                            // would be a pointless no-op for the device.
                            reporter
                                .report_raw(
                                    true,
                                    format!(
                                        "{} successful (no matching keys)",
                                        Action::ReplaceFunctionKeys
                                    ),
                                )
                                .await;
                            return session;
                        }

                        let partial = Parameters::from_function_keys(rewritten);
                        match session.upload_parameters(&partial).await {
                            Ok(()) => {
                                reporter
                                    .report_raw(
                                        true,
                                        format!(
                                            "{} successful ({} keys changed)",
                                            Action::ReplaceFunctionKeys,
                                            changed.len()
                                        ),
                                    )
                                    .await;
                            }
                            Err(e) => reporter.report(Action::ReplaceFunctionKeys, Err(e)).await,
                        }
                        session
                    })
                });
            util::run_fleet(ctx, global, operation).await
        }
    }
}
