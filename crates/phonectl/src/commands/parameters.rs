//! Settings document download/upload handlers.

use std::path::Path;
use std::sync::Arc;

use phonectl_core::keys::purge_trailing;
use phonectl_core::{Action, FleetOperation, Parameters};

use crate::cli::{GlobalOpts, ParamFormat, ParametersArgs, ParametersCommand};
use crate::config::FleetContext;
use crate::error::CliError;

use super::util;

pub async fn handle(
    ctx: &FleetContext,
    args: ParametersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ParametersCommand::Download { out_dir, format } => {
            util::prepare_out_dir(&out_dir)?;
            let out_dir = Arc::new(out_dir);

            let operation =
                FleetOperation::new(Action::DownloadParameters, move |session, reporter| {
                    let out_dir = Arc::clone(&out_dir);
                    Box::pin(async move {
                        match session.download_parameters().await {
                            Ok(mut params) => {
                                // Trailing empty key slots are padding, not
                                // configuration.
                                params.function_keys = purge_trailing(&params.function_keys);
                                let path = util::device_file(
                                    &out_dir,
                                    session.address().authority(),
                                    format.file_name(),
                                );
                                match render(&params, format) {
                                    Ok(rendered) => {
                                        match tokio::fs::write(&path, rendered).await {
                                            Ok(()) => {
                                                reporter
                                                    .report(Action::DownloadParameters, Ok(()))
                                                    .await;
                                            }
                                            Err(e) => {
                                                reporter
                                                    .report_raw(
                                                        false,
                                                        format!(
                                                            "{} failed: cannot write {}: {e}",
                                                            Action::DownloadParameters,
                                                            path.display()
                                                        ),
                                                    )
                                                    .await;
                                            }
                                        }
                                    }
                                    Err(reason) => {
                                        reporter
                                            .report_raw(
                                                false,
                                                format!(
                                                    "{} failed: {reason}",
                                                    Action::DownloadParameters
                                                ),
                                            )
                                            .await;
                                    }
                                }
                            }
                            Err(e) => reporter.report(Action::DownloadParameters, Err(e)).await,
                        }
                        session
                    })
                });
            util::run_fleet(ctx, global, operation).await
        }

        ParametersCommand::Upload { file } => {
            // Read and parse before any network call.
            let text = std::fs::read_to_string(&file).map_err(|source| CliError::LocalRead {
                path: file.clone(),
                source,
            })?;
            let params = parse_document(&file, &text)?;
            let params = Arc::new(params);

            let operation =
                FleetOperation::new(Action::UploadParameters, move |session, reporter| {
                    let params = Arc::clone(&params);
                    Box::pin(async move {
                        let outcome = session.upload_parameters(&params).await;
                        reporter.report(Action::UploadParameters, outcome).await;
                        session
                    })
                });
            util::run_fleet(ctx, global, operation).await
        }
    }
}

impl ParamFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Yaml => "Parameters.yaml",
            Self::Json => "Parameters.json",
        }
    }
}

fn render(params: &Parameters, format: ParamFormat) -> Result<Vec<u8>, String> {
    match format {
        ParamFormat::Yaml => serde_yaml::to_string(params)
            .map(String::into_bytes)
            .map_err(|e| e.to_string()),
        ParamFormat::Json => serde_json::to_vec_pretty(params).map_err(|e| e.to_string()),
    }
}

/// Parse a settings document, sniffing the format by extension:
/// `.yaml`/`.yml` decode as YAML, everything else as JSON.
fn parse_document(path: &Path, text: &str) -> Result<Parameters, CliError> {
    let is_yaml = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(text).map_err(|e| CliError::BadDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(text).map_err(|e| CliError::BadDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
