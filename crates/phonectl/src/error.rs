//! CLI error types with miette diagnostics.
//!
//! Everything here is a run-level failure that aborts before (or instead
//! of) the fleet run. Per-device failures never land here -- they travel
//! through the result channel and show up in the report.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use phonectl_config::ConfigError;

/// Exit codes per the CLI contract. Success is the implicit zero.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Fleet resolution ─────────────────────────────────────────────

    #[error("No device addresses given")]
    #[diagnostic(
        code(phonectl::no_addresses),
        help(
            "Pass one or more --addr flags, or configure addresses in the\n\
             '{profile}' profile: phonectl config init"
        )
    )]
    NoAddresses { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(phonectl::no_credentials),
        help(
            "Pass --login (and --password-env), set PHONECTL_LOGIN, or run:\n\
             phonectl config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    #[error("Environment variable '{name}' is not set")]
    #[diagnostic(
        code(phonectl::password_env),
        help("--password-env names a variable that must hold the device password")
    )]
    PasswordEnvMissing { name: String },

    // ── Local I/O ────────────────────────────────────────────────────

    #[error("Cannot read {path}")]
    #[diagnostic(
        code(phonectl::local_io),
        help("The file must exist and be readable before any device is contacted")
    )]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output directory {path}")]
    #[diagnostic(
        code(phonectl::output_dir),
        help("The whole run is aborted before any device is contacted")
    )]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid settings document: {reason}")]
    #[diagnostic(
        code(phonectl::bad_document),
        help("Expected YAML (.yaml/.yml) or JSON as produced by 'phonectl parameters download'")
    )]
    BadDocument { path: PathBuf, reason: String },

    // ── Setup ────────────────────────────────────────────────────────

    #[error("Failed to set up the HTTP client")]
    #[diagnostic(
        code(phonectl::client_setup),
        help("Check --ca-cert: the file must be a readable PEM certificate")
    )]
    ClientSetup {
        #[source]
        source: phonectl_core::Error,
    },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(
        code(phonectl::prompt),
        help("Use --yes to skip confirmations, or --password-env in non-interactive runs")
    )]
    Prompt { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(phonectl::config))]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Map the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoAddresses { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } | Self::PasswordEnvMissing { .. } => exit_code::AUTH,
            Self::ClientSetup { .. } => exit_code::CONNECTION,
            Self::LocalRead { .. }
            | Self::OutputDir { .. }
            | Self::BadDocument { .. }
            | Self::Prompt { .. }
            | Self::Config(_) => exit_code::GENERAL,
        }
    }
}
