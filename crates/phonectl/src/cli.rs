//! Clap derive structures for the `phonectl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// phonectl -- fleet management for VoIP phones over their REST API
#[derive(Debug, Parser)]
#[command(
    name = "phonectl",
    version,
    about = "Manage a fleet of VoIP phones from the command line",
    long_about = "Runs one operation against every addressed phone concurrently --\n\
        phone book transfer, parameter backup/restore, function-key rewrite,\n\
        factory reset -- and prints a per-device report.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Fleet profile to use
    #[arg(long, short = 'p', env = "PHONECTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device address (host, host:port, or full URL); repeatable.
    /// Overrides the profile's address list.
    #[arg(long = "addr", short = 'a', global = true)]
    pub addresses: Vec<String>,

    /// Scheme prepended to bare host tokens
    #[arg(long, env = "PHONECTL_SCHEME", global = true)]
    pub scheme: Option<String>,

    /// Login name for the devices' web accounts
    #[arg(long, short = 'l', env = "PHONECTL_LOGIN", global = true)]
    pub login: Option<String>,

    /// Environment variable to read the password from
    #[arg(long, global = true)]
    pub password_env: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PHONECTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Verify TLS certificates against the system store
    /// (phones ship self-signed certs, so verification is off by default)
    #[arg(long, global = true)]
    pub strict_tls: bool,

    /// Path to a custom CA certificate (PEM)
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Increase verbosity (-v streams results as they arrive)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe every device: login and logout, reporting reachability
    Scan,

    /// Transfer phone books
    #[command(alias = "pb")]
    Phonebook(PhonebookArgs),

    /// Download or upload the settings document
    #[command(alias = "params")]
    Parameters(ParametersArgs),

    /// Rewrite programmable function keys
    Keys(KeysArgs),

    /// Download a binary settings backup from every device
    Backup(BackupArgs),

    /// Restore a settings backup to every device
    Restore(RestoreArgs),

    /// Reset every device to factory defaults
    Reset,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Phone book ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PhonebookArgs {
    #[command(subcommand)]
    pub command: PhonebookCommand,
}

#[derive(Debug, Subcommand)]
pub enum PhonebookCommand {
    /// Upload a phone book XML file to every device
    Upload {
        /// Path to the phone book XML
        file: PathBuf,
    },

    /// Download each device's phone book into a directory
    Download {
        /// Output directory (one file per device)
        #[arg(long, short = 'o', default_value = ".")]
        out_dir: PathBuf,
    },
}

// ── Parameters ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ParametersArgs {
    #[command(subcommand)]
    pub command: ParametersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ParametersCommand {
    /// Download each device's settings document into a directory
    Download {
        /// Output directory (one file per device)
        #[arg(long, short = 'o', default_value = ".")]
        out_dir: PathBuf,

        /// File format for the downloaded documents
        #[arg(long, value_enum, default_value = "yaml")]
        format: ParamFormat,
    },

    /// Upload a settings document (YAML or JSON, by extension) to every device
    Upload {
        /// Path to the settings document
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ParamFormat {
    Yaml,
    Json,
}

// ── Function keys ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// Replace function keys whose display name matches exactly
    Replace {
        /// Display name to look for (exact, case-sensitive)
        original: String,

        /// Display name to write in its place
        replacement: String,
    },
}

// ── Backup / restore ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Output directory (one backup file per device)
    #[arg(long, short = 'o', default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Path to a settings backup taken with `phonectl backup`
    pub file: PathBuf,
}

// ── Config management ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file with an example fleet profile
    Init,

    /// Print the active configuration file
    Show,

    /// Print the configuration file path
    Path,

    /// Store a password in the system keyring for a profile
    SetPassword {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
