//! Shared configuration for the phonectl CLI.
//!
//! TOML fleet profiles, credential resolution (env + keyring + plaintext),
//! and the config-file plumbing. A profile names the devices one invocation
//! targets; CLI flags override everything in it.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named fleet profiles.
    #[serde(default)]
    pub profiles: HashMap<String, FleetProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Scheme prepended to bare `host[:port]` address tokens.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout: default_timeout(),
        }
    }
}

fn default_scheme() -> String {
    "https".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named fleet profile: the devices plus how to log into them.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FleetProfile {
    /// Raw address tokens (`host`, `host:port`, or full URL).
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Override the default scheme for this fleet.
    pub scheme: Option<String>,

    /// Login name for the devices' web accounts.
    pub login: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override the per-request timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "phonectl", "phonectl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("phonectl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("PHONECTL_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the login name for a profile.
///
/// Order: profile `login`, then the `PHONECTL_LOGIN` environment variable.
pub fn resolve_login(profile: &FleetProfile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .login
        .clone()
        .or_else(|| std::env::var("PHONECTL_LOGIN").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password for a profile from the credential chain.
///
/// Order: profile `password_env` → env var lookup, system keyring,
/// plaintext `password` in the config file. Prompting (when all three come
/// up empty) is the CLI's job, not this crate's.
pub fn resolve_password(
    profile: &FleetProfile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("phonectl", &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref password) = profile.password {
        return Ok(SecretString::from(password.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for a profile.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new("phonectl", &format!("{profile_name}/password")).map_err(
        |e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        },
    )?;
    entry.set_password(password).map_err(|e| ConfigError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::{Config, Defaults, FleetProfile, resolve_login};

    #[test]
    fn defaults_are_https_and_thirty_seconds() {
        let defaults = Defaults::default();
        assert_eq!(defaults.scheme, "https");
        assert_eq!(defaults.timeout, 30);
    }

    #[test]
    fn profile_round_trips_through_toml() {
        let toml_str = r#"
            default_profile = "lab"

            [defaults]
            scheme = "http"

            [profiles.lab]
            addresses = ["10.0.0.10", "10.0.0.11:8443"]
            login = "admin"
            password_env = "LAB_PHONE_PASSWORD"
            timeout = 5
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.default_profile.as_deref(), Some("lab"));
        assert_eq!(config.defaults.scheme, "http");
        let lab = &config.profiles["lab"];
        assert_eq!(lab.addresses, vec!["10.0.0.10", "10.0.0.11:8443"]);
        assert_eq!(lab.login.as_deref(), Some("admin"));
        assert_eq!(lab.timeout, Some(5));

        let back = toml::to_string_pretty(&config).unwrap();
        let reparsed: Config = toml::from_str(&back).unwrap();
        assert_eq!(reparsed.profiles["lab"].addresses, lab.addresses);
    }

    #[test]
    fn login_resolution_prefers_the_profile() {
        let profile = FleetProfile {
            login: Some("admin".into()),
            ..FleetProfile::default()
        };
        assert_eq!(resolve_login(&profile, "lab").unwrap(), "admin");
    }

    #[test]
    fn missing_login_is_a_credentials_error() {
        // Assumes PHONECTL_LOGIN is not set in the test environment; the
        // env fallback itself is not exercised because process-wide env
        // mutation races with parallel tests.
        let profile = FleetProfile::default();
        assert!(resolve_login(&profile, "lab").is_err());
    }
}
