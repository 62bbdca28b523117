//! GlobalOpts-aware fleet resolution on top of `phonectl-config`.
//!
//! CLI flags override the profile, the profile overrides the defaults.
//! Everything here happens before any device is contacted.

use std::time::Duration;

use secrecy::SecretString;

use phonectl_config::{Config, FleetProfile, load_config_or_default, resolve_password};
use phonectl_core::{Address, Credentials, TlsMode, TransportConfig, expand};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a fleet-bound command needs: the expanded addresses, the
/// shared credentials, and the HTTP client configuration.
pub struct FleetContext {
    pub addresses: Vec<Address>,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

/// The profile the invocation targets: `--profile`, then the config's
/// `default_profile`, then `"default"`.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve addresses, credentials, and transport from flags + config.
pub fn resolve_fleet(global: &GlobalOpts) -> Result<FleetContext, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    // Addresses: CLI flags replace the profile list entirely.
    let tokens: Vec<String> = if global.addresses.is_empty() {
        profile.map(|p| p.addresses.clone()).unwrap_or_default()
    } else {
        global.addresses.clone()
    };
    if tokens.is_empty() {
        return Err(CliError::NoAddresses {
            profile: profile_name,
        });
    }

    let scheme = global
        .scheme
        .clone()
        .or_else(|| profile.and_then(|p| p.scheme.clone()))
        .unwrap_or_else(|| config.defaults.scheme.clone());
    let addresses = expand(&scheme, &tokens);

    // Login: flag / PHONECTL_LOGIN (clap wires the env var), then profile.
    let login = global
        .login
        .clone()
        .or_else(|| profile.and_then(|p| p.login.clone()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let password = password_for(global, profile, &profile_name, &login)?;

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(config.defaults.timeout);

    let tls = if let Some(path) = &global.ca_cert {
        TlsMode::CustomCa(path.clone())
    } else if global.strict_tls {
        TlsMode::System
    } else {
        TlsMode::DangerAcceptInvalid
    };

    Ok(FleetContext {
        addresses,
        credentials: Credentials::new(login, password),
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(timeout),
        },
    })
}

/// Password chain: `--password-env`, then the profile's chain
/// (env var / keyring / plaintext), then an interactive prompt.
fn password_for(
    global: &GlobalOpts,
    profile: Option<&FleetProfile>,
    profile_name: &str,
    login: &str,
) -> Result<SecretString, CliError> {
    if let Some(name) = &global.password_env {
        return std::env::var(name)
            .map(SecretString::from)
            .map_err(|_| CliError::PasswordEnvMissing { name: name.clone() });
    }

    if let Some(profile) = profile {
        if let Ok(password) = resolve_password(profile, profile_name) {
            return Ok(password);
        }
    }

    let prompted = rpassword::prompt_password(format!("Password for '{login}': "))
        .map_err(|e| CliError::Prompt {
            reason: e.to_string(),
        })?;
    Ok(SecretString::from(prompted))
}
