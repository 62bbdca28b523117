//! Config file management (no device is ever contacted from here).

use phonectl_config::{
    Config, FleetProfile, config_path, load_config_or_default, save_config, store_password,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = config_path();
            if path.exists() {
                println!("Config already exists at {}", path.display());
                return Ok(());
            }

            let mut config = Config::default();
            config.profiles.insert(
                "default".into(),
                FleetProfile {
                    addresses: vec!["192.168.1.20".into(), "192.168.1.21".into()],
                    login: Some("admin".into()),
                    password_env: Some("PHONECTL_PASSWORD".into()),
                    ..FleetProfile::default()
                },
            );
            save_config(&config)?;
            println!("Wrote starter config to {}", path.display());
            Ok(())
        }

        ConfigCommand::Show => {
            let path = config_path();
            let contents =
                std::fs::read_to_string(&path).map_err(|source| CliError::LocalRead {
                    path,
                    source,
                })?;
            print!("{contents}");
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let config = load_config_or_default();
            let name = profile.unwrap_or_else(|| active_profile_name(global, &config));
            let password = rpassword::prompt_password(format!("Password for profile '{name}': "))
                .map_err(|e| CliError::Prompt {
                    reason: e.to_string(),
                })?;
            store_password(&name, &password)?;
            println!("Stored password for '{name}' in the system keyring");
            Ok(())
        }
    }
}
