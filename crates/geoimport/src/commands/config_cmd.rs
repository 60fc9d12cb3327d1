//! Config subcommand handlers.

use dialoguer::{Input, Select};
use serde_json::Value;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// TOML-like rendering of the config with plaintext passwords masked.
fn format_config_redacted(cfg: &Config) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(default) = &cfg.default_profile {
        lines.push(format!("default_profile = \"{default}\""));
        lines.push(String::new());
    }

    let d = &cfg.defaults;
    lines.extend([
        "[defaults]".to_owned(),
        format!("output = \"{}\"", d.output),
        format!("color = \"{}\"", d.color),
        format!("insecure = {}", d.insecure),
        format!("timeout = {}", d.timeout),
    ]);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        lines.push(String::new());
        lines.push(format!("[profiles.{name}]"));
        lines.push(format!("url = \"{}\"", p.url));

        let quoted = [
            ("workspace_url", p.workspace_url.clone()),
            ("username", p.username.clone()),
            ("password", p.password.as_ref().map(|_| "****".to_owned())),
            ("password_env", p.password_env.clone()),
            ("ca_cert", p.ca_cert.as_ref().map(|c| c.display().to_string())),
        ];
        for (key, value) in quoted {
            if let Some(value) = value {
                lines.push(format!("{key} = \"{value}\""));
            }
        }
        if let Some(insecure) = p.insecure {
            lines.push(format!("insecure = {insecure}"));
        }
        if let Some(timeout) = p.timeout {
            lines.push(format!("timeout = {timeout}"));
        }
    }

    if !cfg.presets.is_empty() || !cfg.datastores.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "# {} preset(s), {} datastore template(s)",
            cfg.presets.len(),
            cfg.datastores.len()
        ));
    }
    lines.join("\n")
}

/// Structured form of the config with plaintext passwords masked.
fn redacted_value(cfg: &Config) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(cfg)?;
    if let Some(profiles) = value.get_mut("profiles").and_then(Value::as_object_mut) {
        for profile in profiles.values_mut() {
            if let Some(password) = profile.get_mut("password") {
                *password = Value::String("****".into());
            }
        }
    }
    Ok(value)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Offer to store a password in the system keyring or return it for plaintext config.
///
/// Returns `Some(password)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_password_storage(password: &str, profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_password(profile_name, password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password.to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("geoimport configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. REST root
            let url: String = Input::new()
                .with_prompt("GeoServer REST URL")
                .default("http://localhost:8080/geoserver/rest/".into())
                .interact_text()
                .map_err(prompt_err)?;
            config::parse_url("url", &url)?;

            // 3. Credentials (empty username means anonymous)
            let username: String = Input::new()
                .with_prompt("Username (empty for anonymous)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let (username, password) = if username.is_empty() {
                (None, None)
            } else {
                let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
                if pass.is_empty() {
                    return Err(CliError::Validation {
                        field: "password".into(),
                        reason: "password cannot be empty".into(),
                    });
                }
                (Some(username), prompt_password_storage(&pass, &profile_name)?)
            };

            // 4. Build profile, keeping presets and other profiles
            let profile = Profile {
                url,
                username,
                password,
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            // 5. Write config
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: geoimport imports list");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let redacted = redacted_value(&cfg)?;
            let out = output::render_single(
                &global.output,
                &redacted,
                |_| format_config_redacted(&cfg),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            match key.as_str() {
                "url" => {
                    config::parse_url("url", &value)?;
                    profile.url = value;
                }
                "workspace_url" | "workspace-url" => {
                    config::parse_url("workspace_url", &value)?;
                    profile.workspace_url = Some(value);
                }
                "username" => profile.username = Some(value),
                "password_env" | "password-env" => profile.password_env = Some(value),
                "insecure" => {
                    profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "insecure".into(),
                        reason: "must be 'true' or 'false'".into(),
                    })?);
                }
                "timeout" => {
                    profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "timeout".into(),
                        reason: "must be a number (seconds)".into(),
                    })?);
                }
                "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: url, workspace_url, \
                             username, password_env, insecure, timeout, ca_cert"
                        ),
                    });
                }
            }

            config::save_config(&cfg)?;
            output::print_status(&format!("✓ Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: geoimport config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::print_status(&format!("✓ Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(&cfg, profile_name));
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            config::store_password(&profile_name, &secret)?;

            output::print_status(
                &format!("✓ Password stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "local".into(),
            Profile {
                url: "http://localhost:8080/geoserver/rest/".into(),
                username: Some("admin".into()),
                password: Some("geoserver".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn table_view_masks_password() {
        let shown = format_config_redacted(&sample());
        assert!(shown.contains("username = \"admin\""));
        assert!(shown.contains("password = \"****\""));
        assert!(!shown.contains("geoserver\""));
    }

    #[test]
    fn structured_view_masks_password() {
        let value = redacted_value(&sample()).unwrap_or_default();
        assert_eq!(value["profiles"]["local"]["password"], "****");
        assert_eq!(value["profiles"]["local"]["username"], "admin");
    }
}
