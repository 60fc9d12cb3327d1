//! CLI configuration: thin wrapper around `geoimport_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --username, --insecure, etc.).

use secrecy::SecretString;

use geoimport_core::{Credentials, ImporterConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use geoimport_config::{
    Config, Profile, config_path, load_config_or_default, parse_url, profile_to_importer_config,
    save_config, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `ImporterConfig` from the config file, the active profile and
/// command-line overrides. Flags win over profile values.
pub fn build_importer_config(global: &GlobalOpts) -> Result<ImporterConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.url.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(ref workspace_url) = global.workspace_url {
        profile.workspace_url = Some(workspace_url.clone());
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    // A password flag bypasses the profile's password chain entirely.
    let flag_auth = match (&global.password, profile.username.take()) {
        (Some(password), Some(username)) => Some(Credentials {
            username,
            password: SecretString::from(password.clone()),
        }),
        (_, username) => {
            profile.username = username;
            None
        }
    };

    let mut config = profile_to_importer_config(&cfg, &profile, &profile_name)?;
    if flag_auth.is_some() {
        config.auth = flag_auth;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}
