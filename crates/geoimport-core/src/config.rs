// ── Runtime connection configuration ──
//
// These types describe how to reach the import service and what to do with
// new tasks and workspaces. They never touch disk: the CLI builds an
// `ImporterConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use crate::preset::Preset;

/// HTTP basic credentials for the service.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one import service.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Importer REST root (e.g. `http://localhost:8080/geoserver/rest/`).
    pub url: Url,
    /// Catalog REST root used for workspaces and datastores.
    pub workspace_url: Url,
    pub auth: Option<Credentials>,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Applied to new tasks after an upload, first match wins.
    pub presets: Vec<Preset>,
    /// Datastore definitions created with every new workspace.
    pub datastore_templates: Vec<Value>,
}

impl ImporterConfig {
    /// Config for a service whose catalog lives under the same REST root.
    pub fn new(url: Url) -> Self {
        Self {
            workspace_url: url.clone(),
            url,
            auth: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            presets: Vec::new(),
            datastore_templates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.auth = Some(Credentials {
            username: username.into(),
            password,
        });
        self
    }

    #[must_use]
    pub fn with_workspace_url(mut self, workspace_url: Url) -> Self {
        self.workspace_url = workspace_url;
        self
    }
}
