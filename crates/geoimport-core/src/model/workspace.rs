// ── Workspace domain types ──

use serde::Serialize;

use crate::error::CoreError;

/// A catalog workspace. Names are unique on the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub name: String,
    pub href: Option<String>,
}

impl Workspace {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: None,
        }
    }
}

/// Outcome of the last workspace creation, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WorkspaceCreationStatus {
    Success { workspace: String },
    Error { error: CoreError },
}
