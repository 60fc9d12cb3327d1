// ── Import domain types ──

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use super::ids::{ImportId, TaskId};
use super::task::Task;
use crate::error::CoreError;

/// Lifecycle state of an import or task, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum ImportState {
    Init,
    InitError,
    #[default]
    Pending,
    Ready,
    Running,
    NoCrs,
    NoBounds,
    NoFormat,
    BadFormat,
    Complete,
    Error,
    Canceled,
    Other(String),
}

impl ImportState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "INIT" => Self::Init,
            "INIT_ERROR" => Self::InitError,
            "PENDING" => Self::Pending,
            "READY" => Self::Ready,
            "RUNNING" => Self::Running,
            "NO_CRS" => Self::NoCrs,
            "NO_BOUNDS" => Self::NoBounds,
            "NO_FORMAT" => Self::NoFormat,
            "BAD_FORMAT" => Self::BadFormat,
            "COMPLETE" => Self::Complete,
            "ERROR" => Self::Error,
            "CANCELED" => Self::Canceled,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Init => "INIT",
            Self::InitError => "INIT_ERROR",
            Self::Pending => "PENDING",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::NoCrs => "NO_CRS",
            Self::NoBounds => "NO_BOUNDS",
            Self::NoFormat => "NO_FORMAT",
            Self::BadFormat => "BAD_FORMAT",
            Self::Complete => "COMPLETE",
            Self::Error => "ERROR",
            Self::Canceled => "CANCELED",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the service has nothing left to do for this entity.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::Canceled | Self::InitError)
    }
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ImportState> for String {
    fn from(state: ImportState) -> Self {
        state.as_str().to_owned()
    }
}

/// Reference to the workspace an import writes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceRef {
    pub name: String,
}

impl WorkspaceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One bulk-ingestion session on the service.
///
/// `tasks` is keyed by task id in service order. `loading`, `message` and
/// `error` are client-side annotations and never sent back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Import {
    pub id: ImportId,
    pub href: Option<String>,
    pub state: ImportState,
    pub archive: Option<bool>,
    pub target_workspace: Option<WorkspaceRef>,
    #[serde(serialize_with = "super::values_as_seq")]
    pub tasks: IndexMap<TaskId, Arc<Task>>,
    pub loading: bool,
    pub message: Option<String>,
    pub error: Option<CoreError>,
}

impl Import {
    pub fn new(id: ImportId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.tasks.get(&id)
    }

    pub fn target_workspace_name(&self) -> Option<&str> {
        self.target_workspace.as_ref().map(|ws| ws.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_known_and_unknown_values() {
        for raw in ["INIT", "NO_CRS", "BAD_FORMAT", "COMPLETE"] {
            assert_eq!(ImportState::parse(raw).as_str(), raw);
        }
        assert_eq!(
            ImportState::parse("SOMETHING_NEW"),
            ImportState::Other("SOMETHING_NEW".into())
        );
    }

    #[test]
    fn terminal_states() {
        assert!(ImportState::Complete.is_terminal());
        assert!(!ImportState::Running.is_terminal());
        assert!(!ImportState::Ready.is_terminal());
    }
}
