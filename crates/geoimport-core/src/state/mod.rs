// ── Import session state ──
//
// The session is an immutable value. `ImportSession::apply` (reducer.rs)
// produces the next session from one event; `update.rs` holds the
// id-addressed copy-on-write helpers it is built from.

mod reducer;
mod update;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::event::UploadProgress;
use crate::model::{
    Import, ImportId, Task, TaskId, Transform, TransformKey, Workspace, WorkspaceCreationStatus,
};

/// Navigational depth of the session, derived from the [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrillLevel {
    List,
    Import,
    Task,
    Transform,
}

/// What the user has drilled into.
///
/// The selected import is a copy that may hold more detail than the list
/// entry with the same id. The selected task is always looked up in that
/// copy's `tasks`; the selected transform is a working copy that may carry
/// unsent local edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Import(Arc<Import>),
    Task {
        import: Arc<Import>,
        task: TaskId,
    },
    Transform {
        import: Arc<Import>,
        task: TaskId,
        key: TransformKey,
        transform: Arc<Transform>,
    },
}

impl Selection {
    pub fn level(&self) -> DrillLevel {
        match self {
            Self::None => DrillLevel::List,
            Self::Import(_) => DrillLevel::Import,
            Self::Task { .. } => DrillLevel::Task,
            Self::Transform { .. } => DrillLevel::Transform,
        }
    }

    pub fn import(&self) -> Option<&Arc<Import>> {
        match self {
            Self::None => None,
            Self::Import(import)
            | Self::Task { import, .. }
            | Self::Transform { import, .. } => Some(import),
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Task { task, .. } | Self::Transform { task, .. } => Some(*task),
            Self::None | Self::Import(_) => None,
        }
    }

    pub fn transform_key(&self) -> Option<TransformKey> {
        match self {
            Self::Transform { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Upload indicator: idle, or uploading with byte progress once known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading(Option<UploadProgress>),
}

impl UploadState {
    pub fn is_uploading(self) -> bool {
        matches!(self, Self::Uploading(_))
    }
}

/// Root of the import session tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSession {
    pub imports: Arc<IndexMap<ImportId, Arc<Import>>>,
    pub selection: Selection,
    pub workspaces: Arc<Vec<Workspace>>,
    pub selected_workspace: Option<String>,
    pub loading: bool,
    pub uploading: UploadState,
    pub loading_error: Option<CoreError>,
    pub task_creation_error: Option<CoreError>,
    pub workspace_creation_status: Option<WorkspaceCreationStatus>,
}

impl ImportSession {
    pub fn drill_level(&self) -> DrillLevel {
        self.selection.level()
    }

    pub fn import(&self, id: ImportId) -> Option<&Arc<Import>> {
        self.imports.get(&id)
    }

    pub fn selected_import(&self) -> Option<&Arc<Import>> {
        self.selection.import()
    }

    /// The selected task, resolved in the selected import.
    pub fn selected_task(&self) -> Option<&Arc<Task>> {
        let import = self.selection.import()?;
        import.tasks.get(&self.selection.task_id()?)
    }

    /// Working copy of the selected transform.
    pub fn selected_transform(&self) -> Option<&Arc<Transform>> {
        match &self.selection {
            Selection::Transform { transform, .. } => Some(transform),
            _ => None,
        }
    }

    /// Whether `import` is the selected import.
    pub fn is_selected_import(&self, import: ImportId) -> bool {
        self.selected_import().is_some_and(|i| i.id == import)
    }

    /// Whether `task` of `import` is the selected task.
    pub fn is_selected_task(&self, import: ImportId, task: TaskId) -> bool {
        self.is_selected_import(import) && self.selection.task_id() == Some(task)
    }

    /// Best-known copy of an import: the selected one if it matches, else the list entry.
    pub fn find_import(&self, id: ImportId) -> Option<&Arc<Import>> {
        self.selected_import()
            .filter(|import| import.id == id)
            .or_else(|| self.imports.get(&id))
    }
}
