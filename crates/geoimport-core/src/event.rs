// ── Session transition events ──
//
// Every change to the import session is one of these events. The command
// layer produces them from request outcomes; `ImportSession::apply` is the
// only thing that consumes them.

use crate::error::CoreError;
use crate::model::{
    Import, ImportId, Task, TaskId, TaskProgress, Transform, TransformKey, Workspace,
};

/// Which entity a loading bracket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingScope {
    Import(ImportId),
    Task { import: ImportId, task: TaskId },
}

/// Target and optional status message of a scoped loading bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingDetails {
    pub scope: LoadingScope,
    pub message: Option<String>,
}

impl LoadingDetails {
    pub fn import(id: ImportId) -> Self {
        Self {
            scope: LoadingScope::Import(id),
            message: None,
        }
    }

    pub fn task(import: ImportId, task: TaskId) -> Self {
        Self {
            scope: LoadingScope::Task { import, task },
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Bytes sent so far out of the total upload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
}

impl UploadProgress {
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.loaded.saturating_mul(100) / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    // ── Loading brackets ─────────────────────────────────────────────
    /// `None` toggles the session-wide flag.
    LoadingBegan(Option<LoadingDetails>),
    LoadingEnded(Option<LoadingDetails>),

    // ── Imports ──────────────────────────────────────────────────────
    ImportsListLoaded(Vec<Import>),
    ImportsListLoadFailed(CoreError),
    ImportCreated(Import),
    ImportCreationFailed(CoreError),
    ImportLoaded(Import),
    ImportLoadFailed {
        import_id: ImportId,
        error: CoreError,
    },
    ImportDeleted(ImportId),
    ImportDeleteFailed {
        import_id: ImportId,
        error: CoreError,
    },
    ImportRunFailed {
        import_id: ImportId,
        error: CoreError,
    },

    // ── Tasks ────────────────────────────────────────────────────────
    TaskCreated {
        import_id: ImportId,
        tasks: Vec<Task>,
    },
    TaskCreationFailed {
        import_id: ImportId,
        error: CoreError,
    },
    TaskLoaded {
        import_id: ImportId,
        task: Task,
    },
    TaskLoadFailed {
        import_id: ImportId,
        task_id: TaskId,
        error: CoreError,
    },
    TaskUpdated {
        import_id: ImportId,
        task_id: TaskId,
        task: Task,
    },
    TaskUpdateFailed {
        import_id: ImportId,
        task_id: TaskId,
        error: CoreError,
    },
    TaskDeleted {
        import_id: ImportId,
        task_id: TaskId,
    },
    TaskDeleteFailed {
        import_id: ImportId,
        task_id: TaskId,
        error: CoreError,
    },
    TaskProgressLoaded {
        import_id: ImportId,
        task_id: TaskId,
        progress: TaskProgress,
    },

    // ── Uploads ──────────────────────────────────────────────────────
    UploadStarted {
        total: u64,
    },
    UploadProgressed(UploadProgress),
    UploadFinished,

    // ── Transforms ───────────────────────────────────────────────────
    TransformLoaded {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: Transform,
    },
    /// Local edit of the selected transform; nothing is sent.
    TransformChanged(Transform),
    TransformUpdated {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: Transform,
    },
    TransformAdded {
        import_id: ImportId,
        task_id: TaskId,
        transform: Transform,
    },
    TransformDeleted {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    },
    TransformLoadFailed {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        error: CoreError,
    },
    TransformAddFailed {
        import_id: ImportId,
        task_id: TaskId,
        error: CoreError,
    },
    TransformUpdateFailed {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        error: CoreError,
    },
    TransformDeleteFailed {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        error: CoreError,
    },

    // ── Workspaces ───────────────────────────────────────────────────
    WorkspacesLoaded(Vec<Workspace>),
    WorkspacesLoadFailed(CoreError),
    WorkspaceSelected(Option<String>),
    WorkspaceCreated(String),
    WorkspaceCreationFailed(CoreError),
    WorkspaceStatusDismissed,

    // ── Navigation ───────────────────────────────────────────────────
    SelectionCleared,
}

impl ImportEvent {
    /// Short stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadingBegan(_) => "loading_began",
            Self::LoadingEnded(_) => "loading_ended",
            Self::ImportsListLoaded(_) => "imports_list_loaded",
            Self::ImportsListLoadFailed(_) => "imports_list_load_failed",
            Self::ImportCreated(_) => "import_created",
            Self::ImportCreationFailed(_) => "import_creation_failed",
            Self::ImportLoaded(_) => "import_loaded",
            Self::ImportLoadFailed { .. } => "import_load_failed",
            Self::ImportDeleted(_) => "import_deleted",
            Self::ImportDeleteFailed { .. } => "import_delete_failed",
            Self::ImportRunFailed { .. } => "import_run_failed",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskCreationFailed { .. } => "task_creation_failed",
            Self::TaskLoaded { .. } => "task_loaded",
            Self::TaskLoadFailed { .. } => "task_load_failed",
            Self::TaskUpdated { .. } => "task_updated",
            Self::TaskUpdateFailed { .. } => "task_update_failed",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::TaskDeleteFailed { .. } => "task_delete_failed",
            Self::TaskProgressLoaded { .. } => "task_progress_loaded",
            Self::UploadStarted { .. } => "upload_started",
            Self::UploadProgressed(_) => "upload_progressed",
            Self::UploadFinished => "upload_finished",
            Self::TransformLoaded { .. } => "transform_loaded",
            Self::TransformChanged(_) => "transform_changed",
            Self::TransformUpdated { .. } => "transform_updated",
            Self::TransformAdded { .. } => "transform_added",
            Self::TransformDeleted { .. } => "transform_deleted",
            Self::TransformLoadFailed { .. } => "transform_load_failed",
            Self::TransformAddFailed { .. } => "transform_add_failed",
            Self::TransformUpdateFailed { .. } => "transform_update_failed",
            Self::TransformDeleteFailed { .. } => "transform_delete_failed",
            Self::WorkspacesLoaded(_) => "workspaces_loaded",
            Self::WorkspacesLoadFailed(_) => "workspaces_load_failed",
            Self::WorkspaceSelected(_) => "workspace_selected",
            Self::WorkspaceCreated(_) => "workspace_created",
            Self::WorkspaceCreationFailed(_) => "workspace_creation_failed",
            Self::WorkspaceStatusDismissed => "workspace_status_dismissed",
            Self::SelectionCleared => "selection_cleared",
        }
    }

    /// The error this event carries, if it reports a failure.
    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::ImportsListLoadFailed(error)
            | Self::ImportCreationFailed(error)
            | Self::WorkspacesLoadFailed(error)
            | Self::WorkspaceCreationFailed(error)
            | Self::ImportLoadFailed { error, .. }
            | Self::ImportDeleteFailed { error, .. }
            | Self::ImportRunFailed { error, .. }
            | Self::TaskCreationFailed { error, .. }
            | Self::TaskLoadFailed { error, .. }
            | Self::TaskUpdateFailed { error, .. }
            | Self::TaskDeleteFailed { error, .. }
            | Self::TransformLoadFailed { error, .. }
            | Self::TransformAddFailed { error, .. }
            | Self::TransformUpdateFailed { error, .. }
            | Self::TransformDeleteFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}
