// ── Command API ──
//
// Every import operation as a value. `Importer::execute` routes a command
// to the matching operation; `Importer::spawn` runs it in the background.

use geoimport_api::{TaskElement, UploadFile};
use serde_json::Value;

use crate::model::{
    Import, ImportId, Task, TaskId, TaskProgress, Transform, TransformKey, Workspace,
    WorkspaceRef,
};

#[derive(Debug, Clone)]
pub enum Command {
    // ── Imports ──────────────────────────────────────────────────────
    CreateImport {
        workspace: Option<WorkspaceRef>,
    },
    LoadImports,
    LoadImport {
        id: ImportId,
    },
    DeleteImport {
        id: ImportId,
    },
    RunImport {
        id: ImportId,
    },

    // ── Tasks ────────────────────────────────────────────────────────
    /// Upload files into an import, then apply the configured presets.
    UploadFiles {
        import_id: ImportId,
        files: Vec<UploadFile>,
    },
    LoadTask {
        import_id: ImportId,
        task_id: TaskId,
    },
    UpdateTask {
        import_id: ImportId,
        task_id: TaskId,
        body: Value,
        element: Option<TaskElement>,
    },
    DeleteTask {
        import_id: ImportId,
        task_id: TaskId,
    },
    LoadTaskProgress {
        import_id: ImportId,
        task_id: TaskId,
    },

    // ── Transforms ───────────────────────────────────────────────────
    LoadTransform {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    },
    AddTransform {
        import_id: ImportId,
        task_id: TaskId,
        transform: Transform,
    },
    UpdateTransform {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: Transform,
    },
    DeleteTransform {
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    },
    /// Local edit of the selected transform. No request is made.
    EditTransform {
        transform: Transform,
    },

    // ── Workspaces ───────────────────────────────────────────────────
    LoadWorkspaces,
    SelectWorkspace {
        name: Option<String>,
    },
    /// Create a workspace and the configured datastores inside it.
    CreateWorkspace {
        name: String,
    },
    DismissWorkspaceStatus,

    // ── Navigation ───────────────────────────────────────────────────
    ClearSelection,
}

/// Value returned by a successfully executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    Import(Import),
    Imports(Vec<Import>),
    Task(Task),
    Tasks(Vec<Task>),
    Progress(TaskProgress),
    Transform(Transform),
    Workspaces(Vec<Workspace>),
}
