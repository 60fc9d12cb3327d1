// Wire types for the importer and workspace REST APIs.
//
// These mirror the JSON the service produces, loosely typed where the
// service is loose (states as strings, transform options and store
// definitions as raw JSON). `geoimport-core` converts them into domain types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Imports ─────────────────────────────────────────────────────────

/// `{ "import": { ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportEnvelope {
    pub import: ImportResponse,
}

/// `{ "imports": [ ... ] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportsEnvelope {
    #[serde(default)]
    pub imports: Vec<ImportResponse>,
}

/// A single import session as returned by `GET imports/{id}`.
///
/// The list endpoint returns the same shape with only `id`, `href` and
/// `state` populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_workspace: Option<TargetWorkspace>,
    #[serde(default)]
    pub tasks: Vec<TaskResponse>,
}

/// `{ "workspace": { "name": "cite" } }` as nested under `targetWorkspace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWorkspace {
    pub workspace: WorkspaceName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceName {
    pub name: String,
}

/// Body for `POST imports`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateImportRequest {
    pub import: CreateImportBody,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImportBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_workspace: Option<TargetWorkspace>,
}

impl CreateImportRequest {
    /// Create an import targeting the given workspace (or the server default).
    pub fn for_workspace(workspace: Option<&str>) -> Self {
        Self {
            import: CreateImportBody {
                target_workspace: workspace.map(|name| TargetWorkspace {
                    workspace: WorkspaceName { name: name.into() },
                }),
            },
        }
    }
}

// ── Tasks ───────────────────────────────────────────────────────────

/// A single import task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TaskDataResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TaskTargetResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_chain: Option<TransformChainResponse>,
}

/// Task payloads come either wrapped (`{ "task": {...} }`) or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskPayload {
    Wrapped { task: TaskResponse },
    Bare(TaskResponse),
}

impl TaskPayload {
    pub fn into_task(self) -> TaskResponse {
        match self {
            Self::Wrapped { task } | Self::Bare(task) => task,
        }
    }
}

/// Uploading files answers with one task or a list of tasks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TasksPayload {
    Many { tasks: Vec<TaskResponse> },
    One { task: TaskResponse },
}

impl TasksPayload {
    pub fn into_tasks(self) -> Vec<TaskResponse> {
        match self {
            Self::Many { tasks } => tasks,
            Self::One { task } => vec![task],
        }
    }
}

/// The source data of a task (`{ "type": "file", "format": "Shapefile", "file": "a.shp" }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDataResponse {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Where a task writes its data: a vector `dataStore` or a raster `coverageStore`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTargetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_store: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_store: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// `GET imports/{i}/tasks/{t}/progress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Transforms ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformChainResponse {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub transforms: Vec<TransformBody>,
}

/// A transform definition: its `type` plus arbitrary type-specific options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Transform payloads come either wrapped (`{ "transform": {...} }`) or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransformPayload {
    Wrapped { transform: TransformBody },
    Bare(TransformBody),
}

impl TransformPayload {
    pub fn into_transform(self) -> TransformBody {
        match self {
            Self::Wrapped { transform } | Self::Bare(transform) => transform,
        }
    }
}

/// `{ "transforms": [ ... ] }`
#[derive(Debug, Clone, Deserialize)]
pub struct TransformsEnvelope {
    #[serde(default)]
    pub transforms: Vec<TransformBody>,
}

// ── Workspaces ──────────────────────────────────────────────────────

/// `GET workspaces.json`.
///
/// GeoServer answers `{ "workspaces": "" }` when no workspace exists and
/// `{ "workspaces": { "workspace": [ ... ] } }` otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspacesEnvelope {
    pub workspaces: WorkspaceList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkspaceList {
    Populated {
        #[serde(default)]
        workspace: Vec<WorkspaceSummary>,
    },
    Empty(String),
}

impl WorkspaceList {
    pub fn into_vec(self) -> Vec<WorkspaceSummary> {
        match self {
            Self::Populated { workspace } => workspace,
            Self::Empty(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Body for `POST workspaces`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceRequest {
    pub workspace: WorkspaceName,
}
