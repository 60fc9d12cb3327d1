// ── Wire type to domain type conversions ──
//
// The service is loosely typed: states are strings, most fields may be
// absent, and transform options are open-ended. These impls are where the
// loose shapes become the model types used by the session.

use std::sync::Arc;

use geoimport_api::models::{
    ImportResponse, LayerResponse, ProgressResponse, TaskDataResponse, TaskResponse,
    TaskTargetResponse, TransformBody, TransformChainResponse, WorkspaceSummary,
};

use crate::model::{
    Import, ImportId, ImportState, Layer, Task, TaskData, TaskId, TaskProgress, TaskTarget,
    Transform, TransformChain, Workspace, WorkspaceRef,
};

fn parse_state(raw: Option<&str>) -> ImportState {
    raw.map_or_else(ImportState::default, ImportState::parse)
}

// ── Imports ──────────────────────────────────────────────────────────

impl From<ImportResponse> for Import {
    fn from(raw: ImportResponse) -> Self {
        Import {
            id: ImportId(raw.id),
            href: raw.href,
            state: parse_state(raw.state.as_deref()),
            archive: raw.archive,
            target_workspace: raw
                .target_workspace
                .map(|target| WorkspaceRef::new(target.workspace.name)),
            tasks: raw
                .tasks
                .into_iter()
                .map(|t| (TaskId(t.id), Arc::new(Task::from(t))))
                .collect(),
            loading: false,
            message: None,
            error: None,
        }
    }
}

// ── Tasks ────────────────────────────────────────────────────────────

impl From<TaskResponse> for Task {
    fn from(raw: TaskResponse) -> Self {
        Task {
            id: TaskId(raw.id),
            href: raw.href,
            state: parse_state(raw.state.as_deref()),
            update_mode: raw.update_mode,
            data: raw.data.map(TaskData::from),
            target: raw.target.and_then(target_from),
            layer: raw.layer.map(Layer::from),
            transform_chain: raw.transform_chain.map(TransformChain::from),
            progress: None,
            loading: false,
            message: None,
            error: None,
        }
    }
}

impl From<TaskDataResponse> for TaskData {
    fn from(raw: TaskDataResponse) -> Self {
        TaskData {
            kind: raw.kind,
            format: raw.format,
            file: raw.file,
        }
    }
}

fn target_from(raw: TaskTargetResponse) -> Option<TaskTarget> {
    raw.data_store
        .map(TaskTarget::DataStore)
        .or_else(|| raw.coverage_store.map(TaskTarget::CoverageStore))
}

impl From<LayerResponse> for Layer {
    fn from(raw: LayerResponse) -> Self {
        Layer {
            name: raw.name,
            title: raw.title,
            description: raw.description,
        }
    }
}

impl From<ProgressResponse> for TaskProgress {
    fn from(raw: ProgressResponse) -> Self {
        TaskProgress {
            progress: raw.progress,
            total: raw.total,
            state: raw.state.as_deref().map(ImportState::parse),
            message: raw.message,
        }
    }
}

// ── Transforms ───────────────────────────────────────────────────────

impl From<TransformBody> for Transform {
    fn from(raw: TransformBody) -> Self {
        let mut options = raw.options;
        // Link back to the resource, not an option of the transform.
        options.remove("href");
        Transform {
            kind: raw.kind,
            status: None,
            options,
        }
    }
}

impl From<&Transform> for TransformBody {
    fn from(transform: &Transform) -> Self {
        TransformBody {
            kind: transform.kind.clone(),
            options: transform.options.clone(),
        }
    }
}

impl From<TransformChainResponse> for TransformChain {
    fn from(raw: TransformChainResponse) -> Self {
        TransformChain::new(raw.kind, raw.transforms.into_iter().map(Transform::from))
    }
}

// ── Workspaces ───────────────────────────────────────────────────────

impl From<WorkspaceSummary> for Workspace {
    fn from(raw: WorkspaceSummary) -> Self {
        Workspace {
            name: raw.name,
            href: raw.href,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn task_from_json(value: serde_json::Value) -> Task {
        let raw: TaskResponse = serde_json::from_value(value).unwrap();
        Task::from(raw)
    }

    #[test]
    fn task_with_datastore_target() {
        let task = task_from_json(json!({
            "id": 3,
            "state": "NO_CRS",
            "data": { "type": "file", "format": "Shapefile", "file": "roads.shp" },
            "target": { "dataStore": { "name": "cite_store", "type": "PostGIS" } },
            "layer": { "name": "roads", "title": "roads" }
        }));

        assert_eq!(task.id, TaskId(3));
        assert_eq!(task.state, ImportState::NoCrs);
        assert_eq!(task.format(), Some("Shapefile"));
        assert_eq!(task.target.unwrap().store_name(), Some("cite_store"));
        assert_eq!(task.layer.unwrap().name.as_deref(), Some("roads"));
    }

    #[test]
    fn transform_href_is_dropped() {
        let body: TransformBody = serde_json::from_value(json!({
            "type": "DateFormatTransform",
            "href": "http://gs/imports/0/tasks/0/transforms/0",
            "field": "date"
        }))
        .unwrap();

        let transform = Transform::from(body);
        assert_eq!(transform.kind, "DateFormatTransform");
        assert!(!transform.options.contains_key("href"));
        assert_eq!(transform.options["field"], json!("date"));
    }

    #[test]
    fn chain_keeps_service_order() {
        let task = task_from_json(json!({
            "id": 0,
            "transformChain": {
                "type": "vector",
                "transforms": [ { "type": "A" }, { "type": "B" } ]
            }
        }));

        let chain = task.transform_chain.unwrap();
        let kinds: Vec<&str> = chain.iter().map(|(_, t)| t.kind.as_str()).collect();
        assert_eq!(kinds, ["A", "B"]);
        assert_eq!(chain.kind.as_deref(), Some("vector"));
    }

    #[test]
    fn missing_state_defaults_to_pending() {
        let raw = ImportResponse {
            id: 4,
            ..ImportResponse::default()
        };
        let import = Import::from(raw);
        assert_eq!(import.state, ImportState::Pending);
        assert!(import.tasks.is_empty());
    }
}
