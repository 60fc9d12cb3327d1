//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use geoimport_core::{ImportId, Importer, Task, TaskId, TransformKey};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// JSON body from either `--data` or `--from-file`.
pub fn json_body(data: Option<String>, from_file: Option<PathBuf>) -> Result<Value, CliError> {
    match (data, from_file) {
        (Some(inline), _) => serde_json::from_str(&inline).map_err(|e| CliError::Validation {
            field: "data".into(),
            reason: format!("invalid JSON: {e}"),
        }),
        (None, Some(path)) => read_json_file(&path),
        (None, None) => Err(CliError::Validation {
            field: "data".into(),
            reason: "provide --data or --from-file".into(),
        }),
    }
}

/// Load an import and one of its tasks into the session, selecting both.
///
/// Returns the session's copy of the task: transform keys are only
/// meaningful against the chain the session holds.
pub async fn drill_to_task(
    importer: &Importer,
    import: u64,
    task: u64,
) -> Result<Arc<Task>, CliError> {
    let import_id = ImportId(import);
    let task_id = TaskId(task);
    importer.load_import(import_id).await?;
    let loaded = importer.load_task(import_id, task_id).await?;
    Ok(importer
        .snapshot()
        .selected_task()
        .filter(|selected| selected.id == task_id)
        .cloned()
        .unwrap_or_else(|| Arc::new(loaded)))
}

/// Resolve a chain position to the stable key of the loaded task's transform.
pub fn transform_key(task: &Task, import: u64, index: usize) -> Result<TransformKey, CliError> {
    task.transform_chain
        .as_ref()
        .and_then(|chain| chain.key_at(index))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "transform".into(),
            identifier: format!("{import}/{}/{index}", task.id),
            list_command: format!("transforms list {import} {}", task.id),
        })
}
