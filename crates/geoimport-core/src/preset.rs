// ── Task presets ──
//
// A preset describes tasks it applies to (state, format, file name) and
// what to do with a matching task: element changes sent with `PUT` and
// transforms appended to its chain. Presets come from configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Import, Task, Transform};

/// Placeholder replaced with the import's target workspace name.
pub const TARGET_WORKSPACE_PLACEHOLDER: &str = "{targetWorkspace}";

/// Placeholder replaced with a new workspace's name in datastore templates.
pub const WORKSPACE_PLACEHOLDER: &str = "{workspace}";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Label for logs and listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Required task state, e.g. `READY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PresetData>,
    /// Element name (`layer`, `target`, or a task field) to the JSON sent for it.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub changes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Exact file name or a regular expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Preset {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Whether `preset` applies to `task`.
///
/// Every criterion the preset specifies must hold. A file pattern that is
/// not a valid regular expression only matches the identical file name.
pub fn match_preset(preset: &Preset, task: &Task) -> bool {
    if let Some(state) = &preset.state {
        if task.state.as_str() != state {
            return false;
        }
    }

    let Some(criteria) = &preset.data else {
        return true;
    };

    if let Some(format) = &criteria.format {
        if task.format() != Some(format.as_str()) {
            return false;
        }
    }

    if let Some(pattern) = &criteria.file {
        let Some(file) = task.file() else {
            return false;
        };
        if file != pattern && !Regex::new(pattern).is_ok_and(|re| re.is_match(file)) {
            return false;
        }
    }

    true
}

/// The first preset that applies to `task`.
pub fn find_preset<'a>(presets: &'a [Preset], task: &Task) -> Option<&'a Preset> {
    presets.iter().find(|preset| match_preset(preset, task))
}

/// Copy of `preset` with the import's target workspace filled in.
///
/// An import without a target workspace leaves the placeholders as they are.
pub fn apply_placeholders(preset: &Preset, import: &Import) -> Preset {
    let Some(workspace) = import.target_workspace_name() else {
        return preset.clone();
    };

    let changes = preset
        .changes
        .iter()
        .map(|(element, value)| {
            (
                element.clone(),
                substitute(value, TARGET_WORKSPACE_PLACEHOLDER, workspace),
            )
        })
        .collect();

    let transforms = preset
        .transforms
        .iter()
        .map(|transform| Transform {
            kind: transform.kind.clone(),
            status: transform.status,
            options: transform
                .options
                .iter()
                .map(|(k, v)| (k.clone(), substitute(v, TARGET_WORKSPACE_PLACEHOLDER, workspace)))
                .collect(),
        })
        .collect();

    Preset {
        changes,
        transforms,
        ..preset.clone()
    }
}

/// Replace `placeholder` with `replacement` in every string inside `value`.
///
/// Object keys are left alone.
pub fn substitute(value: &Value, placeholder: &str, replacement: &str) -> Value {
    match value {
        Value::String(s) => Value::String(s.replace(placeholder, replacement)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute(item, placeholder, replacement))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute(v, placeholder, replacement)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{ImportId, ImportState, TaskData, TaskId, WorkspaceRef};

    fn shapefile_task(state: ImportState, file: &str) -> Task {
        let mut task = Task::new(TaskId(0));
        task.state = state;
        task.data = Some(TaskData {
            kind: Some("file".into()),
            format: Some("Shapefile".into()),
            file: Some(file.into()),
        });
        task
    }

    fn preset(value: serde_json::Value) -> Preset {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn state_and_format_must_both_match() {
        let task = shapefile_task(ImportState::Ready, "abc.shp");

        let ready = preset(json!({ "state": "READY", "data": { "format": "Shapefile" } }));
        assert!(match_preset(&ready, &task));

        let running = preset(json!({ "state": "RUNNING", "data": { "format": "Shapefile" } }));
        assert!(!match_preset(&running, &task));

        let geotiff = preset(json!({ "data": { "format": "GeoTIFF" } }));
        assert!(!match_preset(&geotiff, &task));
    }

    #[test]
    fn file_matches_exactly_or_by_pattern() {
        let task = shapefile_task(ImportState::Ready, "roads_2024.shp");

        assert!(match_preset(&preset(json!({ "data": { "file": "roads_2024.shp" } })), &task));
        assert!(match_preset(&preset(json!({ "data": { "file": "^roads_\\d+\\.shp$" } })), &task));
        assert!(!match_preset(&preset(json!({ "data": { "file": "^rivers" } })), &task));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        let task = shapefile_task(ImportState::Ready, "abc.shp");
        let broken = preset(json!({ "data": { "file": "[abc" } }));
        assert!(!match_preset(&broken, &task));
    }

    #[test]
    fn file_criterion_needs_task_data() {
        let task = Task::new(TaskId(1));
        assert!(!match_preset(&preset(json!({ "data": { "file": ".*" } })), &task));
        assert!(match_preset(&Preset::default(), &task));
    }

    #[test]
    fn first_matching_preset_wins() {
        let task = shapefile_task(ImportState::Ready, "abc.shp");
        let presets = vec![
            preset(json!({ "name": "raster", "data": { "format": "GeoTIFF" } })),
            preset(json!({ "name": "any-ready", "state": "READY" })),
            preset(json!({ "name": "shapefiles", "data": { "format": "Shapefile" } })),
        ];
        assert_eq!(find_preset(&presets, &task).unwrap().label(), "any-ready");
        assert!(find_preset(&presets[..1], &task).is_none());
    }

    #[test]
    fn target_workspace_placeholder_is_filled() {
        let template = preset(json!({
            "changes": { "target": { "dataStore": { "name": "{targetWorkspace}_store" } } },
            "transforms": [ { "type": "AttributeRenameTransform", "to": "{targetWorkspace}_id" } ]
        }));
        let mut import = Import::new(ImportId(1));
        import.target_workspace = Some(WorkspaceRef::new("cite"));

        let applied = apply_placeholders(&template, &import);

        assert_eq!(
            applied.changes["target"]["dataStore"]["name"],
            json!("cite_store")
        );
        assert_eq!(applied.transforms[0].options["to"], json!("cite_id"));
        // The template itself is untouched.
        assert_eq!(
            template.changes["target"]["dataStore"]["name"],
            json!("{targetWorkspace}_store")
        );
    }

    #[test]
    fn placeholders_stay_without_target_workspace() {
        let template = preset(json!({ "changes": { "layer": { "title": "{targetWorkspace}" } } }));
        let applied = apply_placeholders(&template, &Import::new(ImportId(1)));
        assert_eq!(applied, template);
    }

    #[test]
    fn substitute_walks_nested_values() {
        let value = json!({
            "dataStore": {
                "name": "{workspace}_pg",
                "connectionParameters": { "entry": [ { "@key": "schema", "$": "{workspace}" } ] },
                "enabled": true
            }
        });
        let out = substitute(&value, WORKSPACE_PLACEHOLDER, "topp");
        assert_eq!(out["dataStore"]["name"], json!("topp_pg"));
        assert_eq!(
            out["dataStore"]["connectionParameters"]["entry"][0]["$"],
            json!("topp")
        );
        assert_eq!(out["dataStore"]["enabled"], json!(true));
    }
}
