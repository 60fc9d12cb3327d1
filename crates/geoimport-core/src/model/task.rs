// ── Task and transform domain types ──

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{TaskId, TransformKey};
use super::import::ImportState;
use crate::error::CoreError;

/// One dataset within an import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub href: Option<String>,
    pub state: ImportState,
    pub update_mode: Option<String>,
    pub data: Option<TaskData>,
    pub target: Option<TaskTarget>,
    pub layer: Option<Layer>,
    pub transform_chain: Option<TransformChain>,
    pub progress: Option<TaskProgress>,
    pub loading: bool,
    pub message: Option<String>,
    pub error: Option<CoreError>,
}

impl Task {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn format(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.format.as_deref())
    }

    pub fn file(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.file.as_deref())
    }

    /// Carry client-owned facts from the copy this task replaces.
    ///
    /// The layer name never changes once set, transform keys stay attached
    /// to the same positions, and the last polled progress is kept when the
    /// new copy has none.
    #[must_use]
    pub(crate) fn succeeding(mut self, previous: &Task) -> Self {
        if let (Some(layer), Some(old)) = (self.layer.as_mut(), previous.layer.as_ref()) {
            if old.name.is_some() {
                layer.name.clone_from(&old.name);
            }
        }
        if let (Some(chain), Some(old)) =
            (self.transform_chain.as_mut(), previous.transform_chain.as_ref())
        {
            *chain = std::mem::take(chain).adopting_keys(old);
        }
        if self.progress.is_none() {
            self.progress.clone_from(&previous.progress);
        }
        self
    }
}

/// Source data description (`{ "type": "file", "format": "Shapefile", "file": "a.shp" }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub kind: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
}

/// Store a task writes into. The store definition is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskTarget {
    DataStore(Value),
    CoverageStore(Value),
}

impl TaskTarget {
    pub fn store_name(&self) -> Option<&str> {
        match self {
            Self::DataStore(store) | Self::CoverageStore(store) => {
                store.get("name").and_then(Value::as_str)
            }
        }
    }
}

/// Published layer of a task. `name` cannot change once the service has set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Last polled progress of a running task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskProgress {
    pub progress: Option<f64>,
    pub total: Option<f64>,
    pub state: Option<ImportState>,
    pub message: Option<String>,
}

impl TaskProgress {
    /// Completed fraction in `0.0..=1.0`, when both counters are known.
    pub fn ratio(&self) -> Option<f64> {
        match (self.progress, self.total) {
            (Some(done), Some(total)) if total > 0.0 => Some((done / total).clamp(0.0, 1.0)),
            _ => None,
        }
    }
}

// ── Transforms ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformStatus {
    /// Edited locally, not yet sent to the service.
    Modified,
}

/// A processing step in a task's transform chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransformStatus>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Transform {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn is_modified(&self) -> bool {
        self.status == Some(TransformStatus::Modified)
    }
}

/// Ordered transforms of a task, addressed by stable [`TransformKey`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformChain {
    pub kind: Option<String>,
    #[serde(serialize_with = "super::values_as_seq")]
    transforms: IndexMap<TransformKey, Arc<Transform>>,
    #[serde(skip)]
    next_key: u64,
}

impl TransformChain {
    pub fn new(kind: Option<String>, transforms: impl IntoIterator<Item = Transform>) -> Self {
        let mut chain = Self {
            kind,
            ..Self::default()
        };
        for transform in transforms {
            chain.push(Arc::new(transform));
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn get(&self, key: TransformKey) -> Option<&Arc<Transform>> {
        self.transforms.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransformKey, &Arc<Transform>)> {
        self.transforms.iter().map(|(key, t)| (*key, t))
    }

    /// Position the service uses for the transform with `key`.
    pub fn position(&self, key: TransformKey) -> Option<usize> {
        self.transforms.get_index_of(&key)
    }

    pub fn key_at(&self, position: usize) -> Option<TransformKey> {
        self.transforms.get_index(position).map(|(key, _)| *key)
    }

    pub fn push(&mut self, transform: Arc<Transform>) -> TransformKey {
        let key = TransformKey(self.next_key);
        self.next_key += 1;
        self.transforms.insert(key, transform);
        key
    }

    /// Replace the transform at `key`; returns false when the key is unknown.
    pub fn replace(&mut self, key: TransformKey, transform: Arc<Transform>) -> bool {
        match self.transforms.get_mut(&key) {
            Some(slot) => {
                *slot = transform;
                true
            }
            None => false,
        }
    }

    /// Remove the transform at `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: TransformKey) -> Option<Arc<Transform>> {
        self.transforms.shift_remove(&key)
    }

    /// Re-key a freshly fetched chain so positions that existed in
    /// `previous` keep their keys and new positions get fresh ones.
    #[must_use]
    pub(crate) fn adopting_keys(self, previous: &TransformChain) -> Self {
        let mut next_key = previous.next_key;
        let transforms = self
            .transforms
            .into_values()
            .enumerate()
            .map(|(position, transform)| {
                let key = previous.key_at(position).unwrap_or_else(|| {
                    let key = TransformKey(next_key);
                    next_key += 1;
                    key
                });
                (key, transform)
            })
            .collect();
        Self {
            kind: self.kind,
            transforms,
            next_key,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn chain_of(kinds: &[&str]) -> TransformChain {
        TransformChain::new(None, kinds.iter().map(|k| Transform::new(*k)))
    }

    #[test]
    fn keys_survive_deletion_of_siblings() {
        let mut chain = chain_of(&["A", "B", "C"]);
        let c = chain.key_at(2).unwrap();

        chain.remove(chain.key_at(0).unwrap());

        assert_eq!(chain.position(c), Some(1));
        assert_eq!(chain.get(c).unwrap().kind, "C");
    }

    #[test]
    fn pushed_keys_are_never_reused() {
        let mut chain = chain_of(&["A"]);
        let a = chain.key_at(0).unwrap();
        chain.remove(a);
        let b = chain.push(Arc::new(Transform::new("B")));
        assert_ne!(a, b);
    }

    #[test]
    fn adopting_keys_keeps_positions_stable() {
        let mut previous = chain_of(&["A", "B"]);
        previous.remove(previous.key_at(0).unwrap());
        let kept = previous.key_at(0).unwrap();

        let fresh = chain_of(&["B", "C"]).adopting_keys(&previous);

        assert_eq!(fresh.key_at(0), Some(kept));
        let new_key = fresh.key_at(1).unwrap();
        assert_ne!(new_key, kept);
        assert_eq!(fresh.get(new_key).unwrap().kind, "C");
    }

    #[test]
    fn succeeding_keeps_layer_name() {
        let mut old = Task::new(TaskId(1));
        old.layer = Some(Layer {
            name: Some("roads".into()),
            ..Layer::default()
        });
        let mut new = Task::new(TaskId(1));
        new.layer = Some(Layer {
            name: Some("renamed".into()),
            title: Some("Roads".into()),
            description: None,
        });

        let merged = new.succeeding(&old);
        let layer = merged.layer.unwrap();
        assert_eq!(layer.name.as_deref(), Some("roads"));
        assert_eq!(layer.title.as_deref(), Some("Roads"));
    }

    #[test]
    fn transform_options_flatten() {
        let t = Transform::new("ReprojectTransform").with_option("target", json!("EPSG:4326"));
        assert_eq!(
            serde_json::to_value(&t).unwrap(),
            json!({ "type": "ReprojectTransform", "target": "EPSG:4326" })
        );
    }

    #[test]
    fn progress_ratio() {
        let p = TaskProgress {
            progress: Some(25.0),
            total: Some(100.0),
            ..TaskProgress::default()
        };
        assert_eq!(p.ratio(), Some(0.25));
        assert_eq!(TaskProgress::default().ratio(), None);
    }
}
