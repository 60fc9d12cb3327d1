// ── Domain model ──
//
// Value types for imports, tasks, transforms and workspaces. Collections
// are ordered maps of `Arc`s so a session update can share every subtree
// it does not touch with the previous session.

pub mod ids;
pub mod import;
pub mod task;
pub mod workspace;

pub use ids::{ImportId, TaskId, TransformKey};
pub use import::{Import, ImportState, WorkspaceRef};
pub use task::{
    Layer, Task, TaskData, TaskProgress, TaskTarget, Transform, TransformChain, TransformStatus,
};
pub use workspace::{Workspace, WorkspaceCreationStatus};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Serialize an id-keyed map as the list of its values, in order.
pub(crate) fn values_as_seq<S, K, V>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_seq(map.values())
}
