// geoimport-core: Import session state and the command layer between
// geoimport-api and consumers (CLI, embedders).

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod importer;
pub mod model;
pub mod preset;
pub mod state;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{Credentials, ImporterConfig, TlsVerification};
pub use error::CoreError;
pub use event::{ImportEvent, LoadingDetails, LoadingScope, UploadProgress};
pub use importer::Importer;
pub use preset::{Preset, PresetData, apply_placeholders, find_preset, match_preset};
pub use state::{DrillLevel, ImportSession, Selection, UploadState};
pub use store::{SessionStore, SessionStream};

pub use geoimport_api::{TaskElement, UploadFile};

pub use model::{
    Import, ImportId, ImportState, Layer, Task, TaskData, TaskId, TaskProgress, TaskTarget,
    Transform, TransformChain, TransformKey, TransformStatus, Workspace, WorkspaceCreationStatus,
    WorkspaceRef,
};
