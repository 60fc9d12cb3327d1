// geoimport-api: Async Rust client for the GeoServer importer REST API
// and the workspace/datastore endpoints it depends on.

pub mod client;
pub mod error;
pub mod imports;
pub mod models;
pub mod tasks;
pub mod transforms;
pub mod transport;
pub mod workspaces;

pub use client::{BasicAuth, ImporterClient};
pub use error::Error;
pub use tasks::{ProgressFn, TaskElement, UploadFile};
pub use transport::{TlsMode, TransportConfig};
