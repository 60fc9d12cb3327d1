// Workspace and datastore endpoints
//
// These live under the catalog REST root rather than the importer root.

use serde_json::Value;
use tracing::debug;

use crate::client::ImporterClient;
use crate::error::Error;
use crate::models::{CreateWorkspaceRequest, WorkspaceName, WorkspaceSummary, WorkspacesEnvelope};

impl ImporterClient {
    /// List all workspaces.
    ///
    /// `GET workspaces.json`
    pub async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, Error> {
        let url = self.rest_url("workspaces.json")?;
        let env: WorkspacesEnvelope = self.get(url).await?;
        Ok(env.workspaces.into_vec())
    }

    /// Create a workspace.
    ///
    /// `POST workspaces`. GeoServer answers 201 with the bare name as text.
    pub async fn create_workspace(&self, name: &str) -> Result<(), Error> {
        let url = self.rest_url("workspaces")?;
        let body = CreateWorkspaceRequest {
            workspace: WorkspaceName { name: name.into() },
        };
        debug!(workspace = name, "creating workspace");
        self.post_no_response(url, &body).await
    }

    /// Create a datastore inside a workspace from a complete JSON definition.
    ///
    /// `POST workspaces/{name}/datastores.json`
    pub async fn create_datastore(&self, workspace: &str, definition: &Value) -> Result<(), Error> {
        let url = self.rest_url(&format!("workspaces/{workspace}/datastores.json"))?;
        self.post_no_response(url, definition).await
    }
}
