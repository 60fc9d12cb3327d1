// Import session endpoints
//
// `{base}imports` and `{base}imports/{id}`.

use reqwest::Method;
use tracing::debug;

use crate::client::{ImporterClient, handle_empty};
use crate::error::Error;
use crate::models::{CreateImportRequest, ImportEnvelope, ImportResponse, ImportsEnvelope};

impl ImporterClient {
    /// List all import sessions.
    ///
    /// `GET imports`
    pub async fn list_imports(&self) -> Result<Vec<ImportResponse>, Error> {
        let url = self.import_url("imports")?;
        let env: ImportsEnvelope = self.get(url).await?;
        Ok(env.imports)
    }

    /// Create a new, empty import session.
    ///
    /// `POST imports`
    pub async fn create_import(&self, body: &CreateImportRequest) -> Result<ImportResponse, Error> {
        let url = self.import_url("imports")?;
        let env: ImportEnvelope = self.post(url, body).await?;
        Ok(env.import)
    }

    /// Fetch one import session with its tasks.
    ///
    /// `GET imports/{id}`
    pub async fn get_import(&self, id: u64) -> Result<ImportResponse, Error> {
        let url = self.import_url(&format!("imports/{id}"))?;
        let env: ImportEnvelope = self.get(url).await?;
        Ok(env.import)
    }

    /// Delete an import session.
    ///
    /// `DELETE imports/{id}`
    pub async fn delete_import(&self, id: u64) -> Result<(), Error> {
        let url = self.import_url(&format!("imports/{id}"))?;
        self.delete(url).await
    }

    /// Start executing an import in the background.
    ///
    /// `POST imports/{id}?async=true`. The service acknowledges immediately;
    /// completion has to be observed by re-fetching the import.
    pub async fn run_import(&self, id: u64) -> Result<(), Error> {
        let mut url = self.import_url(&format!("imports/{id}"))?;
        url.query_pairs_mut().append_pair("async", "true");
        debug!("POST {url}");
        let resp = self.request(Method::POST, url).send().await?;
        handle_empty(resp).await
    }
}
