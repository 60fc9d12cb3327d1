// Transform chain endpoints
//
// Transforms are addressed by their position in the task's chain; the
// position is only meaningful until the chain is modified.

use crate::client::ImporterClient;
use crate::error::Error;
use crate::models::{TransformBody, TransformPayload, TransformsEnvelope};

impl ImporterClient {
    /// List the transforms of a task.
    ///
    /// `GET imports/{i}/tasks/{t}/transforms`
    pub async fn list_transforms(
        &self,
        import_id: u64,
        task_id: u64,
    ) -> Result<Vec<TransformBody>, Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks/{task_id}/transforms"))?;
        let env: TransformsEnvelope = self.get(url).await?;
        Ok(env.transforms)
    }

    /// Fetch the transform at `index`.
    ///
    /// `GET imports/{i}/tasks/{t}/transforms/{index}`
    pub async fn get_transform(
        &self,
        import_id: u64,
        task_id: u64,
        index: usize,
    ) -> Result<TransformBody, Error> {
        let url = self.import_url(&format!(
            "imports/{import_id}/tasks/{task_id}/transforms/{index}"
        ))?;
        let payload: TransformPayload = self.get(url).await?;
        Ok(payload.into_transform())
    }

    /// Append a transform to the end of the chain.
    ///
    /// `POST imports/{i}/tasks/{t}/transforms`
    pub async fn add_transform(
        &self,
        import_id: u64,
        task_id: u64,
        transform: &TransformBody,
    ) -> Result<(), Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks/{task_id}/transforms"))?;
        self.post_no_response(url, transform).await
    }

    /// Replace the transform at `index`.
    ///
    /// `PUT imports/{i}/tasks/{t}/transforms/{index}`. Some server versions
    /// echo the stored transform, others answer with an empty body.
    pub async fn update_transform(
        &self,
        import_id: u64,
        task_id: u64,
        index: usize,
        transform: &TransformBody,
    ) -> Result<Option<TransformBody>, Error> {
        let url = self.import_url(&format!(
            "imports/{import_id}/tasks/{task_id}/transforms/{index}"
        ))?;
        let payload: Option<TransformPayload> = self.put_optional(url, transform).await?;
        Ok(payload.map(TransformPayload::into_transform))
    }

    /// Remove the transform at `index`, shifting later transforms down by one.
    ///
    /// `DELETE imports/{i}/tasks/{t}/transforms/{index}`
    pub async fn delete_transform(
        &self,
        import_id: u64,
        task_id: u64,
        index: usize,
    ) -> Result<(), Error> {
        let url = self.import_url(&format!(
            "imports/{import_id}/tasks/{task_id}/transforms/{index}"
        ))?;
        self.delete(url).await
    }
}
