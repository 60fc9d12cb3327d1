// Import task endpoints
//
// `{base}imports/{i}/tasks[/{t}[/{element}]]`, file upload and progress.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde_json::Value;
use tracing::debug;

use crate::client::{ImporterClient, handle_response};
use crate::error::Error;
use crate::models::{ProgressResponse, TaskPayload, TaskResponse, TasksPayload};

/// Upload bodies are streamed in chunks of this size so progress can be reported.
const UPLOAD_CHUNK: usize = 64 * 1024;

/// Callback receiving `(bytes_sent, bytes_total)` while an upload streams.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// A file to attach to an import.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Read a file from disk, keeping only its file name for the upload.
    pub fn from_path(path: &std::path::Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Sub-resource of a task addressed by `PUT imports/{i}/tasks/{t}/{element}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskElement {
    Layer,
    Target,
}

impl TaskElement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for TaskElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ImporterClient {
    /// Fetch one task.
    ///
    /// `GET imports/{i}/tasks/{t}`
    pub async fn get_task(&self, import_id: u64, task_id: u64) -> Result<TaskResponse, Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks/{task_id}"))?;
        let payload: TaskPayload = self.get(url).await?;
        Ok(payload.into_task())
    }

    /// Update a task or one of its sub-resources.
    ///
    /// `PUT imports/{i}/tasks/{t}[/{element}]`. Returns the updated task when
    /// the service sends one back, `None` for a bodiless acknowledgement.
    pub async fn update_task(
        &self,
        import_id: u64,
        task_id: u64,
        body: &Value,
        element: Option<TaskElement>,
    ) -> Result<Option<TaskResponse>, Error> {
        let path = match element {
            Some(el) => format!("imports/{import_id}/tasks/{task_id}/{el}"),
            None => format!("imports/{import_id}/tasks/{task_id}"),
        };
        let url = self.import_url(&path)?;
        let payload: Option<TaskPayload> = self.put_optional(url, body).await?;
        Ok(payload.map(TaskPayload::into_task))
    }

    /// Delete a task from its import.
    ///
    /// `DELETE imports/{i}/tasks/{t}`
    pub async fn delete_task(&self, import_id: u64, task_id: u64) -> Result<(), Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks/{task_id}"))?;
        self.delete(url).await
    }

    /// Poll the progress of a running task.
    ///
    /// `GET imports/{i}/tasks/{t}/progress`
    pub async fn task_progress(
        &self,
        import_id: u64,
        task_id: u64,
    ) -> Result<ProgressResponse, Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks/{task_id}/progress"))?;
        self.get(url).await
    }

    /// Upload files into an import, creating one task per recognised dataset.
    ///
    /// `POST imports/{i}/tasks` (multipart). When `progress` is given the
    /// bodies are streamed and the callback sees the running byte count.
    pub async fn upload_files(
        &self,
        import_id: u64,
        files: Vec<UploadFile>,
        progress: Option<ProgressFn>,
    ) -> Result<Vec<TaskResponse>, Error> {
        let url = self.import_url(&format!("imports/{import_id}/tasks"))?;
        let total: u64 = files.iter().map(UploadFile::len).sum();
        let sent = Arc::new(AtomicU64::new(0));

        let mut form = Form::new();
        for file in files {
            let part = match &progress {
                Some(callback) => streamed_part(&file, total, &sent, callback),
                None => Part::bytes(file.bytes),
            };
            form = form.part("filedata", part.file_name(file.name));
        }

        debug!("POST {url} (multipart, {total} bytes)");
        let resp = self
            .request(Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        let payload: TasksPayload = handle_response(resp).await?;
        Ok(payload.into_tasks())
    }
}

fn streamed_part(file: &UploadFile, total: u64, sent: &Arc<AtomicU64>, callback: &ProgressFn) -> Part {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = file
        .bytes
        .chunks(UPLOAD_CHUNK)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();

    let sent = Arc::clone(sent);
    let callback = Arc::clone(callback);
    let stream = futures_util::stream::iter(chunks).inspect(move |chunk| {
        if let Ok(chunk) = chunk {
            let len = u64::try_from(chunk.len()).unwrap_or(u64::MAX);
            let now = sent.fetch_add(len, Ordering::Relaxed) + len;
            callback(now, total);
        }
    });

    Part::stream_with_length(Body::wrap_stream(stream), file.len())
}
