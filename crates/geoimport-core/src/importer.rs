// ── Import command layer ──
//
// Each operation issues its request(s), turns the outcome into session
// events, and hands the outcome back to the caller. Remote calls are
// wrapped in a loading bracket: `LoadingBegan`, then the outcome event,
// then `LoadingEnded` with the same details.

use std::future::Future;
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use geoimport_api::models::{CreateImportRequest, TransformBody};
use geoimport_api::{
    BasicAuth, ImporterClient, ProgressFn, TaskElement, TlsMode, TransportConfig, UploadFile,
};
use serde_json::{Map, Value, json};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandResult};
use crate::config::{ImporterConfig, TlsVerification};
use crate::error::CoreError;
use crate::event::{ImportEvent, LoadingDetails, UploadProgress};
use crate::model::{
    Import, ImportId, Task, TaskId, TaskProgress, Transform, TransformKey, Workspace,
    WorkspaceRef,
};
use crate::preset::{Preset, WORKSPACE_PLACEHOLDER, apply_placeholders, find_preset, substitute};
use crate::state::ImportSession;
use crate::store::SessionStore;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<ImporterInner>`. Owns the REST client and
/// the session store every operation reports into.
#[derive(Clone)]
pub struct Importer {
    inner: Arc<ImporterInner>,
}

struct ImporterInner {
    config: ImporterConfig,
    client: ImporterClient,
    store: Arc<SessionStore>,
}

impl Importer {
    /// Build the HTTP client described by `config`.
    pub fn new(config: ImporterConfig) -> Result<Self, CoreError> {
        let auth = config.auth.as_ref().map(|creds| BasicAuth {
            username: creds.username.clone(),
            password: creds.password.clone(),
        });
        let client = ImporterClient::new(
            config.url.clone(),
            config.workspace_url.clone(),
            auth,
            &transport_for(&config),
        )?;
        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built client (tests, custom transports).
    pub fn with_client(config: ImporterConfig, client: ImporterClient) -> Self {
        Self {
            inner: Arc::new(ImporterInner {
                config,
                client,
                store: Arc::new(SessionStore::new()),
            }),
        }
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.inner.store
    }

    /// Current session.
    pub fn snapshot(&self) -> Arc<ImportSession> {
        self.inner.store.snapshot()
    }

    fn dispatch(&self, event: ImportEvent) {
        self.inner.store.dispatch(event);
    }

    // ── Command routing ──────────────────────────────────────────────

    /// Run `command` to completion.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        let config = &self.inner.config;
        match command {
            Command::CreateImport { workspace } => self
                .create_import(workspace.as_ref())
                .await
                .map(CommandResult::Import),
            Command::LoadImports => self.load_imports().await.map(CommandResult::Imports),
            Command::LoadImport { id } => self.load_import(id).await.map(CommandResult::Import),
            Command::DeleteImport { id } => {
                self.delete_import(id).await?;
                Ok(CommandResult::Ok)
            }
            Command::RunImport { id } => {
                self.run_import(id).await?;
                Ok(CommandResult::Ok)
            }

            Command::UploadFiles { import_id, files } => self
                .upload_files(import_id, files, &config.presets)
                .await
                .map(CommandResult::Tasks),
            Command::LoadTask { import_id, task_id } => {
                self.load_task(import_id, task_id).await.map(CommandResult::Task)
            }
            Command::UpdateTask {
                import_id,
                task_id,
                body,
                element,
            } => self
                .update_task(import_id, task_id, &body, element)
                .await
                .map(|task| task.map_or(CommandResult::Ok, CommandResult::Task)),
            Command::DeleteTask { import_id, task_id } => {
                self.delete_task(import_id, task_id).await?;
                Ok(CommandResult::Ok)
            }
            Command::LoadTaskProgress { import_id, task_id } => self
                .load_task_progress(import_id, task_id)
                .await
                .map(CommandResult::Progress),

            Command::LoadTransform {
                import_id,
                task_id,
                key,
            } => self
                .load_transform(import_id, task_id, key)
                .await
                .map(CommandResult::Transform),
            Command::AddTransform {
                import_id,
                task_id,
                transform,
            } => {
                self.add_transform(import_id, task_id, &transform).await?;
                Ok(CommandResult::Ok)
            }
            Command::UpdateTransform {
                import_id,
                task_id,
                key,
                transform,
            } => self
                .update_transform(import_id, task_id, key, &transform)
                .await
                .map(CommandResult::Transform),
            Command::DeleteTransform {
                import_id,
                task_id,
                key,
            } => {
                self.delete_transform(import_id, task_id, key).await?;
                Ok(CommandResult::Ok)
            }
            Command::EditTransform { transform } => {
                self.edit_transform(transform);
                Ok(CommandResult::Ok)
            }

            Command::LoadWorkspaces => self.load_workspaces().await.map(CommandResult::Workspaces),
            Command::SelectWorkspace { name } => {
                self.select_workspace(name);
                Ok(CommandResult::Ok)
            }
            Command::CreateWorkspace { name } => {
                self.create_workspace(&name, &config.datastore_templates)
                    .await?;
                Ok(CommandResult::Ok)
            }
            Command::DismissWorkspaceStatus => {
                self.dismiss_workspace_status();
                Ok(CommandResult::Ok)
            }
            Command::ClearSelection => {
                self.clear_selection();
                Ok(CommandResult::Ok)
            }
        }
    }

    /// Run `command` on the runtime without waiting for it.
    ///
    /// The outcome reaches the session as events; the handle yields the
    /// same result `execute` would.
    pub fn spawn(&self, command: Command) -> JoinHandle<Result<CommandResult, CoreError>> {
        let importer = self.clone();
        tokio::spawn(async move { importer.execute(command).await })
    }

    // ── Loading bracket ──────────────────────────────────────────────

    async fn bracketed<T>(
        &self,
        details: Option<LoadingDetails>,
        request: impl Future<Output = Result<T, geoimport_api::Error>>,
        outcome: impl FnOnce(&Result<T, CoreError>) -> Option<ImportEvent>,
    ) -> Result<T, CoreError> {
        self.dispatch(ImportEvent::LoadingBegan(details.clone()));
        let result = request.await.map_err(CoreError::from);
        if let Some(event) = outcome(&result) {
            self.dispatch(event);
        }
        self.dispatch(ImportEvent::LoadingEnded(details));
        result
    }

    // ── Imports ──────────────────────────────────────────────────────

    pub async fn create_import(&self, workspace: Option<&WorkspaceRef>) -> Result<Import, CoreError> {
        let body = CreateImportRequest::for_workspace(workspace.map(|ws| ws.name.as_str()));
        let client = &self.inner.client;

        let import = self
            .bracketed(
                None,
                async { client.create_import(&body).await.map(Import::from) },
                |result| {
                    Some(match result {
                        Ok(import) => ImportEvent::ImportCreated(import.clone()),
                        Err(error) => ImportEvent::ImportCreationFailed(error.clone()),
                    })
                },
            )
            .await?;

        info!(import = %import.id, "import created");
        Ok(import)
    }

    pub async fn load_imports(&self) -> Result<Vec<Import>, CoreError> {
        let client = &self.inner.client;
        self.bracketed(
            None,
            async {
                let imports = client.list_imports().await?;
                Ok(imports.into_iter().map(Import::from).collect::<Vec<_>>())
            },
            |result| {
                Some(match result {
                    Ok(imports) => ImportEvent::ImportsListLoaded(imports.clone()),
                    Err(error) => ImportEvent::ImportsListLoadFailed(error.clone()),
                })
            },
        )
        .await
    }

    pub async fn load_import(&self, id: ImportId) -> Result<Import, CoreError> {
        let client = &self.inner.client;
        self.bracketed(
            None,
            async { client.get_import(id.get()).await.map(Import::from) },
            |result| {
                Some(match result {
                    Ok(import) => ImportEvent::ImportLoaded(import.clone()),
                    Err(error) => ImportEvent::ImportLoadFailed {
                        import_id: id,
                        error: error.clone(),
                    },
                })
            },
        )
        .await
    }

    pub async fn delete_import(&self, id: ImportId) -> Result<(), CoreError> {
        let details = LoadingDetails::import(id).with_message("deleting");
        self.bracketed(
            Some(details),
            self.inner.client.delete_import(id.get()),
            |result| {
                Some(match result {
                    Ok(()) => ImportEvent::ImportDeleted(id),
                    Err(error) => ImportEvent::ImportDeleteFailed {
                        import_id: id,
                        error: error.clone(),
                    },
                })
            },
        )
        .await?;
        info!(import = %id, "import deleted");
        Ok(())
    }

    /// Start an import asynchronously on the service, then refresh once.
    ///
    /// The refresh reloads the import when it is selected and the import
    /// list otherwise. It happens right after the service acknowledges the
    /// run, not when the run completes.
    pub async fn run_import(&self, id: ImportId) -> Result<(), CoreError> {
        let details = LoadingDetails::import(id).with_message("running");
        let result = self
            .bracketed(Some(details), self.inner.client.run_import(id.get()), |_| None)
            .await;

        if let Err(error) = result {
            // TODO: decide whether run failures should reach the session; today the
            // event is built and logged but never dispatched.
            let event = ImportEvent::ImportRunFailed {
                import_id: id,
                error: error.clone(),
            };
            warn!(import = %id, event = event.name(), %error, "import run failed");
            return Err(error);
        }

        info!(import = %id, "import run started");
        let refreshed = if self.snapshot().is_selected_import(id) {
            self.load_import(id).await.map(drop)
        } else {
            self.load_imports().await.map(drop)
        };
        if let Err(error) = refreshed {
            debug!(import = %id, %error, "refresh after run failed");
        }
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Upload files into an import and apply the first matching preset to
    /// each new task.
    pub async fn upload_files(
        &self,
        import_id: ImportId,
        files: Vec<UploadFile>,
        presets: &[Preset],
    ) -> Result<Vec<Task>, CoreError> {
        let total: u64 = files.iter().map(UploadFile::len).sum();
        self.dispatch(ImportEvent::UploadStarted { total });

        let store = Arc::clone(&self.inner.store);
        let progress: ProgressFn = Arc::new(move |loaded: u64, total: u64| {
            store.dispatch(ImportEvent::UploadProgressed(UploadProgress { loaded, total }));
        });

        let client = &self.inner.client;
        let details = LoadingDetails::import(import_id).with_message("uploading");
        let result = self
            .bracketed(
                Some(details),
                async {
                    let tasks = client
                        .upload_files(import_id.get(), files, Some(progress))
                        .await?;
                    Ok(tasks.into_iter().map(Task::from).collect::<Vec<_>>())
                },
                |result| {
                    Some(match result {
                        Ok(tasks) => ImportEvent::TaskCreated {
                            import_id,
                            tasks: tasks.clone(),
                        },
                        Err(error) => ImportEvent::TaskCreationFailed {
                            import_id,
                            error: error.clone(),
                        },
                    })
                },
            )
            .await;
        self.dispatch(ImportEvent::UploadFinished);

        let tasks = result?;
        info!(import = %import_id, tasks = tasks.len(), total_bytes = total, "files uploaded");

        if !presets.is_empty() {
            self.apply_presets(import_id, &tasks, presets).await;
        }
        Ok(tasks)
    }

    async fn apply_presets(&self, import_id: ImportId, tasks: &[Task], presets: &[Preset]) {
        let import = self.snapshot().find_import(import_id).cloned();

        for task in tasks {
            // Presets match on task data, which upload responses may omit.
            let fetched;
            let task = if task.data.is_some() {
                task
            } else {
                match self.inner.client.get_task(import_id.get(), task.id.get()).await {
                    Ok(raw) => {
                        fetched = Task::from(raw);
                        &fetched
                    }
                    Err(error) => {
                        warn!(import = %import_id, task = %task.id, %error, "cannot fetch task for preset matching");
                        continue;
                    }
                }
            };

            let Some(preset) = find_preset(presets, task) else {
                debug!(import = %import_id, task = %task.id, "no preset matches");
                continue;
            };
            let preset = match &import {
                Some(import) => apply_placeholders(preset, import),
                None => preset.clone(),
            };

            info!(import = %import_id, task = %task.id, preset = preset.label(), "applying preset");
            self.apply_preset(import_id, task.id, &preset).await;
        }
    }

    /// Send a preset's changes, then append its transforms.
    ///
    /// `layer` and `target` changes go to their element endpoints as given;
    /// every other key is sent together as a task field update.
    async fn apply_preset(&self, import_id: ImportId, task_id: TaskId, preset: &Preset) {
        let mut task_fields = Map::new();
        for (element, change) in &preset.changes {
            let element_kind = match element.as_str() {
                "layer" => TaskElement::Layer,
                "target" => TaskElement::Target,
                _ => {
                    task_fields.insert(element.clone(), change.clone());
                    continue;
                }
            };
            if let Err(error) = self
                .update_task(import_id, task_id, change, Some(element_kind))
                .await
            {
                warn!(task = %task_id, element = %element_kind, %error, "preset change failed");
            }
        }

        if !task_fields.is_empty() {
            let body = json!({ "task": task_fields });
            if let Err(error) = self.update_task(import_id, task_id, &body, None).await {
                warn!(task = %task_id, %error, "preset task update failed");
            }
        }

        for transform in &preset.transforms {
            if let Err(error) = self.add_transform(import_id, task_id, transform).await {
                warn!(task = %task_id, transform = %transform.kind, %error, "preset transform failed");
            }
        }
    }

    pub async fn load_task(&self, import_id: ImportId, task_id: TaskId) -> Result<Task, CoreError> {
        let client = &self.inner.client;
        self.bracketed(
            Some(LoadingDetails::task(import_id, task_id)),
            async {
                client
                    .get_task(import_id.get(), task_id.get())
                    .await
                    .map(Task::from)
            },
            |result| {
                Some(match result {
                    Ok(task) => ImportEvent::TaskLoaded {
                        import_id,
                        task: task.clone(),
                    },
                    Err(error) => ImportEvent::TaskLoadFailed {
                        import_id,
                        task_id,
                        error: error.clone(),
                    },
                })
            },
        )
        .await
    }

    /// Update a task, or its `layer`/`target` element, then reconcile.
    ///
    /// Returns the updated task when the service sends one back.
    pub async fn update_task(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        body: &Value,
        element: Option<TaskElement>,
    ) -> Result<Option<Task>, CoreError> {
        let client = &self.inner.client;
        let updated = self
            .bracketed(
                Some(LoadingDetails::task(import_id, task_id)),
                async {
                    let task = client
                        .update_task(import_id.get(), task_id.get(), body, element)
                        .await?;
                    Ok(task.map(Task::from))
                },
                |result| match result {
                    Ok(Some(task)) => Some(ImportEvent::TaskUpdated {
                        import_id,
                        task_id,
                        task: task.clone(),
                    }),
                    Ok(None) => None,
                    Err(error) => Some(ImportEvent::TaskUpdateFailed {
                        import_id,
                        task_id,
                        error: error.clone(),
                    }),
                },
            )
            .await?;

        self.update_ui(import_id, task_id).await;
        Ok(updated)
    }

    /// Re-fetch the narrowest selected scope that shows the task: the task
    /// itself, its import, or the import list.
    async fn update_ui(&self, import_id: ImportId, task_id: TaskId) {
        let session = self.snapshot();
        let refreshed = if session.is_selected_task(import_id, task_id) {
            self.load_task(import_id, task_id).await.map(drop)
        } else if session.is_selected_import(import_id) {
            self.load_import(import_id).await.map(drop)
        } else {
            self.load_imports().await.map(drop)
        };
        if let Err(error) = refreshed {
            debug!(import = %import_id, task = %task_id, %error, "reconciliation refresh failed");
        }
    }

    pub async fn delete_task(&self, import_id: ImportId, task_id: TaskId) -> Result<(), CoreError> {
        let details = LoadingDetails::task(import_id, task_id).with_message("deleting");
        self.bracketed(
            Some(details),
            self.inner.client.delete_task(import_id.get(), task_id.get()),
            |result| {
                Some(match result {
                    Ok(()) => ImportEvent::TaskDeleted { import_id, task_id },
                    Err(error) => ImportEvent::TaskDeleteFailed {
                        import_id,
                        task_id,
                        error: error.clone(),
                    },
                })
            },
        )
        .await?;
        info!(import = %import_id, task = %task_id, "task deleted");
        Ok(())
    }

    /// Poll a task's progress once. Polling is not bracketed.
    pub async fn load_task_progress(
        &self,
        import_id: ImportId,
        task_id: TaskId,
    ) -> Result<TaskProgress, CoreError> {
        let result = self
            .inner
            .client
            .task_progress(import_id.get(), task_id.get())
            .await
            .map(TaskProgress::from)
            .map_err(CoreError::from);

        match result {
            Ok(progress) => {
                self.dispatch(ImportEvent::TaskProgressLoaded {
                    import_id,
                    task_id,
                    progress: progress.clone(),
                });
                Ok(progress)
            }
            Err(error) => {
                self.dispatch(ImportEvent::TaskLoadFailed {
                    import_id,
                    task_id,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    // ── Transforms ───────────────────────────────────────────────────

    /// Position of `key` in the best-known copy of the task's chain.
    fn transform_position(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    ) -> Result<usize, CoreError> {
        self.snapshot()
            .find_import(import_id)
            .and_then(|import| import.tasks.get(&task_id))
            .and_then(|task| task.transform_chain.as_ref())
            .and_then(|chain| chain.position(key))
            .ok_or_else(|| CoreError::not_found("transform", format!("{import_id}/{task_id}/{key}")))
    }

    pub async fn load_transform(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    ) -> Result<Transform, CoreError> {
        let position = self.transform_position(import_id, task_id, key)?;
        let client = &self.inner.client;
        self.bracketed(
            Some(LoadingDetails::task(import_id, task_id)),
            async {
                client
                    .get_transform(import_id.get(), task_id.get(), position)
                    .await
                    .map(Transform::from)
            },
            |result| {
                Some(match result {
                    Ok(transform) => ImportEvent::TransformLoaded {
                        import_id,
                        task_id,
                        key,
                        transform: transform.clone(),
                    },
                    Err(error) => ImportEvent::TransformLoadFailed {
                        import_id,
                        task_id,
                        key,
                        error: error.clone(),
                    },
                })
            },
        )
        .await
    }

    /// Append a transform to the end of a task's chain.
    pub async fn add_transform(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        transform: &Transform,
    ) -> Result<(), CoreError> {
        let body = TransformBody::from(transform);
        self.bracketed(
            Some(LoadingDetails::task(import_id, task_id)),
            self.inner
                .client
                .add_transform(import_id.get(), task_id.get(), &body),
            |result| {
                Some(match result {
                    Ok(()) => ImportEvent::TransformAdded {
                        import_id,
                        task_id,
                        transform: transform.clone(),
                    },
                    Err(error) => ImportEvent::TransformAddFailed {
                        import_id,
                        task_id,
                        error: error.clone(),
                    },
                })
            },
        )
        .await
    }

    /// Send a transform to the service, replacing the one at `key`.
    pub async fn update_transform(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: &Transform,
    ) -> Result<Transform, CoreError> {
        let position = self.transform_position(import_id, task_id, key)?;
        let body = TransformBody::from(transform);
        let client = &self.inner.client;

        let result = self
            .bracketed(
                Some(LoadingDetails::task(import_id, task_id)),
                async {
                    let echoed = client
                        .update_transform(import_id.get(), task_id.get(), position, &body)
                        .await?;
                    Ok(echoed.map_or_else(|| transform.clone(), Transform::from))
                },
                |result| {
                    result.as_ref().ok().map(|stored| ImportEvent::TransformUpdated {
                        import_id,
                        task_id,
                        key,
                        transform: stored.clone(),
                    })
                },
            )
            .await;

        if let Err(error) = &result {
            // TODO: decide whether transform update failures should reach the
            // session; today the event is built and logged but never dispatched.
            let event = ImportEvent::TransformUpdateFailed {
                import_id,
                task_id,
                key,
                error: error.clone(),
            };
            warn!(task = %task_id, transform = %key, event = event.name(), %error, "transform update failed");
        }
        result
    }

    pub async fn delete_transform(
        &self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
    ) -> Result<(), CoreError> {
        let position = self.transform_position(import_id, task_id, key)?;
        let result = self
            .bracketed(
                Some(LoadingDetails::task(import_id, task_id)),
                self.inner
                    .client
                    .delete_transform(import_id.get(), task_id.get(), position),
                |result| {
                    result.as_ref().ok().map(|()| ImportEvent::TransformDeleted {
                        import_id,
                        task_id,
                        key,
                    })
                },
            )
            .await;

        if let Err(error) = &result {
            // TODO: same open decision as transform updates: the failure event is
            // not dispatched.
            let event = ImportEvent::TransformDeleteFailed {
                import_id,
                task_id,
                key,
                error: error.clone(),
            };
            warn!(task = %task_id, transform = %key, event = event.name(), %error, "transform delete failed");
        }
        result
    }

    /// Replace the working copy of the selected transform and mark it modified.
    pub fn edit_transform(&self, transform: Transform) {
        self.dispatch(ImportEvent::TransformChanged(transform));
    }

    // ── Workspaces ───────────────────────────────────────────────────

    pub async fn load_workspaces(&self) -> Result<Vec<Workspace>, CoreError> {
        let client = &self.inner.client;
        self.bracketed(
            None,
            async {
                let workspaces = client.list_workspaces().await?;
                Ok(workspaces.into_iter().map(Workspace::from).collect::<Vec<_>>())
            },
            |result| {
                Some(match result {
                    Ok(workspaces) => ImportEvent::WorkspacesLoaded(workspaces.clone()),
                    Err(error) => ImportEvent::WorkspacesLoadFailed(error.clone()),
                })
            },
        )
        .await
    }

    pub fn select_workspace(&self, name: Option<String>) {
        self.dispatch(ImportEvent::WorkspaceSelected(name));
    }

    /// Create a workspace, then one datastore per template.
    ///
    /// `{workspace}` in each template is replaced with `name`. Datastores
    /// are created concurrently; the loading flag clears once every one of
    /// them has settled. Datastore failures are logged only.
    pub async fn create_workspace(&self, name: &str, templates: &[Value]) -> Result<(), CoreError> {
        let client = &self.inner.client;
        self.dispatch(ImportEvent::LoadingBegan(None));

        if let Err(error) = client.create_workspace(name).await.map_err(CoreError::from) {
            self.dispatch(ImportEvent::WorkspaceCreationFailed(error.clone()));
            self.dispatch(ImportEvent::LoadingEnded(None));
            return Err(error);
        }
        info!(workspace = name, "workspace created");
        self.dispatch(ImportEvent::WorkspaceCreated(name.to_owned()));

        let mut in_flight: FuturesUnordered<_> = templates
            .iter()
            .map(|template| {
                let definition = substitute(template, WORKSPACE_PLACEHOLDER, name);
                async move {
                    let result = client.create_datastore(name, &definition).await;
                    (definition, result)
                }
            })
            .collect();

        let mut remaining = in_flight.len();
        while let Some((definition, result)) = in_flight.next().await {
            remaining -= 1;
            let store = datastore_name(&definition);
            match result {
                Ok(()) => debug!(workspace = name, store, remaining, "datastore created"),
                Err(error) => {
                    warn!(workspace = name, store, remaining, %error, "datastore creation failed");
                }
            }
        }

        self.dispatch(ImportEvent::LoadingEnded(None));
        Ok(())
    }

    pub fn dismiss_workspace_status(&self) {
        self.dispatch(ImportEvent::WorkspaceStatusDismissed);
    }

    /// Navigate back to the import list without reloading it.
    pub fn clear_selection(&self) {
        self.dispatch(ImportEvent::SelectionCleared);
    }
}

fn transport_for(config: &ImporterConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
    }
}

fn datastore_name(definition: &Value) -> &str {
    definition
        .pointer("/dataStore/name")
        .or_else(|| definition.pointer("/coverageStore/name"))
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}
