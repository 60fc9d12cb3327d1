// ── Session reducer ──
//
// `apply` is pure: it clones the root (a handful of `Arc` bumps), edits the
// clone through the copy-on-write helpers, and re-checks the selection.

use std::sync::Arc;

use super::{ImportSession, Selection, UploadState};
use crate::event::{ImportEvent, LoadingDetails, LoadingScope, UploadProgress};
use crate::model::{
    Import, ImportId, TaskId, Transform, TransformKey, TransformStatus, Workspace,
    WorkspaceCreationStatus,
};

impl ImportSession {
    /// Produce the session that follows `event`.
    ///
    /// Subtrees the event does not touch are shared with `self`.
    #[must_use]
    pub fn apply(&self, event: &ImportEvent) -> ImportSession {
        let mut next = self.clone();
        next.reduce(event);
        next.normalize_selection();
        next
    }

    #[allow(clippy::too_many_lines)]
    fn reduce(&mut self, event: &ImportEvent) {
        match event {
            // ── Loading brackets ─────────────────────────────────────
            ImportEvent::LoadingBegan(details) => self.set_loading(details.as_ref(), true),
            ImportEvent::LoadingEnded(details) => self.set_loading(details.as_ref(), false),

            // ── Imports ──────────────────────────────────────────────
            ImportEvent::ImportsListLoaded(imports) => {
                self.imports = Arc::new(
                    imports
                        .iter()
                        .map(|import| (import.id, Arc::new(import.clone())))
                        .collect(),
                );
                self.selection = Selection::None;
                self.loading_error = None;
            }
            ImportEvent::ImportsListLoadFailed(error)
            | ImportEvent::ImportCreationFailed(error)
            | ImportEvent::WorkspacesLoadFailed(error) => {
                self.loading_error = Some(error.clone());
            }
            ImportEvent::ImportCreated(import) => {
                let import = Arc::new(import.clone());
                Arc::make_mut(&mut self.imports).insert(import.id, Arc::clone(&import));
                self.selection = Selection::Import(import);
                self.loading_error = None;
            }
            ImportEvent::ImportLoaded(import) => self.import_loaded(import),
            ImportEvent::ImportLoadFailed { import_id, error }
            | ImportEvent::ImportDeleteFailed { import_id, error }
            | ImportEvent::ImportRunFailed { import_id, error } => {
                self.import_error(*import_id, error);
            }
            ImportEvent::ImportDeleted(id) => {
                if self.imports.contains_key(id) {
                    Arc::make_mut(&mut self.imports).shift_remove(id);
                }
                if self.is_selected_import(*id) {
                    self.selection = Selection::None;
                }
            }

            // ── Tasks ────────────────────────────────────────────────
            ImportEvent::TaskCreated { import_id, tasks } => {
                // A response for an import that is no longer selected is stale.
                if self.is_selected_import(*import_id) {
                    for task in tasks {
                        self.upsert_selected_task(*import_id, task);
                    }
                    self.task_creation_error = None;
                }
            }
            ImportEvent::TaskCreationFailed { error, .. } => {
                self.task_creation_error = Some(error.clone());
            }
            ImportEvent::TaskLoaded { import_id, task } => {
                if self.is_selected_import(*import_id) {
                    self.replace_task(*import_id, task.id, task);
                    self.upsert_selected_task(*import_id, task);
                    if !self.is_selected_task(*import_id, task.id) {
                        self.select_task(task.id);
                    }
                }
            }
            ImportEvent::TaskUpdated {
                import_id,
                task_id,
                task,
            } => {
                self.replace_task(*import_id, *task_id, task);
            }
            ImportEvent::TaskLoadFailed {
                import_id,
                task_id,
                error,
            }
            | ImportEvent::TaskUpdateFailed {
                import_id,
                task_id,
                error,
            }
            | ImportEvent::TaskDeleteFailed {
                import_id,
                task_id,
                error,
            }
            | ImportEvent::TransformLoadFailed {
                import_id,
                task_id,
                error,
                ..
            }
            | ImportEvent::TransformAddFailed {
                import_id,
                task_id,
                error,
            }
            | ImportEvent::TransformUpdateFailed {
                import_id,
                task_id,
                error,
                ..
            }
            | ImportEvent::TransformDeleteFailed {
                import_id,
                task_id,
                error,
                ..
            } => self.task_error(*import_id, *task_id, error),
            ImportEvent::TaskDeleted { import_id, task_id } => {
                self.remove_task(*import_id, *task_id);
            }
            ImportEvent::TaskProgressLoaded {
                import_id,
                task_id,
                progress,
            } => {
                self.edit_task(*import_id, *task_id, |t| t.progress = Some(progress.clone()));
            }

            // ── Uploads ──────────────────────────────────────────────
            ImportEvent::UploadStarted { total } => {
                self.uploading = UploadState::Uploading(Some(UploadProgress {
                    loaded: 0,
                    total: *total,
                }));
            }
            ImportEvent::UploadProgressed(progress) => {
                self.uploading = UploadState::Uploading(Some(*progress));
            }
            ImportEvent::UploadFinished => self.uploading = UploadState::Idle,

            // ── Transforms ───────────────────────────────────────────
            ImportEvent::TransformLoaded {
                import_id,
                task_id,
                key,
                transform,
            } => self.transform_loaded(*import_id, *task_id, *key, transform),
            ImportEvent::TransformChanged(edited) => {
                if let Selection::Transform { transform, .. } = &mut self.selection {
                    let mut edited = edited.clone();
                    edited.status = Some(TransformStatus::Modified);
                    *transform = Arc::new(edited);
                }
            }
            ImportEvent::TransformUpdated {
                import_id,
                task_id,
                key,
                transform,
            } => self.transform_updated(*import_id, *task_id, *key, transform),
            ImportEvent::TransformAdded {
                import_id,
                task_id,
                transform,
            } => {
                self.push_transform(*import_id, *task_id, &Arc::new(transform.clone()));
            }
            ImportEvent::TransformDeleted {
                import_id,
                task_id,
                key,
            } => {
                self.edit_chain(
                    *import_id,
                    *task_id,
                    |chain| chain.get(*key).is_some(),
                    |chain| {
                        chain.remove(*key);
                    },
                );
            }

            // ── Workspaces ───────────────────────────────────────────
            ImportEvent::WorkspacesLoaded(workspaces) => {
                self.workspaces = Arc::new(workspaces.clone());
            }
            ImportEvent::WorkspaceSelected(name) => self.selected_workspace.clone_from(name),
            ImportEvent::WorkspaceCreated(name) => {
                if !self.workspaces.iter().any(|ws| &ws.name == name) {
                    Arc::make_mut(&mut self.workspaces).push(Workspace::named(name.clone()));
                }
                self.workspace_creation_status = Some(WorkspaceCreationStatus::Success {
                    workspace: name.clone(),
                });
            }
            ImportEvent::WorkspaceCreationFailed(error) => {
                self.workspace_creation_status = Some(WorkspaceCreationStatus::Error {
                    error: error.clone(),
                });
            }
            ImportEvent::WorkspaceStatusDismissed => self.workspace_creation_status = None,

            // ── Navigation ───────────────────────────────────────────
            ImportEvent::SelectionCleared => self.selection = Selection::None,
        }
    }

    fn set_loading(&mut self, details: Option<&LoadingDetails>, loading: bool) {
        let Some(details) = details else {
            self.loading = loading;
            return;
        };
        let message = if loading { details.message.clone() } else { None };
        match details.scope {
            LoadingScope::Import(id) => {
                self.edit_import(id, |import| {
                    import.loading = loading;
                    import.message.clone_from(&message);
                });
            }
            LoadingScope::Task { import, task } => {
                self.edit_task(import, task, |t| {
                    t.loading = loading;
                    t.message.clone_from(&message);
                });
            }
        }
    }

    fn import_loaded(&mut self, import: &Import) {
        let mut import = import.clone();
        if let Some(previous) = self.find_import(import.id).cloned() {
            for (id, task) in &mut import.tasks {
                if let Some(old) = previous.tasks.get(id) {
                    *task = Arc::new((**task).clone().succeeding(old));
                }
            }
        }
        let import = Arc::new(import);
        if self.imports.contains_key(&import.id) {
            Arc::make_mut(&mut self.imports).insert(import.id, Arc::clone(&import));
        }
        self.selection = Selection::Import(import);
    }

    fn select_task(&mut self, task: TaskId) {
        if let Some(import) = self.selection.import().cloned() {
            self.selection = Selection::Task { import, task };
        }
    }

    fn transform_loaded(
        &mut self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: &Transform,
    ) {
        let known = self
            .selected_import()
            .filter(|import| import.id == import_id)
            .and_then(|import| import.tasks.get(&task_id))
            .and_then(|task| task.transform_chain.as_ref())
            .is_some_and(|chain| chain.get(key).is_some());
        if !known {
            return;
        }

        let loaded = Arc::new(Transform {
            status: None,
            ..transform.clone()
        });
        self.edit_chain(
            import_id,
            task_id,
            |chain| chain.get(key).is_some(),
            |chain| {
                chain.replace(key, Arc::clone(&loaded));
            },
        );
        if let Some(import) = self.selection.import().cloned() {
            self.selection = Selection::Transform {
                import,
                task: task_id,
                key,
                transform: loaded,
            };
        }
    }

    fn transform_updated(
        &mut self,
        import_id: ImportId,
        task_id: TaskId,
        key: TransformKey,
        transform: &Transform,
    ) {
        let stored = Arc::new(Transform {
            status: None,
            ..transform.clone()
        });
        self.edit_chain(
            import_id,
            task_id,
            |chain| chain.get(key).is_some(),
            |chain| {
                chain.replace(key, Arc::clone(&stored));
            },
        );

        let selected = self.is_selected_task(import_id, task_id)
            && self.selection.transform_key() == Some(key);
        if selected {
            if let Selection::Transform { transform, .. } = &mut self.selection {
                *transform = stored;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::error::CoreError;
    use crate::model::{Layer, Task, TransformChain, TransformKey};
    use crate::state::DrillLevel;

    fn import_with_tasks(id: u64, task_ids: &[u64]) -> Import {
        let mut import = Import::new(ImportId(id));
        for t in task_ids {
            import
                .tasks
                .insert(TaskId(*t), Arc::new(Task::new(TaskId(*t))));
        }
        import
    }

    fn task_with_chain(id: u64, kinds: &[&str]) -> Task {
        let mut task = Task::new(TaskId(id));
        task.transform_chain = Some(TransformChain::new(
            None,
            kinds.iter().map(|k| Transform::new(*k)),
        ));
        task
    }

    /// Session with import 5 selected and its task 7 selected.
    fn drilled_to_task() -> ImportSession {
        ImportSession::default()
            .apply(&ImportEvent::ImportsListLoaded(vec![import_with_tasks(5, &[7, 8])]))
            .apply(&ImportEvent::ImportLoaded(import_with_tasks(5, &[7, 8])))
            .apply(&ImportEvent::TaskLoaded {
                import_id: ImportId(5),
                task: task_with_chain(7, &["A", "B", "C"]),
            })
    }

    fn drilled_to_transform(position: usize) -> ImportSession {
        let session = drilled_to_task();
        let key = session
            .selected_task()
            .unwrap()
            .transform_chain
            .as_ref()
            .unwrap()
            .key_at(position)
            .unwrap();
        let kind = ["A", "B", "C"][position];
        session.apply(&ImportEvent::TransformLoaded {
            import_id: ImportId(5),
            task_id: TaskId(7),
            key,
            transform: Transform::new(kind),
        })
    }

    // ── List replacement ─────────────────────────────────────────────

    #[test]
    fn list_replace_is_idempotent_and_clears_selection() {
        let list = vec![import_with_tasks(1, &[]), import_with_tasks(2, &[3])];
        let event = ImportEvent::ImportsListLoaded(list.clone());

        let once = drilled_to_transform(0).apply(&event);
        let twice = once.apply(&event);

        for session in [&once, &twice] {
            let held: Vec<Import> = session.imports.values().map(|i| (**i).clone()).collect();
            assert_eq!(held, list);
            assert_eq!(session.selection, Selection::None);
            assert_eq!(session.drill_level(), DrillLevel::List);
        }
    }

    // ── Selection echo ───────────────────────────────────────────────

    #[test]
    fn task_update_reaches_every_copy() {
        let session = drilled_to_task();
        let mut updated = Task::new(TaskId(7));
        updated.layer = Some(Layer {
            name: None,
            title: Some("x".into()),
            description: None,
        });

        let next = session.apply(&ImportEvent::TaskUpdated {
            import_id: ImportId(5),
            task_id: TaskId(7),
            task: updated.clone(),
        });

        assert_eq!(**next.selected_task().unwrap(), updated);
        assert_eq!(**next.selected_import().unwrap().task(TaskId(7)).unwrap(), updated);
        assert_eq!(**next.imports[&ImportId(5)].task(TaskId(7)).unwrap(), updated);
        assert_eq!(next.selected_import().unwrap().tasks.len(), 2);
    }

    #[test]
    fn task_update_for_unknown_task_never_grows_lists() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::TaskUpdated {
            import_id: ImportId(5),
            task_id: TaskId(99),
            task: Task::new(TaskId(99)),
        });
        assert_eq!(next.selected_import().unwrap().tasks.len(), 2);
        assert_eq!(next.imports[&ImportId(5)].tasks.len(), 2);
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let session = ImportSession::default()
            .apply(&ImportEvent::ImportsListLoaded(vec![
                import_with_tasks(1, &[0]),
                import_with_tasks(2, &[0]),
            ]));

        let next = session.apply(&ImportEvent::LoadingBegan(Some(LoadingDetails::import(
            ImportId(1),
        ))));

        assert!(next.imports[&ImportId(1)].loading);
        assert!(!session.imports[&ImportId(1)].loading);
        assert!(Arc::ptr_eq(
            &session.imports[&ImportId(2)],
            &next.imports[&ImportId(2)]
        ));
        assert!(Arc::ptr_eq(&session.workspaces, &next.workspaces));
    }

    #[test]
    fn layer_name_is_immutable() {
        let mut named = Task::new(TaskId(7));
        named.layer = Some(Layer {
            name: Some("roads".into()),
            ..Layer::default()
        });
        let session = drilled_to_task().apply(&ImportEvent::TaskUpdated {
            import_id: ImportId(5),
            task_id: TaskId(7),
            task: named,
        });

        let mut renamed = Task::new(TaskId(7));
        renamed.layer = Some(Layer {
            name: Some("streets".into()),
            ..Layer::default()
        });
        let next = session.apply(&ImportEvent::TaskUpdated {
            import_id: ImportId(5),
            task_id: TaskId(7),
            task: renamed,
        });

        let layer = next.selected_task().unwrap().layer.clone().unwrap();
        assert_eq!(layer.name.as_deref(), Some("roads"));
    }

    // ── Deletion ─────────────────────────────────────────────────────

    #[test]
    fn deleting_selected_task_then_import_clears_selection() {
        let session = drilled_to_task();
        assert_eq!(session.drill_level(), DrillLevel::Task);

        let after_task = session.apply(&ImportEvent::TaskDeleted {
            import_id: ImportId(5),
            task_id: TaskId(7),
        });
        assert!(after_task.selected_task().is_none());
        assert_eq!(after_task.drill_level(), DrillLevel::Import);
        assert!(after_task.selected_import().unwrap().task(TaskId(7)).is_none());
        assert!(after_task.imports[&ImportId(5)].task(TaskId(7)).is_none());

        let after_import = after_task.apply(&ImportEvent::ImportDeleted(ImportId(5)));
        assert!(after_import.selected_import().is_none());
        assert!(after_import.imports.is_empty());
        assert_eq!(after_import.drill_level(), DrillLevel::List);
    }

    #[test]
    fn deleting_selected_transform_drops_to_task_level() {
        let session = drilled_to_transform(1);
        let key = session.selection.transform_key().unwrap();

        let next = session.apply(&ImportEvent::TransformDeleted {
            import_id: ImportId(5),
            task_id: TaskId(7),
            key,
        });

        assert_eq!(next.drill_level(), DrillLevel::Task);
        let kinds: Vec<String> = next
            .selected_task()
            .unwrap()
            .transform_chain
            .as_ref()
            .unwrap()
            .iter()
            .map(|(_, t)| t.kind.clone())
            .collect();
        assert_eq!(kinds, ["A", "C"]);
    }

    #[test]
    fn deleting_an_earlier_transform_keeps_the_selected_one() {
        let session = drilled_to_transform(2);
        let selected = session.selection.transform_key().unwrap();
        let first = session
            .selected_task()
            .unwrap()
            .transform_chain
            .as_ref()
            .unwrap()
            .key_at(0)
            .unwrap();

        let next = session.apply(&ImportEvent::TransformDeleted {
            import_id: ImportId(5),
            task_id: TaskId(7),
            key: first,
        });

        assert_eq!(next.drill_level(), DrillLevel::Transform);
        assert_eq!(next.selection.transform_key(), Some(selected));
        let chain = next.selected_task().unwrap().transform_chain.clone().unwrap();
        assert_eq!(chain.position(selected), Some(1));
        assert_eq!(next.selected_transform().unwrap().kind, "C");
    }

    #[test]
    fn unknown_transform_keys_leave_the_session_shared() {
        let session = drilled_to_task();

        for task in [7, 8] {
            let next = session.apply(&ImportEvent::TransformDeleted {
                import_id: ImportId(5),
                task_id: TaskId(task),
                key: TransformKey(99),
            });
            assert!(Arc::ptr_eq(
                &session.imports[&ImportId(5)],
                &next.imports[&ImportId(5)]
            ));
            assert!(Arc::ptr_eq(
                session.selection.import().unwrap(),
                next.selection.import().unwrap()
            ));
        }

        let next = session.apply(&ImportEvent::TransformUpdated {
            import_id: ImportId(5),
            task_id: TaskId(8),
            key: TransformKey(0),
            transform: Transform::new("A"),
        });
        assert!(next.imports[&ImportId(5)].tasks[&TaskId(8)].transform_chain.is_none());
    }

    #[test]
    fn first_added_transform_creates_the_chain() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::TransformAdded {
            import_id: ImportId(5),
            task_id: TaskId(8),
            transform: Transform::new("A"),
        });
        let chain = next.imports[&ImportId(5)].tasks[&TaskId(8)]
            .transform_chain
            .clone()
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.get(chain.key_at(0).unwrap()).unwrap().kind, "A");
    }

    // ── Stale responses ──────────────────────────────────────────────

    #[test]
    fn tasks_for_an_abandoned_import_are_ignored() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::TaskCreated {
            import_id: ImportId(6),
            tasks: vec![Task::new(TaskId(1))],
        });
        assert_eq!(next, session);
    }

    #[test]
    fn created_tasks_are_appended_to_selected_import() {
        let session = ImportSession::default()
            .apply(&ImportEvent::ImportCreated(Import::new(ImportId(3))));
        let next = session.apply(&ImportEvent::TaskCreated {
            import_id: ImportId(3),
            tasks: vec![Task::new(TaskId(0)), Task::new(TaskId(1))],
        });

        let ids: Vec<TaskId> = next.selected_import().unwrap().tasks.keys().copied().collect();
        assert_eq!(ids, [TaskId(0), TaskId(1)]);
        assert!(next.imports.contains_key(&ImportId(3)));
    }

    // ── Loading brackets ─────────────────────────────────────────────

    #[test]
    fn task_loading_bracket_marks_both_copies() {
        let details = LoadingDetails::task(ImportId(5), TaskId(7)).with_message("saving");
        let began = drilled_to_task().apply(&ImportEvent::LoadingBegan(Some(details.clone())));

        let selected = began.selected_task().unwrap();
        assert!(selected.loading);
        assert_eq!(selected.message.as_deref(), Some("saving"));
        assert!(began.imports[&ImportId(5)].task(TaskId(7)).unwrap().loading);
        assert!(!began.loading);

        let ended = began.apply(&ImportEvent::LoadingEnded(Some(details)));
        assert!(!ended.selected_task().unwrap().loading);
        assert!(ended.selected_task().unwrap().message.is_none());
        assert!(!ended.imports[&ImportId(5)].task(TaskId(7)).unwrap().loading);
    }

    #[test]
    fn unscoped_bracket_toggles_root_flag() {
        let session = ImportSession::default().apply(&ImportEvent::LoadingBegan(None));
        assert!(session.loading);
        assert!(!session.apply(&ImportEvent::LoadingEnded(None)).loading);
    }

    // ── Transforms ───────────────────────────────────────────────────

    #[test]
    fn local_edit_marks_transform_modified_until_saved() {
        let session = drilled_to_transform(0);
        let key = session.selection.transform_key().unwrap();
        let edited = Transform::new("A").with_option("field", json!("name"));

        let changed = session.apply(&ImportEvent::TransformChanged(edited.clone()));
        assert!(changed.selected_transform().unwrap().is_modified());
        let canonical = changed
            .selected_task()
            .unwrap()
            .transform_chain
            .as_ref()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap();
        assert!(!canonical.is_modified());
        assert!(canonical.options.is_empty());

        let saved = changed.apply(&ImportEvent::TransformUpdated {
            import_id: ImportId(5),
            task_id: TaskId(7),
            key,
            transform: edited,
        });
        let current = saved.selected_transform().unwrap();
        assert!(!current.is_modified());
        assert_eq!(current.options["field"], json!("name"));
    }

    #[test]
    fn local_edit_without_transform_selection_is_ignored() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::TransformChanged(Transform::new("A")));
        assert_eq!(next, session);
    }

    #[test]
    fn added_transform_gets_fresh_key() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::TransformAdded {
            import_id: ImportId(5),
            task_id: TaskId(7),
            transform: Transform::new("D"),
        });
        let chain = next.selected_task().unwrap().transform_chain.clone().unwrap();
        assert_eq!(chain.len(), 4);
        let last = chain.key_at(3).unwrap();
        assert_eq!(chain.get(last).unwrap().kind, "D");
    }

    #[test]
    fn reloading_task_keeps_transform_selection() {
        let session = drilled_to_transform(1);
        let key = session.selection.transform_key().unwrap();

        let next = session.apply(&ImportEvent::TaskLoaded {
            import_id: ImportId(5),
            task: task_with_chain(7, &["A", "B", "C"]),
        });

        assert_eq!(next.drill_level(), DrillLevel::Transform);
        assert_eq!(next.selection.transform_key(), Some(key));
    }

    #[test]
    fn reloading_import_keeps_transform_keys() {
        let session = drilled_to_task();
        let chain = session.selected_task().unwrap().transform_chain.clone().unwrap();
        let session = session.apply(&ImportEvent::TransformDeleted {
            import_id: ImportId(5),
            task_id: TaskId(7),
            key: chain.key_at(0).unwrap(),
        });
        let remaining: Vec<TransformKey> = session
            .selected_task()
            .unwrap()
            .transform_chain
            .as_ref()
            .unwrap()
            .iter()
            .map(|(key, _)| key)
            .collect();

        let mut reloaded = import_with_tasks(5, &[]);
        reloaded
            .tasks
            .insert(TaskId(7), Arc::new(task_with_chain(7, &["B", "C"])));
        let next = session.apply(&ImportEvent::ImportLoaded(reloaded));

        assert_eq!(next.drill_level(), DrillLevel::Import);
        let keys: Vec<TransformKey> = next.selected_import().unwrap().tasks[&TaskId(7)]
            .transform_chain
            .as_ref()
            .unwrap()
            .iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, remaining);
    }

    // ── Errors and workspaces ────────────────────────────────────────

    #[test]
    fn import_failure_lands_on_the_import() {
        let session = drilled_to_task();
        let next = session.apply(&ImportEvent::ImportRunFailed {
            import_id: ImportId(5),
            error: CoreError::Timeout,
        });
        assert_eq!(next.selected_import().unwrap().error, Some(CoreError::Timeout));
        assert_eq!(next.imports[&ImportId(5)].error, Some(CoreError::Timeout));
        assert!(next.loading_error.is_none());

        let unknown = session.apply(&ImportEvent::ImportLoadFailed {
            import_id: ImportId(42),
            error: CoreError::Timeout,
        });
        assert_eq!(unknown.loading_error, Some(CoreError::Timeout));
    }

    #[test]
    fn workspace_creation_status_lifecycle() {
        let created =
            ImportSession::default().apply(&ImportEvent::WorkspaceCreated("cite".into()));
        assert_eq!(created.workspaces.len(), 1);
        assert_eq!(
            created.workspace_creation_status,
            Some(WorkspaceCreationStatus::Success {
                workspace: "cite".into()
            })
        );

        let again = created.apply(&ImportEvent::WorkspaceCreated("cite".into()));
        assert_eq!(again.workspaces.len(), 1);

        let failed = again.apply(&ImportEvent::WorkspaceCreationFailed(CoreError::Timeout));
        assert!(matches!(
            failed.workspace_creation_status,
            Some(WorkspaceCreationStatus::Error { .. })
        ));

        let dismissed = failed.apply(&ImportEvent::WorkspaceStatusDismissed);
        assert!(dismissed.workspace_creation_status.is_none());
    }

    #[test]
    fn upload_progress_lifecycle() {
        let session = ImportSession::default().apply(&ImportEvent::UploadStarted { total: 10 });
        assert!(session.uploading.is_uploading());
        let session = session.apply(&ImportEvent::UploadProgressed(UploadProgress {
            loaded: 5,
            total: 10,
        }));
        assert_eq!(
            session.uploading,
            UploadState::Uploading(Some(UploadProgress { loaded: 5, total: 10 }))
        );
        let session = session.apply(&ImportEvent::UploadFinished);
        assert_eq!(session.uploading, UploadState::Idle);
    }
}
