// ── Id-addressed copy-on-write helpers ──
//
// Every helper works on a session that was cloned from the previous one,
// so `Arc::make_mut` copies exactly the nodes along the edited path and
// leaves every other subtree shared. An import can be held twice (list
// entry and selection) and both copies are edited together.

use std::sync::Arc;

use super::{ImportSession, Selection};
use crate::error::CoreError;
use crate::model::{Import, ImportId, Task, TaskId, Transform, TransformChain};

impl Selection {
    pub(super) fn import_mut(&mut self) -> Option<&mut Arc<Import>> {
        match self {
            Self::None => None,
            Self::Import(import)
            | Self::Task { import, .. }
            | Self::Transform { import, .. } => Some(import),
        }
    }
}

impl ImportSession {
    /// Edit every held copy of import `id` that satisfies `applies`.
    ///
    /// Returns whether any copy was edited.
    pub(super) fn edit_import_where(
        &mut self,
        id: ImportId,
        applies: impl Fn(&Import) -> bool,
        edit: impl Fn(&mut Import),
    ) -> bool {
        let mut edited = false;

        if self.imports.get(&id).is_some_and(|import| applies(import)) {
            let imports = Arc::make_mut(&mut self.imports);
            if let Some(entry) = imports.get_mut(&id) {
                edit(Arc::make_mut(entry));
                edited = true;
            }
        }

        if let Some(selected) = self.selection.import_mut() {
            if selected.id == id && applies(selected) {
                edit(Arc::make_mut(selected));
                edited = true;
            }
        }

        edited
    }

    pub(super) fn edit_import(&mut self, id: ImportId, edit: impl Fn(&mut Import)) -> bool {
        self.edit_import_where(id, |_| true, edit)
    }

    /// Edit every held copy of task `task` of import `import`.
    pub(super) fn edit_task(
        &mut self,
        import: ImportId,
        task: TaskId,
        edit: impl Fn(&mut Task),
    ) -> bool {
        self.edit_import_where(
            import,
            |i| i.tasks.contains_key(&task),
            |i| {
                if let Some(entry) = i.tasks.get_mut(&task) {
                    edit(Arc::make_mut(entry));
                }
            },
        )
    }

    /// Edit the transform chain of every held copy of a task whose chain
    /// satisfies `applies`. Copies without a chain stay untouched.
    pub(super) fn edit_chain(
        &mut self,
        import: ImportId,
        task: TaskId,
        applies: impl Fn(&TransformChain) -> bool,
        edit: impl Fn(&mut TransformChain),
    ) -> bool {
        self.edit_import_where(
            import,
            |i| {
                i.tasks
                    .get(&task)
                    .and_then(|t| t.transform_chain.as_ref())
                    .is_some_and(|chain| applies(chain))
            },
            |i| {
                if let Some(entry) = i.tasks.get_mut(&task) {
                    if let Some(chain) = Arc::make_mut(entry).transform_chain.as_mut() {
                        edit(chain);
                    }
                }
            },
        )
    }

    /// Append a transform to every held copy of a task, creating the chain
    /// where the task has none.
    pub(super) fn push_transform(
        &mut self,
        import: ImportId,
        task: TaskId,
        transform: &Arc<Transform>,
    ) -> bool {
        self.edit_task(import, task, |t| {
            t.transform_chain
                .get_or_insert_with(TransformChain::default)
                .push(Arc::clone(transform));
        })
    }

    /// Replace every held copy of a task with `replacement`, keeping the
    /// client-owned facts of the copy it replaces. Never adds an entry.
    pub(super) fn replace_task(&mut self, import: ImportId, task: TaskId, replacement: &Task) -> bool {
        self.edit_task(import, task, |current| {
            let mut next = replacement.clone();
            next.id = task;
            *current = next.succeeding(current);
        })
    }

    /// Insert or replace a task in the selected import only.
    pub(super) fn upsert_selected_task(&mut self, import: ImportId, task: &Task) {
        if let Some(selected) = self.selection.import_mut() {
            if selected.id != import {
                return;
            }
            let tasks = &mut Arc::make_mut(selected).tasks;
            let next = match tasks.get(&task.id) {
                Some(current) => task.clone().succeeding(current),
                None => task.clone(),
            };
            tasks.insert(task.id, Arc::new(next));
        }
    }

    pub(super) fn remove_task(&mut self, import: ImportId, task: TaskId) {
        self.edit_import_where(
            import,
            |i| i.tasks.contains_key(&task),
            |i| {
                i.tasks.shift_remove(&task);
            },
        );
    }

    /// Record an import-level failure, falling back to the session error
    /// when the import is not held anywhere.
    pub(super) fn import_error(&mut self, import: ImportId, error: &CoreError) {
        if !self.edit_import(import, |i| i.error = Some(error.clone())) {
            self.loading_error = Some(error.clone());
        }
    }

    /// Record a task-level failure, falling back to the owning import.
    pub(super) fn task_error(&mut self, import: ImportId, task: TaskId, error: &CoreError) {
        if !self.edit_task(import, task, |t| t.error = Some(error.clone())) {
            self.import_error(import, error);
        }
    }

    /// Drop selection levels that no longer resolve.
    ///
    /// A task selection needs its task in the selected import; a transform
    /// selection also needs its key in that task's chain.
    pub(super) fn normalize_selection(&mut self) {
        let (task_resolves, key_resolves) = match &self.selection {
            Selection::Task { import, task } => (import.tasks.contains_key(task), true),
            Selection::Transform {
                import, task, key, ..
            } => match import.tasks.get(task) {
                Some(t) => (
                    true,
                    t.transform_chain
                        .as_ref()
                        .is_some_and(|chain| chain.get(*key).is_some()),
                ),
                None => (false, false),
            },
            Selection::None | Selection::Import(_) => return,
        };

        if task_resolves && key_resolves {
            return;
        }

        self.selection = match std::mem::take(&mut self.selection) {
            Selection::Task { import, .. } => Selection::Import(import),
            Selection::Transform { import, task, .. } if task_resolves => {
                Selection::Task { import, task }
            }
            Selection::Transform { import, .. } => Selection::Import(import),
            other => other,
        };
    }
}
