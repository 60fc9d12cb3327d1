//! Task command handlers, including file uploads.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use tokio::sync::broadcast::error::RecvError;

use geoimport_core::{
    Command as CoreCommand, ImportEvent, ImportId, Importer, Task, TaskElement, TaskId,
    TaskProgress, UploadFile,
};

use crate::cli::{GlobalOpts, TaskElementArg, TasksArgs, TasksCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Layer")]
    layer: String,
}

impl TaskRow {
    pub(super) fn new(task: &Task, color: bool) -> Self {
        Self {
            id: task.id.get(),
            state: output::paint_state(&task.state, color),
            format: task.format().unwrap_or("-").to_owned(),
            file: task.file().unwrap_or("-").to_owned(),
            store: task
                .target
                .as_ref()
                .and_then(|t| t.store_name())
                .unwrap_or("-")
                .to_owned(),
            layer: task
                .layer
                .as_ref()
                .and_then(|l| l.name.clone())
                .unwrap_or_else(|| "-".into()),
        }
    }
}

fn detail(task: &Task, color: bool) -> String {
    let mut lines = vec![
        format!("Task:        {}", task.id),
        format!("State:       {}", output::paint_state(&task.state, color)),
        format!("Format:      {}", task.format().unwrap_or("-")),
        format!("File:        {}", task.file().unwrap_or("-")),
    ];
    if let Some(mode) = &task.update_mode {
        lines.push(format!("Update mode: {mode}"));
    }
    if let Some(store) = task.target.as_ref().and_then(|t| t.store_name()) {
        lines.push(format!("Store:       {store}"));
    }
    if let Some(layer) = &task.layer {
        lines.push(format!("Layer:       {}", layer.name.as_deref().unwrap_or("-")));
        if let Some(title) = &layer.title {
            lines.push(format!("Title:       {title}"));
        }
    }
    let transforms = task.transform_chain.as_ref().map_or(0, |c| c.len());
    lines.push(format!("Transforms:  {transforms}"));
    lines.join("\n")
}

fn progress_detail(progress: &TaskProgress) -> String {
    let mut lines = Vec::new();
    if let Some(state) = &progress.state {
        lines.push(format!("State:    {state}"));
    }
    match progress.ratio() {
        Some(ratio) => lines.push(format!("Progress: {:.0}%", ratio * 100.0)),
        None => lines.push("Progress: unknown".into()),
    }
    if let Some(message) = &progress.message {
        lines.push(format!("Message:  {message}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    importer: &Importer,
    args: TasksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        TasksCommand::List { import } => {
            let import = importer.load_import(ImportId(import)).await?;
            let tasks: Vec<&Arc<Task>> = import.tasks.values().collect();
            let out = output::render_list(
                &global.output,
                &tasks,
                |t| TaskRow::new(t, color),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TasksCommand::Get { import, task } => {
            let task = importer.load_task(ImportId(import), TaskId(task)).await?;
            let out = output::render_single(
                &global.output,
                &task,
                |t| detail(t, color),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TasksCommand::Upload {
            import,
            files,
            no_presets,
        } => {
            let files = files
                .iter()
                .map(|path| UploadFile::from_path(path))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CliError::Validation {
                    field: "file".into(),
                    reason: e.to_string(),
                })?;

            let tasks = upload_with_progress(importer, ImportId(import), files, no_presets, global.quiet)
                .await?;
            let out = output::render_list(
                &global.output,
                &tasks,
                |t| TaskRow::new(t, color),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TasksCommand::Update {
            import,
            task,
            element,
            data,
            from_file,
        } => {
            let body = util::json_body(data, from_file)?;
            let element = element.map(|e| match e {
                TaskElementArg::Layer => TaskElement::Layer,
                TaskElementArg::Target => TaskElement::Target,
            });
            let updated = importer
                .update_task(ImportId(import), TaskId(task), &body, element)
                .await?;
            match updated {
                Some(task) => {
                    let out = output::render_single(
                        &global.output,
                        &task,
                        |t| detail(t, color),
                        |t| t.id.to_string(),
                    );
                    output::print_output(&out, global.quiet);
                }
                None => output::print_status(&format!("Task {task} updated"), global.quiet),
            }
            Ok(())
        }

        TasksCommand::Delete { import, task } => {
            if !util::confirm(&format!("Delete task {task} of import {import}?"), global.yes)? {
                return Ok(());
            }
            importer
                .execute(CoreCommand::DeleteTask {
                    import_id: ImportId(import),
                    task_id: TaskId(task),
                })
                .await?;
            output::print_status(&format!("Task {task} deleted"), global.quiet);
            Ok(())
        }

        TasksCommand::Progress { import, task } => {
            let progress = importer
                .load_task_progress(ImportId(import), TaskId(task))
                .await?;
            let out = output::render_single(
                &global.output,
                &progress,
                progress_detail,
                |p| p.ratio().map(|r| format!("{r:.3}")).unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Run an upload in the background and mirror its progress events on a bar.
async fn upload_with_progress(
    importer: &Importer,
    import_id: ImportId,
    files: Vec<UploadFile>,
    no_presets: bool,
    quiet: bool,
) -> Result<Vec<Task>, CliError> {
    // Selecting the import lets presets resolve its target workspace.
    importer.load_import(import_id).await?;
    let mut events = importer.store().events();

    let upload = {
        let importer = importer.clone();
        tokio::spawn(async move {
            let presets = if no_presets {
                Vec::new()
            } else {
                importer.config().presets.clone()
            };
            importer.upload_files(import_id, files, &presets).await
        })
    };

    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    loop {
        match events.recv().await {
            Ok(event) => match event.as_ref() {
                ImportEvent::UploadStarted { total } => bar.set_length(*total),
                ImportEvent::UploadProgressed(progress) => {
                    bar.set_length(progress.total);
                    bar.set_position(progress.loaded);
                }
                ImportEvent::UploadFinished => break,
                _ => {}
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "upload progress events lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
    bar.finish_and_clear();

    let tasks = upload
        .await
        .map_err(|e| CliError::Internal(format!("upload task failed: {e}")))??;
    Ok(tasks)
}
