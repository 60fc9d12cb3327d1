//! Import command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use geoimport_core::{Command as CoreCommand, CommandResult, Import, ImportId, Importer, WorkspaceRef};

use crate::cli::{GlobalOpts, ImportsArgs, ImportsCommand};
use crate::error::CliError;
use crate::output;

use super::tasks::TaskRow;
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ImportRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Workspace")]
    workspace: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
}

impl ImportRow {
    fn new(import: &Import, color: bool) -> Self {
        Self {
            id: import.id.get(),
            state: output::paint_state(&import.state, color),
            workspace: import.target_workspace_name().unwrap_or("-").to_owned(),
            tasks: import.tasks.len(),
        }
    }
}

fn detail(import: &Import, color: bool) -> String {
    let mut lines = vec![
        format!("Import:     {}", import.id),
        format!("State:      {}", output::paint_state(&import.state, color)),
        format!(
            "Workspace:  {}",
            import.target_workspace_name().unwrap_or("-")
        ),
    ];
    if let Some(archive) = import.archive {
        lines.push(format!("Archive:    {archive}"));
    }
    if import.tasks.is_empty() {
        lines.push("Tasks:      (none)".into());
    } else {
        let rows: Vec<TaskRow> = import
            .tasks
            .values()
            .map(|task| TaskRow::new(task, color))
            .collect();
        lines.push(String::new());
        lines.push(
            tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string(),
        );
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    importer: &Importer,
    args: ImportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        ImportsCommand::List => {
            let imports = importer.load_imports().await?;
            let out = output::render_list(
                &global.output,
                &imports,
                |i| ImportRow::new(i, color),
                |i| i.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ImportsCommand::Get { import } => {
            let import = importer.load_import(ImportId(import)).await?;
            let out = output::render_single(
                &global.output,
                &import,
                |i| detail(i, color),
                |i| i.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ImportsCommand::Create { workspace } => {
            let result = importer
                .execute(CoreCommand::CreateImport {
                    workspace: workspace.map(WorkspaceRef::new),
                })
                .await?;
            if let CommandResult::Import(import) = result {
                let out = output::render_single(
                    &global.output,
                    &import,
                    |i| detail(i, color),
                    |i| i.id.to_string(),
                );
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        ImportsCommand::Delete { import } => {
            if !util::confirm(
                &format!("Delete import {import} and all of its tasks?"),
                global.yes,
            )? {
                return Ok(());
            }
            importer
                .execute(CoreCommand::DeleteImport {
                    id: ImportId(import),
                })
                .await?;
            output::print_status(&format!("Import {import} deleted"), global.quiet);
            Ok(())
        }

        ImportsCommand::Run {
            import,
            wait,
            interval,
        } => {
            let id = ImportId(import);
            importer.run_import(id).await?;
            if !wait {
                output::print_status(&format!("Import {import} started"), global.quiet);
                return Ok(());
            }

            let finished = wait_for_import(importer, id, interval, global.quiet).await?;
            let out = output::render_single(
                &global.output,
                &finished,
                |i| detail(i, color),
                |i| i.state.to_string(),
            );
            output::print_output(&out, global.quiet);

            if finished.state == geoimport_core::ImportState::Complete {
                Ok(())
            } else {
                Err(CliError::ImportFailed {
                    import,
                    state: finished.state.to_string(),
                })
            }
        }
    }
}

/// Poll an import until the service reports a final state.
async fn wait_for_import(
    importer: &Importer,
    id: ImportId,
    interval: u64,
    quiet: bool,
) -> Result<Import, CliError> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner} import {prefix}: {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_prefix(id.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let period = Duration::from_secs(interval.max(1));
    loop {
        let import = importer.load_import(id).await?;
        spinner.set_message(import.state.to_string());
        if import.state.is_terminal() {
            spinner.finish_and_clear();
            return Ok(import);
        }
        tokio::time::sleep(period).await;
    }
}
