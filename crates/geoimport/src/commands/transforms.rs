//! Transform chain command handlers.
//!
//! Positions given on the command line are resolved to stable chain keys
//! after loading the task, so the session tracks edits the same way an
//! interactive client would.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use geoimport_core::{ImportId, Importer, TaskId, Transform};

use crate::cli::{GlobalOpts, TransformsArgs, TransformsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

/// A transform with its current chain position, as listed.
#[derive(Serialize)]
struct Positioned {
    index: usize,
    #[serde(flatten)]
    transform: Arc<Transform>,
}

#[derive(Tabled)]
struct TransformRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Options")]
    options: String,
}

impl From<&Positioned> for TransformRow {
    fn from(p: &Positioned) -> Self {
        Self {
            index: p.index,
            kind: p.transform.kind.clone(),
            options: options_summary(&p.transform),
        }
    }
}

fn options_summary(transform: &Transform) -> String {
    transform
        .options
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{k}={s}"),
            None => format!("{k}={v}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail(transform: &Transform) -> String {
    let mut lines = vec![format!("Type: {}", transform.kind)];
    for (key, value) in &transform.options {
        lines.push(format!("{key}: {value}"));
    }
    lines.join("\n")
}

fn parse_transform(body: serde_json::Value) -> Result<Transform, CliError> {
    serde_json::from_value(body).map_err(|e| CliError::Validation {
        field: "transform".into(),
        reason: format!("expected an object with a \"type\" field: {e}"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    importer: &Importer,
    args: TransformsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TransformsCommand::List { import, task } => {
            let task = util::drill_to_task(importer, import, task).await?;
            let listed: Vec<Positioned> = task
                .transform_chain
                .iter()
                .flat_map(|chain| chain.iter())
                .enumerate()
                .map(|(index, (_, transform))| Positioned {
                    index,
                    transform: Arc::clone(transform),
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &listed,
                |p| TransformRow::from(p),
                |p| p.transform.kind.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransformsCommand::Get {
            import,
            task,
            index,
        } => {
            let loaded = util::drill_to_task(importer, import, task).await?;
            let key = util::transform_key(&loaded, import, index)?;
            let transform = importer
                .load_transform(ImportId(import), TaskId(task), key)
                .await?;
            let out = output::render_single(
                &global.output,
                &transform,
                detail,
                |t| t.kind.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransformsCommand::Add {
            import,
            task,
            data,
            from_file,
        } => {
            let transform = parse_transform(util::json_body(data, from_file)?)?;
            util::drill_to_task(importer, import, task).await?;
            importer
                .add_transform(ImportId(import), TaskId(task), &transform)
                .await?;
            output::print_status(
                &format!("Added {} to task {task}", transform.kind),
                global.quiet,
            );
            Ok(())
        }

        TransformsCommand::Update {
            import,
            task,
            index,
            data,
            from_file,
        } => {
            let transform = parse_transform(util::json_body(data, from_file)?)?;
            let loaded = util::drill_to_task(importer, import, task).await?;
            let key = util::transform_key(&loaded, import, index)?;
            let stored = importer
                .update_transform(ImportId(import), TaskId(task), key, &transform)
                .await?;
            let out = output::render_single(
                &global.output,
                &stored,
                detail,
                |t| t.kind.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransformsCommand::Delete {
            import,
            task,
            index,
        } => {
            let loaded = util::drill_to_task(importer, import, task).await?;
            let key = util::transform_key(&loaded, import, index)?;
            if !util::confirm(
                &format!("Remove transform {index} from task {task}?"),
                global.yes,
            )? {
                return Ok(());
            }
            importer
                .delete_transform(ImportId(import), TaskId(task), key)
                .await?;
            output::print_status(
                &format!("Removed transform {index} from task {task}"),
                global.quiet,
            );
            Ok(())
        }
    }
}
