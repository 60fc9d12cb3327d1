//! Preset command handlers.

use serde::Serialize;
use tabled::Tabled;

use geoimport_core::{ImportId, Importer, Preset, TaskId, apply_placeholders, find_preset};

use crate::cli::{GlobalOpts, PresetsArgs, PresetsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

/// A preset with its position in match order.
#[derive(Serialize)]
struct Indexed<'a> {
    index: usize,
    #[serde(flatten)]
    preset: &'a Preset,
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Changes")]
    changes: String,
    #[tabled(rename = "Transforms")]
    transforms: usize,
}

impl PresetRow {
    fn new(index: usize, preset: &Preset) -> Self {
        let data = preset.data.as_ref();
        Self {
            index,
            name: preset.label().to_owned(),
            state: preset.state.clone().unwrap_or_else(|| "*".into()),
            format: data
                .and_then(|d| d.format.clone())
                .unwrap_or_else(|| "*".into()),
            file: data.and_then(|d| d.file.clone()).unwrap_or_else(|| "*".into()),
            changes: preset.changes.keys().cloned().collect::<Vec<_>>().join(", "),
            transforms: preset.transforms.len(),
        }
    }
}

fn detail(preset: &Preset) -> String {
    let mut lines = vec![format!("Preset: {}", preset.label())];
    for (element, change) in &preset.changes {
        lines.push(format!("  {element}: {change}"));
    }
    for transform in &preset.transforms {
        lines.push(format!("  + {}", transform.kind));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    importer: &Importer,
    args: PresetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let presets = &importer.config().presets;

    match args.command {
        PresetsCommand::List => {
            let indexed: Vec<Indexed<'_>> = presets
                .iter()
                .enumerate()
                .map(|(index, preset)| Indexed { index, preset })
                .collect();
            let out = output::render_list(
                &global.output,
                &indexed,
                |i| PresetRow::new(i.index, i.preset),
                |i| i.preset.label().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PresetsCommand::Match { import, task } => {
            let import = importer.load_import(ImportId(import)).await?;
            let task = importer.load_task(import.id, TaskId(task)).await?;

            let Some(preset) = find_preset(presets, &task) else {
                output::print_status(
                    &format!("No preset matches task {} of import {}", task.id, import.id),
                    global.quiet,
                );
                return Ok(());
            };
            let resolved = apply_placeholders(preset, &import);
            let out = output::render_single(&global.output, &resolved, detail, |p| {
                p.label().to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
