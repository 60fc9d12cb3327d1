//! Workspace command handlers.

use tabled::Tabled;

use geoimport_core::{Importer, Workspace, WorkspaceCreationStatus};

use crate::cli::{GlobalOpts, WorkspacesArgs, WorkspacesCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WorkspaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Href")]
    href: String,
}

impl From<&Workspace> for WorkspaceRow {
    fn from(ws: &Workspace) -> Self {
        Self {
            name: ws.name.clone(),
            href: ws.href.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    importer: &Importer,
    args: WorkspacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WorkspacesCommand::List => {
            let workspaces = importer.load_workspaces().await?;
            let out = output::render_list(
                &global.output,
                &workspaces,
                |ws| WorkspaceRow::from(ws),
                |ws| ws.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WorkspacesCommand::Create {
            name,
            no_datastores,
        } => {
            let templates = if no_datastores {
                Vec::new()
            } else {
                importer.config().datastore_templates.clone()
            };
            importer.create_workspace(&name, &templates).await?;

            // The session records the outcome until it is dismissed.
            if let Some(WorkspaceCreationStatus::Success { workspace }) =
                importer.snapshot().workspace_creation_status.clone()
            {
                output::print_status(
                    &format!(
                        "Workspace '{workspace}' created with {} datastore template(s)",
                        templates.len()
                    ),
                    global.quiet,
                );
            }
            importer.dismiss_workspace_status();
            Ok(())
        }
    }
}
