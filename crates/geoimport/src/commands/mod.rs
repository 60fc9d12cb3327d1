//! Command dispatch: bridges CLI args -> importer operations -> output formatting.

pub mod config_cmd;
pub mod imports;
pub mod presets;
pub mod tasks;
pub mod transforms;
pub mod util;
pub mod workspaces;

use geoimport_core::Importer;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, importer: &Importer, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Imports(args) => imports::handle(importer, args, global).await,
        Command::Tasks(args) => tasks::handle(importer, args, global).await,
        Command::Transforms(args) => transforms::handle(importer, args, global).await,
        Command::Workspaces(args) => workspaces::handle(importer, args, global).await,
        Command::Presets(args) => presets::handle(importer, args, global).await,
        // Config and Completions never reach the service
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
