mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use geoimport_core::Importer;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let Err(err) = run(cli).await else {
        return;
    };
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

/// Log to stderr at a level chosen by `-v`, unless `RUST_LOG` overrides it.
fn init_tracing(verbose: u8) {
    let level = ["warn", "info", "debug"]
        .get(usize::from(verbose))
        .copied()
        .unwrap_or("trace");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "geoimport", &mut std::io::stdout());
}

fn connect(global: &GlobalOpts) -> Result<Importer, CliError> {
    let importer_config = config::build_importer_config(global)?;
    Ok(Importer::new(importer_config)?)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;
    match command {
        // Local only: no importer is built for these.
        Command::Config(args) => commands::config_cmd::handle(args, &global),
        Command::Completions(args) => {
            print_completions(args.shell);
            Ok(())
        }

        command => {
            let importer = connect(&global)?;
            tracing::debug!(?command, url = %importer.config().url, "running command");
            commands::dispatch(command, &importer, &global).await
        }
    }
}
