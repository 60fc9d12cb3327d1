//! Clap derive structures for the `geoimport` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// geoimport -- drive the GeoServer importer from the command line
#[derive(Debug, Parser)]
#[command(
    name = "geoimport",
    version,
    about = "Upload and publish geospatial data through the GeoServer importer",
    long_about = "A CLI for the GeoServer importer REST API.\n\n\
        Create imports, upload files into them, adjust tasks and their\n\
        transform chains, then run the import to publish the layers.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "GEOIMPORT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Importer REST root, e.g. http://localhost:8080/geoserver/rest/ (overrides profile)
    #[arg(long, short = 'u', env = "GEOIMPORT_URL", global = true)]
    pub url: Option<String>,

    /// Catalog REST root for workspaces (defaults to --url)
    #[arg(long, env = "GEOIMPORT_WORKSPACE_URL", global = true)]
    pub workspace_url: Option<String>,

    /// Basic auth username
    #[arg(long, env = "GEOIMPORT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "GEOIMPORT_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GEOIMPORT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GEOIMPORT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "GEOIMPORT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage imports
    #[command(alias = "i")]
    Imports(ImportsArgs),

    /// Manage the tasks of an import
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// Manage the transform chain of a task
    #[command(alias = "tr")]
    Transforms(TransformsArgs),

    /// Manage target workspaces
    #[command(alias = "ws")]
    Workspaces(WorkspacesArgs),

    /// Inspect configured task presets
    Presets(PresetsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  IMPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ImportsArgs {
    #[command(subcommand)]
    pub command: ImportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImportsCommand {
    /// List imports
    #[command(alias = "ls")]
    List,

    /// Show an import and its tasks
    Get {
        /// Import ID
        import: u64,
    },

    /// Create an empty import
    Create {
        /// Workspace new layers are published into
        #[arg(long, short = 'w')]
        workspace: Option<String>,
    },

    /// Delete an import
    #[command(alias = "rm")]
    Delete {
        /// Import ID
        import: u64,
    },

    /// Run an import, publishing its ready tasks
    Run {
        /// Import ID
        import: u64,

        /// Poll until the import reaches a final state
        #[arg(long)]
        wait: bool,

        /// Seconds between polls with --wait
        #[arg(long, default_value = "2", requires = "wait")]
        interval: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TASKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List the tasks of an import
    #[command(alias = "ls")]
    List {
        /// Import ID
        import: u64,
    },

    /// Show a task
    Get {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
    },

    /// Upload files into an import, creating tasks
    Upload {
        /// Import ID
        import: u64,

        /// Files to upload (zip archives, shapefiles, GeoTIFFs, ...)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Do not apply configured presets to the new tasks
        #[arg(long)]
        no_presets: bool,
    },

    /// Update a task or one of its elements with a JSON body
    Update {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,

        /// Element to update instead of the task itself
        #[arg(long, short = 'e')]
        element: Option<TaskElementArg>,

        /// Inline JSON body
        #[arg(long, conflicts_with = "from_file")]
        data: Option<String>,

        /// Read the JSON body from a file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
    },

    /// Show the progress of a running task
    Progress {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
    },
}

/// Task sub-resource addressable with `tasks update --element`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaskElementArg {
    /// The layer published by the task
    Layer,
    /// The store the task writes into
    Target,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRANSFORMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TransformsArgs {
    #[command(subcommand)]
    pub command: TransformsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TransformsCommand {
    /// List the transform chain of a task
    #[command(alias = "ls")]
    List {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
    },

    /// Show one transform
    Get {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
        /// Position in the chain (0-based)
        index: usize,
    },

    /// Append a transform to the chain
    Add {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,

        /// Inline JSON transform, e.g. '{"type":"DateFormatTransform","field":"d"}'
        #[arg(long, conflicts_with = "from_file", required_unless_present = "from_file")]
        data: Option<String>,

        /// Read the JSON transform from a file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Replace the transform at a position
    Update {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
        /// Position in the chain (0-based)
        index: usize,

        /// Inline JSON transform
        #[arg(long, conflicts_with = "from_file", required_unless_present = "from_file")]
        data: Option<String>,

        /// Read the JSON transform from a file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Remove the transform at a position
    #[command(alias = "rm")]
    Delete {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
        /// Position in the chain (0-based)
        index: usize,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WORKSPACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WorkspacesArgs {
    #[command(subcommand)]
    pub command: WorkspacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkspacesCommand {
    /// List workspaces
    #[command(alias = "ls")]
    List,

    /// Create a workspace and the configured datastores in it
    Create {
        /// Workspace name
        name: String,

        /// Skip the configured datastore templates
        #[arg(long)]
        no_datastores: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRESETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PresetsCommand {
    /// List configured presets in match order
    #[command(alias = "ls")]
    List,

    /// Show which preset a task would get, with placeholders filled in
    Match {
        /// Import ID
        import: u64,
        /// Task ID
        task: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a profile value
    Set {
        /// Profile key (url, workspace_url, username, password_env, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
