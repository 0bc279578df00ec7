//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// templar - Project template registry.
#[derive(Debug, Parser)]
#[command(name = "templar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace holding the .config directory (defaults to the current directory)
    #[arg(short, long, global = true, env = "TEMPLAR_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Only print requested data, warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List project templates
    Templates(TemplatesArgs),

    /// List the project styles of all templates
    Styles(StylesArgs),

    /// Manage template repositories
    Repos(ReposArgs),

    /// Manage template extensions
    Extensions(ExtensionsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `templates` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplatesArgs {
    /// Only show templates of this project style
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Only consult enabled repositories
    #[arg(long)]
    pub enabled_only: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `styles` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StylesArgs {
    /// Print JSON instead of one style per line
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `repos` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ReposArgs {
    #[command(subcommand)]
    pub action: RepoAction,
}

/// Repository subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RepoAction {
    /// List repositories
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a repository
    Add {
        /// URL of the repository's template index
        url: String,

        /// Description shown in listings
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove a repository
    Remove {
        url: String,
    },

    /// Enable a repository
    Enable {
        url: String,
    },

    /// Disable a repository
    Disable {
        url: String,
    },

    /// Apply enable operations from a JSON file ('-' reads stdin)
    Batch {
        file: PathBuf,
    },
}

/// Arguments for the `extensions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExtensionsArgs {
    #[command(subcommand)]
    pub action: ExtensionAction,
}

/// Extension subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ExtensionAction {
    /// List registered extensions
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Enable an extension
    Enable {
        name: String,
    },

    /// Disable an extension
    Disable {
        name: String,
    },

    /// Apply enable operations from a JSON file ('-' reads stdin)
    Batch {
        file: PathBuf,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
