//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_settings, ConfigPaths};
use crate::error::Result;
use crate::registry::TemplateRegistry;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::extensions::ExtensionsCommand;
use super::repos::ReposCommand;
use super::templates::{StylesCommand, TemplatesCommand};

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Returns a [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    workspace: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given workspace.
    pub fn new(workspace: PathBuf) -> Self {
        Self { workspace }
    }

    /// Get the workspace path.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Load settings and open the workspace's registry.
    pub fn open_registry(&self) -> Result<TemplateRegistry> {
        let paths = ConfigPaths::new(&self.workspace);
        let settings = load_settings(&paths)?;
        tracing::debug!("Opening registry in {}", self.workspace.display());
        TemplateRegistry::open(&paths, &settings)
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            // Completions never touch the workspace.
            return CompletionsCommand::new(args.clone()).execute(ui);
        }

        let registry = self.open_registry()?;
        dispatch_with(&registry, &cli.command, ui)
    }
}

/// Run a command against an already opened registry.
pub fn dispatch_with(
    registry: &TemplateRegistry,
    command: &Commands,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    match command {
        Commands::Templates(args) => TemplatesCommand::new(registry, args.clone()).execute(ui),
        Commands::Styles(args) => StylesCommand::new(registry, args.clone()).execute(ui),
        Commands::Repos(args) => ReposCommand::new(registry, args.action.clone()).execute(ui),
        Commands::Extensions(args) => {
            ExtensionsCommand::new(registry, args.action.clone()).execute(ui)
        }
        Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
    }
}
