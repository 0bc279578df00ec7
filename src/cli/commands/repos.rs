//! Repository management command.
//!
//! `templar repos` lists, adds, removes and toggles template repositories.

use crate::cli::args::RepoAction;
use crate::error::{Result, TemplarError};
use crate::registry::{RepositoryOperation, TemplateRegistry};
use crate::ui::{Table, TemplarTheme, UserInterface};

use super::batch::{read_operations, report_results};
use super::dispatcher::{Command, CommandResult};

/// The repos command implementation.
pub struct ReposCommand<'a> {
    registry: &'a TemplateRegistry,
    action: RepoAction,
}

impl<'a> ReposCommand<'a> {
    /// Create a new repos command.
    pub fn new(registry: &'a TemplateRegistry, action: RepoAction) -> Self {
        Self { registry, action }
    }

    fn list(&self, ui: &mut dyn UserInterface, json: bool) -> Result<CommandResult> {
        let repositories = self.registry.get_repositories();

        if json {
            let json = serde_json::to_string_pretty(&repositories).map_err(|e| {
                TemplarError::Serialization {
                    what: "repositories".to_string(),
                    message: e.to_string(),
                }
            })?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        if repositories.is_empty() {
            ui.message("No repositories configured.");
            return Ok(CommandResult::success());
        }

        let theme = TemplarTheme::detect();
        ui.show_header("Repositories");
        let mut table = Table::new(&["STATUS", "URL", "DESCRIPTION"]);
        for repository in &repositories {
            table.add_row([
                theme.format_enabled(repository.enabled),
                repository.url.clone(),
                repository.description.clone(),
            ]);
        }
        ui.data(&table.render());
        Ok(CommandResult::success())
    }
}

impl Command for ReposCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            RepoAction::List { json } => self.list(ui, *json),
            RepoAction::Add { url, description } => {
                self.registry.add_repository(url, description)?;
                ui.success(&format!("Added repository {}", url));
                Ok(CommandResult::success())
            }
            RepoAction::Remove { url } => {
                self.registry.delete_repository(url)?;
                ui.success(&format!("Removed repository {}", url));
                Ok(CommandResult::success())
            }
            RepoAction::Enable { url } => {
                self.registry.enable_repository(url)?;
                ui.success(&format!("Enabled repository {}", url));
                Ok(CommandResult::success())
            }
            RepoAction::Disable { url } => {
                self.registry.disable_repository(url)?;
                ui.success(&format!("Disabled repository {}", url));
                Ok(CommandResult::success())
            }
            RepoAction::Batch { file } => {
                let operations: Vec<RepositoryOperation> = read_operations(file)?;
                let results = self.registry.batch_update_repos(&operations)?;
                report_results(ui, &results)
            }
        }
    }
}
