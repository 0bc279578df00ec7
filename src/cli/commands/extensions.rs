//! Extension management command.

use crate::cli::args::ExtensionAction;
use crate::error::{Result, TemplarError};
use crate::registry::{ExtensionOperation, TemplateRegistry};
use crate::ui::{Table, TemplarTheme, UserInterface};

use super::batch::{read_operations, report_results};
use super::dispatcher::{Command, CommandResult};

/// The extensions command implementation.
pub struct ExtensionsCommand<'a> {
    registry: &'a TemplateRegistry,
    action: ExtensionAction,
}

impl<'a> ExtensionsCommand<'a> {
    /// Create a new extensions command.
    pub fn new(registry: &'a TemplateRegistry, action: ExtensionAction) -> Self {
        Self { registry, action }
    }
}

impl Command for ExtensionsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            ExtensionAction::List { json } => {
                let extensions = self.registry.get_template_extensions();
                if *json {
                    let json = serde_json::to_string_pretty(&extensions).map_err(|e| {
                        TemplarError::Serialization {
                            what: "extensions".to_string(),
                            message: e.to_string(),
                        }
                    })?;
                    ui.data(&json);
                } else if extensions.is_empty() {
                    ui.message("No extensions registered.");
                } else {
                    let theme = TemplarTheme::detect();
                    ui.show_header("Extensions");
                    let mut table = Table::new(&["STATUS", "NAME", "DESCRIPTION"]);
                    for extension in &extensions {
                        table.add_row([
                            theme.format_enabled(extension.enabled),
                            extension.name.clone(),
                            extension.description.clone(),
                        ]);
                    }
                    ui.data(&table.render());
                }
                Ok(CommandResult::success())
            }
            ExtensionAction::Enable { name } => {
                self.registry.enable_extension(name)?;
                ui.success(&format!("Enabled extension {}", name));
                Ok(CommandResult::success())
            }
            ExtensionAction::Disable { name } => {
                self.registry.disable_extension(name)?;
                ui.success(&format!("Disabled extension {}", name));
                Ok(CommandResult::success())
            }
            ExtensionAction::Batch { file } => {
                let operations: Vec<ExtensionOperation> = read_operations(file)?;
                let results = self.registry.batch_update_extensions(&operations)?;
                report_results(ui, &results)
            }
        }
    }
}
