//! Template listing commands.
//!
//! `templar templates` lists templates and `templar styles` lists the
//! project styles they use.

use crate::cli::args::{StylesArgs, TemplatesArgs};
use crate::error::{Result, TemplarError};
use crate::registry::{TemplateQuery, TemplateRegistry};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

fn to_json<T: serde::Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| TemplarError::Serialization {
        what: what.to_string(),
        message: e.to_string(),
    })
}

/// The templates command implementation.
pub struct TemplatesCommand<'a> {
    registry: &'a TemplateRegistry,
    args: TemplatesArgs,
}

impl<'a> TemplatesCommand<'a> {
    /// Create a new templates command.
    pub fn new(registry: &'a TemplateRegistry, args: TemplatesArgs) -> Self {
        Self { registry, args }
    }

    fn query(&self) -> TemplateQuery {
        TemplateQuery {
            project_style: self.args.style.clone(),
            show_enabled_only: self.args.enabled_only,
        }
    }
}

impl Command for TemplatesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let templates = self.registry.get_templates(&self.query());

        if self.args.json {
            ui.data(&to_json(&templates, "templates")?);
            return Ok(CommandResult::success());
        }

        if templates.is_empty() {
            ui.message("No templates found.");
            return Ok(CommandResult::success());
        }

        if !ui.output_mode().shows_status() {
            for template in &templates {
                ui.data(&template.label);
            }
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Templates ({})", templates.len()));
        let mut table = Table::new(&["LABEL", "LANGUAGE", "STYLE", "URL"]);
        for template in &templates {
            table.add_row([
                template.label.as_str(),
                template.language.as_str(),
                template.style(),
                template.url.as_str(),
            ]);
        }
        ui.data(&table.render());

        Ok(CommandResult::success())
    }
}

/// The styles command implementation.
pub struct StylesCommand<'a> {
    registry: &'a TemplateRegistry,
    args: StylesArgs,
}

impl<'a> StylesCommand<'a> {
    /// Create a new styles command.
    pub fn new(registry: &'a TemplateRegistry, args: StylesArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for StylesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let styles = self.registry.get_template_styles();

        if self.args.json {
            ui.data(&to_json(&styles, "styles")?);
        } else {
            for style in &styles {
                ui.data(style);
            }
        }

        Ok(CommandResult::success())
    }
}
