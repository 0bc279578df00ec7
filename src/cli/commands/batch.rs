//! Shared handling for `batch` subcommands.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, TemplarError};
use crate::registry::OperationResult;
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Read a JSON array of operations from `path`, or stdin when it is `-`.
pub fn read_operations<O: DeserializeOwned>(path: &Path) -> Result<Vec<O>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    serde_json::from_str(&content).map_err(|e| TemplarError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Print batch results as JSON. Fails with exit code 1 unless every
/// operation succeeded.
pub fn report_results<O: Serialize>(
    ui: &mut dyn UserInterface,
    results: &[OperationResult<O>],
) -> Result<CommandResult> {
    let json = serde_json::to_string_pretty(results).map_err(|e| TemplarError::Serialization {
        what: "batch results".to_string(),
        message: e.to_string(),
    })?;
    ui.data(&json);

    let failed = results.iter().filter(|r| !r.is_success()).count();
    if failed == 0 {
        Ok(CommandResult::success())
    } else {
        ui.warning(&format!("{} of {} operations failed", failed, results.len()));
        Ok(CommandResult::failure(1))
    }
}
