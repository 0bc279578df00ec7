//! Batch enable/disable operations.
//!
//! Each operation is applied on its own and reports its own status, so one
//! unknown key never affects the others.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// The only supported batch operation.
pub const ENABLE_OP: &str = "enable";

/// Status reported for an applied operation.
pub const STATUS_OK: u16 = 200;
/// Status reported for an unsupported operation.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Status reported for an unknown key.
pub const STATUS_NOT_FOUND: u16 = 404;
/// Status reported for an unexpected failure.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Common shape of repository and extension operations.
pub trait BatchOperation {
    /// Requested operation, e.g. `"enable"`.
    fn op(&self) -> &str;

    /// Repository URL or extension name.
    fn key(&self) -> &str;

    /// Requested value.
    fn value(&self) -> &str;

    /// Whether the operation asks to enable its target.
    fn enables(&self) -> bool {
        self.value() == "true"
    }
}

/// Enable or disable a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOperation {
    pub op: String,
    pub url: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub value: String,
}

impl RepositoryOperation {
    /// Build an `enable` operation.
    pub fn enable(url: impl Into<String>, enabled: bool) -> Self {
        Self {
            op: ENABLE_OP.to_string(),
            url: url.into(),
            value: enabled.to_string(),
        }
    }
}

impl BatchOperation for RepositoryOperation {
    fn op(&self) -> &str {
        &self.op
    }

    fn key(&self) -> &str {
        &self.url
    }

    fn value(&self) -> &str {
        &self.value
    }
}

/// Enable or disable an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionOperation {
    pub op: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub value: String,
}

impl ExtensionOperation {
    /// Build an `enable` operation.
    pub fn enable(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            op: ENABLE_OP.to_string(),
            name: name.into(),
            value: enabled.to_string(),
        }
    }
}

impl BatchOperation for ExtensionOperation {
    fn op(&self) -> &str {
        &self.op
    }

    fn key(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }
}

/// Accept both `"true"` and `true`.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b.to_string(),
        Flag::Text(s) => s,
    })
}

/// Outcome of one batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult<O> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub requested_operation: O,
}

impl<O> OperationResult<O> {
    /// Whether the operation was applied.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Apply every operation through `apply`, isolating failures.
///
/// `apply` receives the key and the requested enabled state. Not-found
/// errors become 404 with `not_found_message`; any other error becomes 500.
pub fn run_batch<O, F>(
    operations: &[O],
    not_found_message: &str,
    mut apply: F,
) -> Vec<OperationResult<O>>
where
    O: BatchOperation + Clone,
    F: FnMut(&str, bool) -> Result<()>,
{
    operations
        .iter()
        .map(|operation| {
            let (status, error) = if operation.op() != ENABLE_OP {
                (
                    STATUS_BAD_REQUEST,
                    Some(format!("Unsupported operation '{}'", operation.op())),
                )
            } else {
                match apply(operation.key(), operation.enables()) {
                    Ok(()) => (STATUS_OK, None),
                    Err(e) if e.is_not_found() => {
                        (STATUS_NOT_FOUND, Some(not_found_message.to_string()))
                    }
                    Err(e) => (STATUS_INTERNAL_ERROR, Some(e.to_string())),
                }
            };

            OperationResult {
                status,
                error,
                requested_operation: operation.clone(),
            }
        })
        .collect()
}
