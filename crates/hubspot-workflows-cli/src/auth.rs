use crate::error::WorkflowError;

pub const API_KEY_VAR: &str = "HUBSPOT_API_KEY";

/// Resolve the bearer token with surrounding whitespace removed. An unset or
/// blank value is treated as missing.
pub fn resolve_token_with(
    env_var: impl Fn(&str) -> Result<String, std::env::VarError>,
) -> Result<String, WorkflowError> {
    match env_var(API_KEY_VAR) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => Err(WorkflowError::MissingCredential),
    }
}
