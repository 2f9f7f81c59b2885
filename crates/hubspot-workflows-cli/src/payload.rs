use std::path::Path;

use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::WorkflowError;

/// A workflow definition read from disk. The JSON is checked for
/// well-formedness only and is sent exactly as written.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct WorkflowPayload(Box<RawValue>);

impl WorkflowPayload {
    pub fn from_file(path: &Path) -> Result<Self, WorkflowError> {
        let bytes = std::fs::read(path).map_err(|source| WorkflowError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &bytes)
    }

    /// Invalid UTF-8 is malformed JSON, not an unreadable file.
    fn parse(path: &Path, bytes: &[u8]) -> Result<Self, WorkflowError> {
        serde_json::from_slice::<Box<RawValue>>(bytes.trim_ascii())
            .map(Self)
            .map_err(|source| WorkflowError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}
