//! Uniform result shape for boundary operations.

use serde::{Deserialize, Serialize};

/// Outcome of a boundary operation as reported to the host.
///
/// `output` carries raw tool output: diagnostics on failure, and the tool's
/// stdout on success where it is the payload (e.g. probe metadata).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessResult {
    pub success: bool,
    pub message: String,
    pub output: String,
}

impl ProcessResult {
    pub fn success(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            output: output.into(),
        }
    }

    pub fn failure(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            output: output.into(),
        }
    }
}
