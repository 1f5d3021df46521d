//! File system errors

use std::path::Path;

use super::InstallerError;

/// Creates a failed file operation error (`operation` reads as a verb: "move", "write", ...)
pub fn operation_failed(operation: &str, path: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::FileOperationFailed {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
