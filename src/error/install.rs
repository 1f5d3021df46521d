//! Install state and installation probing errors

use super::InstallerError;

/// Creates an already patched error
pub fn already_patched(path: impl Into<String>) -> InstallerError {
    InstallerError::AlreadyPatched { path: path.into() }
}

/// Creates an invalid installation error
pub fn invalid_installation(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::InstallationInvalid {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a rollback failed error
pub fn rollback_failed(
    path: impl Into<String>,
    reason: impl Into<String>,
    rollback_reason: impl Into<String>,
) -> InstallerError {
    InstallerError::RollbackFailed {
        path: path.into(),
        reason: reason.into(),
        rollback_reason: rollback_reason.into(),
    }
}
