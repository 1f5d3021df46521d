//! Patch lookup and version errors

use super::InstallerError;

/// Creates a patch not found error
pub fn not_found(version: impl Into<String>, bit64: bool, path: impl Into<String>) -> InstallerError {
    InstallerError::PatchNotFound {
        version: version.into(),
        bit64,
        path: path.into(),
    }
}

/// Creates an invalid version error
pub fn invalid_version(version: impl Into<String>) -> InstallerError {
    InstallerError::InvalidVersion {
        version: version.into(),
    }
}
