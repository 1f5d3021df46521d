//! Error types and handling for the DCEVM installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`patch`]: Patch lookup and version errors
//! - [`install`]: Install state and installation probing errors
//! - [`config`]: Layout configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod install;
pub mod patch;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Patch errors
    #[error("DCEVM build not found for Java {version}{} (target {path})", bits_suffix(.bit64))]
    #[diagnostic(
        code(dcevm::patch::not_found),
        help("No replacement library is bundled for this Java version and bit-width")
    )]
    PatchNotFound {
        version: String,
        bit64: bool,
        path: String,
    },

    #[error("Invalid Java version: '{version}'")]
    #[diagnostic(
        code(dcevm::patch::invalid_version),
        help("Java versions look like 1.7.0_45 or 1.8.0_202 (at least <major>.<minor>)")
    )]
    InvalidVersion { version: String },

    // Install state errors
    #[error("DCEVM is already installed at {path}")]
    #[diagnostic(
        code(dcevm::install::already_patched),
        help("Uninstall first so the original library backup is not overwritten")
    )]
    AlreadyPatched { path: String },

    #[error("Invalid installation at {path}: {reason}")]
    #[diagnostic(code(dcevm::install::invalid_installation))]
    InstallationInvalid { path: String, reason: String },

    #[error("Failed to restore original library at {path}: {rollback_reason} (after: {reason})")]
    #[diagnostic(
        code(dcevm::install::rollback_failed),
        help("The original library is still at its backup path; restore it by hand")
    )]
    RollbackFailed {
        path: String,
        reason: String,
        rollback_reason: String,
    },

    // Configuration errors
    #[error("Failed to read layout configuration: {path}")]
    #[diagnostic(code(dcevm::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse layout configuration: {path}: {reason}")]
    #[diagnostic(code(dcevm::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid layout configuration: {message}")]
    #[diagnostic(code(dcevm::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to {operation} {path}: {reason}")]
    #[diagnostic(code(dcevm::fs::operation_failed))]
    FileOperationFailed {
        operation: String,
        path: String,
        reason: String,
    },
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(err: serde_yaml::Error) -> Self {
        InstallerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

fn bits_suffix(bit64: &bool) -> &'static str {
    if *bit64 { " (64 bit)" } else { "" }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_not_found_display() {
        let err = patch::not_found("1.7.0_45", true, "/opt/jdk/jre/lib/amd64/server");
        assert_eq!(
            err.to_string(),
            "DCEVM build not found for Java 1.7.0_45 (64 bit) (target /opt/jdk/jre/lib/amd64/server)"
        );

        let err = patch::not_found("1.7.0_45", false, "/opt/jdk/jre/lib/i386/client");
        assert!(err.to_string().starts_with("DCEVM build not found for Java 1.7.0_45 (target"));
    }

    #[test]
    fn test_error_code() {
        let err = patch::invalid_version("7");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("dcevm::patch::invalid_version".to_string())
        );
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: InstallerError = parse_result.unwrap_err().into();
        assert!(matches!(err, InstallerError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_operation_failed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = fs::operation_failed("move", std::path::Path::new("/jre/libjvm.so"), &io_err);
        assert!(matches!(err, InstallerError::FileOperationFailed { .. }));
        assert_eq!(err.to_string(), "Failed to move /jre/libjvm.so: denied");
    }

    #[test]
    fn test_rollback_failed_keeps_both_causes() {
        let err = install::rollback_failed("/jre/lib/server", "disk full", "permission denied");
        let message = err.to_string();
        assert!(message.contains("disk full"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn test_already_patched() {
        let err = install::already_patched("/jre/lib/amd64/server");
        assert!(matches!(err, InstallerError::AlreadyPatched { .. }));
        assert!(err.to_string().contains("already installed"));
    }

    #[test]
    fn test_config_errors() {
        let err = config::read_failed("/etc/layout.yaml", "missing");
        assert!(matches!(err, InstallerError::ConfigReadFailed { .. }));
        let err = config::invalid("library_name must not be empty");
        assert!(err.to_string().contains("Invalid layout configuration"));
    }
}
