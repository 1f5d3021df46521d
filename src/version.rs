//! Java version strings and the patch version directory derived from them

use crate::error::{Result, patch};

/// Convert a full Java version to the directory holding its patches.
///
/// Only the first two components count: `1.7.0_45` -> `1.7`, `1.8.0_202` -> `1.8`.
/// Components are separated by `.` or `_`.
pub fn version_dir(version: &str) -> Result<String> {
    let mut components = version.trim().split(['.', '_']);

    match (components.next(), components.next()) {
        (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
            Ok(format!("{major}.{minor}"))
        }
        _ => Err(patch::invalid_version(version)),
    }
}
