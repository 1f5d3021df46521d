//! Probing a directory into an [`Installation`]

use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, install};
use crate::fs::OsFileSystem;
use crate::installer::{SiteState, TargetSite};
use crate::layout::{InstallKind, Layout};
use crate::version;

/// File at a Java home describing the build
const RELEASE_FILE: &str = "release";

/// A JDK or JRE found on disk
///
/// Metadata is read once when the installation is probed. Two installations
/// are equal when their canonical roots are.
#[derive(Debug, Clone, Serialize)]
pub struct Installation {
    /// Canonical root directory
    pub root: PathBuf,
    pub kind: InstallKind,
    /// Full Java version, e.g. `1.8.0_202`
    pub version: String,
    pub bit64: bool,
    /// The server or client library has been replaced in place
    pub patched: bool,
    /// A library is installed in an alternate-JVM directory
    pub alt_jvm_installed: bool,
}

impl Installation {
    /// Inspect `dir`; fails if it is not a JDK/JRE or its metadata cannot be read
    pub fn probe(layout: &dyn Layout, dir: &Path) -> Result<Self> {
        let invalid = |reason: String| install::invalid_installation(dir.display().to_string(), reason);

        let root = dunce::canonicalize(dir).map_err(|e| invalid(e.to_string()))?;
        let kind = layout
            .classify(&root)
            .ok_or_else(|| invalid("not a JDK or JRE".to_string()))?;

        let release = read_release(layout, &root, kind)?;
        let version = release
            .get("JAVA_VERSION")
            .cloned()
            .ok_or_else(|| invalid("release file has no JAVA_VERSION".to_string()))?;
        version::version_dir(&version)
            .map_err(|_| invalid(format!("unsupported Java version '{version}'")))?;

        let effective = layout.effective_root(&root);
        let bit64 = release
            .get("OS_ARCH")
            .and_then(|arch| arch_is_64bit(arch))
            .unwrap_or_else(|| effective.join(layout.server_path(true)).is_dir());

        let mut in_place = vec![TargetSite::server(layout, &effective, bit64)];
        if !bit64 {
            in_place.push(TargetSite::client(layout, &effective));
        }
        let patched = in_place
            .iter()
            .any(|site| site.library_pair(layout).state(&OsFileSystem) == SiteState::Patched);

        let alt_jvm_installed = [false, true].into_iter().any(|b| {
            TargetSite::alt_jvm(layout, &effective, b)
                .library_pair(layout)
                .library
                .is_file()
        });

        Ok(Self {
            root,
            kind,
            version,
            bit64,
            patched,
            alt_jvm_installed,
        })
    }

    /// DCEVM is present in place or as an alternate JVM
    pub fn has_dcevm(&self) -> bool {
        self.patched || self.alt_jvm_installed
    }
}

impl PartialEq for Installation {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for Installation {}

impl Hash for Installation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
    }
}

/// Map an `OS_ARCH` value to its bit-width, `None` if unknown
pub fn arch_is_64bit(arch: &str) -> Option<bool> {
    match arch.trim().to_ascii_lowercase().as_str() {
        "amd64" | "x86_64" | "aarch64" | "arm64" | "sparcv9" | "ppc64" | "ppc64le" | "s390x" => {
            Some(true)
        }
        "i386" | "i486" | "i586" | "i686" | "x86" | "arm" => Some(false),
        _ => None,
    }
}

/// Parse `KEY="value"` lines of a release file
pub fn parse_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            )
        })
        .filter(|(key, _)| !key.is_empty() && !key.starts_with('#'))
        .collect()
}

/// The release file sits at the Java home; for an embedded JRE that is its parent JDK
fn read_release(
    layout: &dyn Layout,
    root: &Path,
    kind: InstallKind,
) -> Result<HashMap<String, String>> {
    let candidates = release_candidates(layout, root, kind);
    let Some(path) = candidates.iter().find(|p| p.is_file()) else {
        return Err(install::invalid_installation(
            root.display().to_string(),
            "no release file",
        ));
    };

    let content = fs::read_to_string(path).map_err(|e| {
        install::invalid_installation(root.display().to_string(), e.to_string())
    })?;
    Ok(parse_release(&content))
}

/// Release file locations to try, most specific first, without duplicates
fn release_candidates(layout: &dyn Layout, root: &Path, kind: InstallKind) -> Vec<PathBuf> {
    let home = match kind {
        InstallKind::Jdk => layout
            .effective_root(root)
            .parent()
            .map(Path::to_path_buf),
        InstallKind::Jre => root
            .parent()
            .filter(|p| layout.is_jdk(p))
            .map(Path::to_path_buf),
    };

    let mut candidates = vec![root.join(RELEASE_FILE)];
    if let Some(home) = home.filter(|h| h != root) {
        candidates.push(home.join(RELEASE_FILE));
    }
    candidates
}
