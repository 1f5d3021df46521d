//! Installation layouts
//!
//! A [`Layout`] answers every path question about a JDK/JRE installation:
//! where the server and client libraries live, where an alternate JVM goes,
//! what the library and its backup are called, and whether a directory is a
//! JDK or a JRE at all. The engine and the scanner only ever see this trait;
//! [`LayoutConfig`] is the built-in, YAML-configurable implementation.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub mod config;
pub mod loader;

pub use config::{LayoutConfig, LayoutOverride};
pub use loader::LayoutLoader;

/// What kind of Java installation a directory is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallKind {
    Jdk,
    Jre,
}

/// Path and name lookups for one installation layout
///
/// All paths are relative to an installation-effective root (a JRE, or the
/// JRE embedded in a JDK); [`Layout::jre_dir`] is relative to a JDK root.
pub trait Layout: Send + Sync {
    fn server_path(&self, bit64: bool) -> &Path;

    fn client_path(&self) -> &Path;

    /// Alternate-JVM directory; one of two fixed locations chosen by bit-width
    fn alt_jvm_path(&self, bit64: bool) -> &Path;

    fn jre_dir(&self) -> &Path;

    fn library_name(&self) -> &str;

    fn backup_library_name(&self) -> &str;

    /// Platform directory of the patch bundle (e.g. `linux_amd64_compiler2`)
    fn resource_path(&self, bit64: bool) -> &str;

    fn classify(&self, dir: &Path) -> Option<InstallKind>;

    /// Directories whose children are scanned for installations by default
    fn search_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn is_jdk(&self, dir: &Path) -> bool {
        self.classify(dir) == Some(InstallKind::Jdk)
    }

    fn is_jre(&self, dir: &Path) -> bool {
        self.classify(dir) == Some(InstallKind::Jre)
    }

    /// The directory libraries are swapped under: the embedded JRE for a JDK root
    fn effective_root(&self, root: &Path) -> PathBuf {
        if self.is_jdk(root) {
            root.join(self.jre_dir())
        } else {
            root.to_path_buf()
        }
    }
}
