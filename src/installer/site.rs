//! Library swap locations inside an installation

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::fs::FileSystem;
use crate::layout::Layout;

/// Which JVM variant a site holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    Server,
    Client,
    /// Side-by-side directory selected with `-XXaltjvm=dcevm`
    AltJvm,
}

/// One directory where a JVM library may be replaced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSite {
    pub dir: PathBuf,
    pub bit64: bool,
    pub kind: SiteKind,
}

impl TargetSite {
    pub fn server(layout: &dyn Layout, root: &Path, bit64: bool) -> Self {
        Self {
            dir: root.join(layout.server_path(bit64)),
            bit64,
            kind: SiteKind::Server,
        }
    }

    /// The client VM only ships in 32-bit builds
    pub fn client(layout: &dyn Layout, root: &Path) -> Self {
        Self {
            dir: root.join(layout.client_path()),
            bit64: false,
            kind: SiteKind::Client,
        }
    }

    pub fn alt_jvm(layout: &dyn Layout, root: &Path, bit64: bool) -> Self {
        Self {
            dir: root.join(layout.alt_jvm_path(bit64)),
            bit64,
            kind: SiteKind::AltJvm,
        }
    }

    pub fn library_pair(&self, layout: &dyn Layout) -> LibraryPair {
        LibraryPair {
            library: self.dir.join(layout.library_name()),
            backup: self.dir.join(layout.backup_library_name()),
        }
    }
}

/// Active library and its backup at one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPair {
    pub library: PathBuf,
    pub backup: PathBuf,
}

/// What a site currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteState {
    /// Neither library nor backup
    Absent,
    /// A library and no backup
    Original,
    /// A backup exists, so the library is a replacement
    Patched,
}

impl LibraryPair {
    pub fn state(&self, fs: &dyn FileSystem) -> SiteState {
        if fs.exists(&self.backup) {
            SiteState::Patched
        } else if fs.exists(&self.library) {
            SiteState::Original
        } else {
            SiteState::Absent
        }
    }
}
