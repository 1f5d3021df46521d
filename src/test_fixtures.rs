//! Test fixtures for building fake Java installations and injecting faults.
//!
//! ```ignore
//! use crate::test_fixtures::{FakeJava, create_temp_dir};
//!
//! let temp = create_temp_dir();
//! let jdk = FakeJava::jdk(temp.path().join("jdk1.8.0_202"), "1.8.0_202", true)
//!     .build(&LayoutConfig::linux());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::fs::{FileSystem, OsFileSystem};
use crate::layout::{InstallKind, Layout, LayoutConfig};

/// Contents of the library a fake installation ships with
pub const ORIGINAL_LIBRARY: &[u8] = b"original libjvm";

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(std::env::temp_dir()).expect("Failed to create temp directory")
}

/// Create an empty file, including missing parent directories
pub fn touch(path: &Path) {
    write(path, b"");
}

/// Write `contents` to `path`, including missing parent directories
pub fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// Builder for a JDK or JRE directory tree
pub struct FakeJava {
    root: PathBuf,
    kind: InstallKind,
    version: String,
    bit64: bool,
    library: Option<Vec<u8>>,
}

impl FakeJava {
    pub fn jdk(root: impl Into<PathBuf>, version: &str, bit64: bool) -> Self {
        Self::new(root.into(), InstallKind::Jdk, version, bit64)
    }

    pub fn jre(root: impl Into<PathBuf>, version: &str, bit64: bool) -> Self {
        Self::new(root.into(), InstallKind::Jre, version, bit64)
    }

    fn new(root: PathBuf, kind: InstallKind, version: &str, bit64: bool) -> Self {
        Self {
            root,
            kind,
            version: version.to_string(),
            bit64,
            library: Some(ORIGINAL_LIBRARY.to_vec()),
        }
    }

    /// Create the server/client directories but no library in them
    pub fn without_library(mut self) -> Self {
        self.library = None;
        self
    }

    /// Lay out the installation on disk and return its root
    pub fn build(self, layout: &LayoutConfig) -> PathBuf {
        let home = match self.kind {
            InstallKind::Jdk => {
                for marker in &layout.jdk_markers {
                    let path = self.root.join(marker);
                    if marker == &layout.jre_dir {
                        fs::create_dir_all(&path).expect("Failed to create JRE directory");
                    } else {
                        touch(&path);
                    }
                }
                self.root.join(&layout.jre_dir)
            }
            InstallKind::Jre => self.root.clone(),
        };

        for marker in &layout.jre_markers {
            touch(&home.join(marker));
        }

        let arch = if self.bit64 { "amd64" } else { "i386" };
        write(
            &self.root.join("release"),
            format!("JAVA_VERSION=\"{}\"\nOS_ARCH=\"{arch}\"\n", self.version).as_bytes(),
        );

        let mut dirs = vec![home.join(layout.server_path(self.bit64))];
        if !self.bit64 {
            dirs.push(home.join(layout.client_path()));
        }
        for dir in dirs {
            fs::create_dir_all(&dir).expect("Failed to create library directory");
            if let Some(library) = &self.library {
                write(&dir.join(layout.library_name()), library);
            }
        }

        self.root
    }
}

/// Step of the swap protocol a [`FaultyFileSystem`] fails at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Writes half the contents, then fails
    Write,
    /// Fails the rename with this zero-based index
    Rename(usize),
    RemoveFile,
    CreateDir,
}

/// [`OsFileSystem`] that fails at chosen steps
pub struct FaultyFileSystem {
    faults: Vec<Fault>,
    renames: AtomicUsize,
}

impl FaultyFileSystem {
    pub fn new(faults: &[Fault]) -> Self {
        Self {
            faults: faults.to_vec(),
            renames: AtomicUsize::new(0),
        }
    }

    fn fails(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    fn injected(step: &str) -> io::Error {
        io::Error::other(format!("injected {step} failure"))
    }
}

impl FileSystem for FaultyFileSystem {
    fn exists(&self, path: &Path) -> bool {
        OsFileSystem.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        OsFileSystem.is_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        OsFileSystem.read(path)
    }

    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if self.fails(Fault::Write) {
            OsFileSystem.write_new(path, &contents[..contents.len() / 2])?;
            return Err(Self::injected("write"));
        }
        OsFileSystem.write_new(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let n = self.renames.fetch_add(1, Ordering::SeqCst);
        if self.fails(Fault::Rename(n)) {
            return Err(Self::injected("rename"));
        }
        OsFileSystem.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.fails(Fault::RemoveFile) {
            return Err(Self::injected("remove"));
        }
        OsFileSystem.remove_file(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        if self.fails(Fault::CreateDir) {
            return Err(Self::injected("create directory"));
        }
        OsFileSystem.create_dir(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        OsFileSystem.remove_dir(path)
    }

    fn is_empty_dir(&self, path: &Path) -> bool {
        OsFileSystem.is_empty_dir(path)
    }
}
