//! Common test utilities for DCEVM installer integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dcevm_installer::{Installer, LayoutConfig, StaticPatchSource};
use tempfile::TempDir;

/// Bytes of the library shipped by a fake installation
#[allow(dead_code)]
pub const ORIGINAL: &[u8] = b"original libjvm";

/// Bytes of the replacement library
#[allow(dead_code)]
pub const DCEVM: &[u8] = b"dcevm libjvm";

/// A temp directory holding fake Java installations
pub struct TestTree {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the tree root
    pub path: PathBuf,
}

impl TestTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a Linux JDK with an embedded JRE
    #[allow(dead_code)]
    pub fn create_jdk(&self, name: &str, version: &str, bit64: bool) -> PathBuf {
        let root = self.path.join(name);
        self.touch(&root.join("bin/javac"));
        self.touch(&root.join("bin/java"));
        self.write_release(&root, version, bit64);
        self.create_jre_tree(&root.join("jre"), bit64);
        root
    }

    /// Create a standalone Linux JRE
    #[allow(dead_code)]
    pub fn create_jre(&self, name: &str, version: &str, bit64: bool) -> PathBuf {
        let root = self.path.join(name);
        self.write_release(&root, version, bit64);
        self.create_jre_tree(&root, bit64);
        root
    }

    /// Write a file, creating parent directories
    pub fn write_file(&self, path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    #[allow(dead_code)]
    pub fn read_file(&self, path: &Path) -> Vec<u8> {
        std::fs::read(path).expect("Failed to read file")
    }

    fn touch(&self, path: &Path) {
        self.write_file(path, b"");
    }

    fn write_release(&self, root: &Path, version: &str, bit64: bool) {
        let arch = if bit64 { "amd64" } else { "i386" };
        self.write_file(
            &root.join("release"),
            format!("JAVA_VERSION=\"{version}\"\nOS_ARCH=\"{arch}\"\n").as_bytes(),
        );
    }

    fn create_jre_tree(&self, jre: &Path, bit64: bool) {
        self.touch(&jre.join("bin/java"));
        self.touch(&jre.join("lib/rt.jar"));
        if bit64 {
            self.write_file(&jre.join("lib/amd64/server/libjvm.so"), ORIGINAL);
        } else {
            self.write_file(&jre.join("lib/i386/server/libjvm.so"), ORIGINAL);
            self.write_file(&jre.join("lib/i386/client/libjvm.so"), ORIGINAL);
        }
    }
}

/// Installer for the Linux layout with DCEVM builds for 1.7 and 1.8
#[allow(dead_code)]
pub fn linux_installer() -> Installer {
    let patches = StaticPatchSource::new()
        .with("1.7", false, DCEVM.to_vec())
        .with("1.7", true, DCEVM.to_vec())
        .with("1.8", false, DCEVM.to_vec())
        .with("1.8", true, DCEVM.to_vec());
    Installer::new(Arc::new(LayoutConfig::linux()), Arc::new(patches))
}
