//! Built-in layouts and their YAML representation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{InstallKind, Layout};
use crate::error::{Result, config};

/// A fully specified installation layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub jre_dir: PathBuf,
    pub server_path_32: PathBuf,
    pub server_path_64: PathBuf,
    pub client_path: PathBuf,
    pub alt_jvm_path_32: PathBuf,
    pub alt_jvm_path_64: PathBuf,
    pub library_name: String,
    pub backup_library_name: String,
    pub resource_path_32: String,
    pub resource_path_64: String,
    /// Paths that must all exist under a JDK root
    pub jdk_markers: Vec<PathBuf>,
    /// Paths that must all exist under a JRE root
    pub jre_markers: Vec<PathBuf>,
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

/// Partial layout read from a user file; every present field replaces the preset's
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutOverride {
    pub jre_dir: Option<PathBuf>,
    pub server_path_32: Option<PathBuf>,
    pub server_path_64: Option<PathBuf>,
    pub client_path: Option<PathBuf>,
    pub alt_jvm_path_32: Option<PathBuf>,
    pub alt_jvm_path_64: Option<PathBuf>,
    pub library_name: Option<String>,
    pub backup_library_name: Option<String>,
    pub resource_path_32: Option<String>,
    pub resource_path_64: Option<String>,
    pub jdk_markers: Option<Vec<PathBuf>>,
    pub jre_markers: Option<Vec<PathBuf>>,
    pub search_paths: Option<Vec<PathBuf>>,
}

impl LayoutOverride {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn home_paths(relative: &[&str]) -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| relative.iter().map(|r| home.join(r)).collect())
        .unwrap_or_default()
}

impl LayoutConfig {
    /// Oracle/OpenJDK 7-8 layout on Linux
    pub fn linux() -> Self {
        let mut search_paths = vec![PathBuf::from("/usr/lib/jvm"), PathBuf::from("/usr/java")];
        search_paths.extend(home_paths(&[".jdks", ".sdkman/candidates/java"]));

        Self {
            jre_dir: "jre".into(),
            server_path_32: "lib/i386/server".into(),
            server_path_64: "lib/amd64/server".into(),
            client_path: "lib/i386/client".into(),
            alt_jvm_path_32: "lib/i386/dcevm".into(),
            alt_jvm_path_64: "lib/amd64/dcevm".into(),
            library_name: "libjvm.so".to_string(),
            backup_library_name: "libjvm.so.backup".to_string(),
            resource_path_32: "linux_i386_compiler2".to_string(),
            resource_path_64: "linux_amd64_compiler2".to_string(),
            jdk_markers: vec!["bin/javac".into(), "jre".into()],
            jre_markers: vec!["bin/java".into(), "lib/rt.jar".into()],
            search_paths,
        }
    }

    /// JDK bundles under `/Library/Java/JavaVirtualMachines`
    pub fn macos() -> Self {
        let mut search_paths = vec![PathBuf::from("/Library/Java/JavaVirtualMachines")];
        search_paths.extend(home_paths(&["Library/Java/JavaVirtualMachines"]));

        Self {
            jre_dir: "Contents/Home/jre".into(),
            server_path_32: "lib/server".into(),
            server_path_64: "lib/server".into(),
            client_path: "lib/client".into(),
            alt_jvm_path_32: "lib/dcevm".into(),
            alt_jvm_path_64: "lib/dcevm".into(),
            library_name: "libjvm.dylib".to_string(),
            backup_library_name: "libjvm.dylib.backup".to_string(),
            resource_path_32: "bsd_i386_compiler2".to_string(),
            resource_path_64: "bsd_amd64_compiler2".to_string(),
            jdk_markers: vec!["Contents/Home/bin/javac".into(), "Contents/Home/jre".into()],
            jre_markers: vec!["bin/java".into(), "lib/rt.jar".into()],
            search_paths,
        }
    }

    pub fn windows() -> Self {
        Self {
            jre_dir: "jre".into(),
            server_path_32: "bin/server".into(),
            server_path_64: "bin/server".into(),
            client_path: "bin/client".into(),
            alt_jvm_path_32: "bin/dcevm".into(),
            alt_jvm_path_64: "bin/dcevm".into(),
            library_name: "jvm.dll".to_string(),
            backup_library_name: "jvm.dll.backup".to_string(),
            resource_path_32: "windows_i486_compiler2".to_string(),
            resource_path_64: "windows_amd64_compiler2".to_string(),
            jdk_markers: vec!["bin/javac.exe".into(), "jre".into()],
            jre_markers: vec!["bin/java.exe".into(), "lib/rt.jar".into()],
            search_paths: vec![
                PathBuf::from(r"C:\Program Files\Java"),
                PathBuf::from(r"C:\Program Files (x86)\Java"),
            ],
        }
    }

    /// Preset for the operating system this crate was built for
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::windows()
        } else if cfg!(target_os = "macos") {
            Self::macos()
        } else {
            Self::linux()
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let layout: Self = serde_yaml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Apply an override on top of this layout
    pub fn merge(mut self, o: LayoutOverride) -> Result<Self> {
        replace(&mut self.jre_dir, o.jre_dir);
        replace(&mut self.server_path_32, o.server_path_32);
        replace(&mut self.server_path_64, o.server_path_64);
        replace(&mut self.client_path, o.client_path);
        replace(&mut self.alt_jvm_path_32, o.alt_jvm_path_32);
        replace(&mut self.alt_jvm_path_64, o.alt_jvm_path_64);
        replace(&mut self.library_name, o.library_name);
        replace(&mut self.backup_library_name, o.backup_library_name);
        replace(&mut self.resource_path_32, o.resource_path_32);
        replace(&mut self.resource_path_64, o.resource_path_64);
        replace(&mut self.jdk_markers, o.jdk_markers);
        replace(&mut self.jre_markers, o.jre_markers);
        replace(&mut self.search_paths, o.search_paths);

        self.validate()?;
        Ok(self)
    }

    /// The library and its backup must be distinct, non-empty file names
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("library_name", &self.library_name),
            ("backup_library_name", &self.backup_library_name),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(config::invalid(format!(
                    "{field} must be a plain file name, got '{name}'"
                )));
            }
        }

        if self.library_name == self.backup_library_name {
            return Err(config::invalid(
                "library_name and backup_library_name must differ",
            ));
        }

        if self.jdk_markers.is_empty() || self.jre_markers.is_empty() {
            return Err(config::invalid(
                "jdk_markers and jre_markers must name at least one path",
            ));
        }

        Ok(())
    }

    fn has_all(dir: &Path, markers: &[PathBuf]) -> bool {
        markers.iter().all(|m| dir.join(m).exists())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::host()
    }
}

impl Layout for LayoutConfig {
    fn server_path(&self, bit64: bool) -> &Path {
        if bit64 {
            &self.server_path_64
        } else {
            &self.server_path_32
        }
    }

    fn client_path(&self) -> &Path {
        &self.client_path
    }

    fn alt_jvm_path(&self, bit64: bool) -> &Path {
        if bit64 {
            &self.alt_jvm_path_64
        } else {
            &self.alt_jvm_path_32
        }
    }

    fn jre_dir(&self) -> &Path {
        &self.jre_dir
    }

    fn library_name(&self) -> &str {
        &self.library_name
    }

    fn backup_library_name(&self) -> &str {
        &self.backup_library_name
    }

    fn resource_path(&self, bit64: bool) -> &str {
        if bit64 {
            &self.resource_path_64
        } else {
            &self.resource_path_32
        }
    }

    fn classify(&self, dir: &Path) -> Option<InstallKind> {
        if Self::has_all(dir, &self.jdk_markers) {
            Some(InstallKind::Jdk)
        } else if Self::has_all(dir, &self.jre_markers) {
            Some(InstallKind::Jre)
        } else {
            None
        }
    }

    fn search_paths(&self) -> Vec<PathBuf> {
        self.search_paths.clone()
    }
}
