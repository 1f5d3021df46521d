//! DCEVM installer - swaps the JVM library of JDK/JRE installations
//!
//! Installs a replacement (DCEVM) `libjvm` into a Java installation, either in
//! place with a backup of the original or side by side as an alternate JVM,
//! and restores the original on uninstall. Also scans well-known directories
//! for installations and reports their version, bit-width and patch state.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dcevm_installer::{DirectoryPatchSource, Installer, LayoutLoader};
//!
//! # fn main() -> dcevm_installer::Result<()> {
//! let layout = Arc::new(LayoutLoader::new().load()?);
//! let patches = Arc::new(DirectoryPatchSource::new("/opt/dcevm/data", layout.clone()));
//! let installer = Installer::new(layout, patches);
//!
//! for installation in installer.list_installations().installations {
//!     installer.install(&installation.version, &installation.root, installation.bit64, false)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod error;
pub mod fs;
pub mod hash;
pub mod installer;
pub mod layout;
pub mod patch;
pub mod version;

#[cfg(test)]
mod test_fixtures;

pub use discovery::{DiagnosticKind, Installation, ScanDiagnostic, ScanReport, scan, scan_default};
pub use error::{InstallerError, Result};
pub use fs::{FileSystem, OsFileSystem};
pub use installer::{Installer, SiteKind, TargetSite};
pub use layout::{InstallKind, Layout, LayoutConfig, LayoutLoader, LayoutOverride};
pub use patch::{DirectoryPatchSource, PatchSource, StaticPatchSource};
