//! Install and uninstall of DCEVM into one installation
//!
//! This module handles:
//! - Resolving the target sites of an installation (server, client, alternate JVM)
//! - Swapping the JVM library at each site, with backup and rollback
//! - Restoring the original libraries and removing alternate-JVM directories
//!
//! Nothing here locks: callers serialize operations on one installation root.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::discovery::{self, ScanReport};
use crate::error::{InstallerError, Result, fs as fs_error, install, patch as patch_error};
use crate::fs::{FileSystem, OsFileSystem, remove_file_if_exists};
use crate::hash;
use crate::layout::Layout;
use crate::patch::{self, Patch, PatchSource};
use crate::version;

pub mod site;
pub mod swap;

pub use site::{LibraryPair, SiteKind, SiteState, TargetSite};

/// Installs and uninstalls DCEVM according to a layout
#[derive(Clone)]
pub struct Installer {
    layout: Arc<dyn Layout>,
    patches: Arc<dyn PatchSource>,
    fs: Arc<dyn FileSystem>,
}

impl Installer {
    pub fn new(layout: Arc<dyn Layout>, patches: Arc<dyn PatchSource>) -> Self {
        Self {
            layout,
            patches,
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Route all file operations through `fs`
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn layout(&self) -> &dyn Layout {
        self.layout.as_ref()
    }

    /// Install DCEVM for `java_version` into the installation at `dir`.
    ///
    /// Without `alt_jvm` the server library (and, for 32-bit, the client
    /// library) is replaced in place where present. With `alt_jvm` the
    /// library goes into the alternate-JVM directory, which is created.
    ///
    /// Every site is checked before the first one is touched: a missing patch
    /// fails with `PatchNotFound` and an already patched site with
    /// `AlreadyPatched`, both without changes on disk. Returns the patched
    /// sites, empty if the installation has none of them.
    pub fn install(
        &self,
        java_version: &str,
        dir: &Path,
        bit64: bool,
        alt_jvm: bool,
    ) -> Result<Vec<TargetSite>> {
        let version_dir = version::version_dir(java_version)?;
        let root = self.layout.effective_root(dir);
        let sites = self.plan_install(&root, bit64, alt_jvm);

        let Some(first) = sites.first() else {
            debug!(root = %root.display(), "No server or client library directory, nothing to install");
            return Ok(sites);
        };

        let patch = patch::fetch(self.patches.as_ref(), &version_dir, bit64)?.ok_or_else(|| {
            patch_error::not_found(java_version, bit64, first.dir.display().to_string())
        })?;

        for site in &sites {
            self.ensure_not_patched(site, &patch)?;
        }

        for site in &sites {
            self.install_site(site, &patch)?;
        }

        Ok(sites)
    }

    /// Restore the original libraries and remove alternate-JVM directories.
    ///
    /// Server, client (32-bit only) and both alternate-JVM locations are each
    /// attempted even when an earlier one fails; the first failure is returned.
    pub fn uninstall(&self, dir: &Path, bit64: bool) -> Result<()> {
        let root = self.layout.effective_root(dir);
        let mut first_error: Option<InstallerError> = None;
        let mut record = |result: Result<()>| {
            if let Err(e) = result {
                warn!("Uninstall step failed: {e}");
                first_error.get_or_insert(e);
            }
        };

        let mut in_place = vec![TargetSite::server(self.layout(), &root, bit64)];
        if !bit64 {
            in_place.push(TargetSite::client(self.layout(), &root));
        }
        for site in in_place.iter().filter(|s| self.fs.exists(&s.dir)) {
            record(self.restore_site(site));
        }

        let mut alt_sites = vec![
            TargetSite::alt_jvm(self.layout(), &root, false),
            TargetSite::alt_jvm(self.layout(), &root, true),
        ];
        alt_sites.dedup_by(|a, b| a.dir == b.dir);
        for site in alt_sites.iter().filter(|s| self.fs.exists(&s.dir)) {
            record(
                self.restore_site(site)
                    .and_then(|()| self.remove_alt_jvm_dir(site)),
            );
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Scan the layout's search paths for installations
    pub fn list_installations(&self) -> ScanReport {
        discovery::scan_default(self.layout())
    }

    fn plan_install(&self, root: &Path, bit64: bool, alt_jvm: bool) -> Vec<TargetSite> {
        if alt_jvm {
            return vec![TargetSite::alt_jvm(self.layout(), root, bit64)];
        }

        let mut sites = Vec::new();
        let server = TargetSite::server(self.layout(), root, bit64);
        if self.fs.exists(&server.dir) {
            sites.push(server);
        }

        let client = TargetSite::client(self.layout(), root);
        if !bit64 && self.fs.exists(&client.dir) {
            sites.push(client);
        }

        sites
    }

    /// A backup at the site, or a library identical to the patch, means a
    /// second swap would overwrite the original's only copy
    fn ensure_not_patched(&self, site: &TargetSite, patch: &Patch) -> Result<()> {
        let pair = site.library_pair(self.layout());

        if pair.state(self.fs.as_ref()) == SiteState::Patched {
            return Err(install::already_patched(site.dir.display().to_string()));
        }

        if self.fs.exists(&pair.library) {
            let current = hash::hash_file(self.fs.as_ref(), &pair.library)
                .map_err(|e| fs_error::operation_failed("read", &pair.library, &e))?;
            if current == patch.hash {
                return Err(install::already_patched(site.dir.display().to_string()));
            }
        }

        Ok(())
    }

    fn install_site(&self, site: &TargetSite, patch: &Patch) -> Result<()> {
        let created_dir = if site.kind == SiteKind::AltJvm && !self.fs.is_dir(&site.dir) {
            self.fs
                .create_dir(&site.dir)
                .map_err(|e| fs_error::operation_failed("create directory", &site.dir, &e))?;
            true
        } else {
            false
        };

        let pair = site.library_pair(self.layout());
        if let Err(err) = swap::swap(self.fs.as_ref(), &pair, &patch.bytes) {
            if created_dir && self.fs.is_empty_dir(&site.dir) {
                if let Err(e) = self.fs.remove_dir(&site.dir) {
                    warn!(dir = %site.dir.display(), "Failed to remove alternate JVM directory: {e}");
                }
            }
            return Err(err);
        }

        info!(site = %site.dir.display(), kind = ?site.kind, "Installed DCEVM");
        Ok(())
    }

    fn restore_site(&self, site: &TargetSite) -> Result<()> {
        let pair = site.library_pair(self.layout());
        if !swap::restore(self.fs.as_ref(), &pair)? {
            debug!(site = %site.dir.display(), "No backup, nothing to restore");
        }
        Ok(())
    }

    fn remove_alt_jvm_dir(&self, site: &TargetSite) -> Result<()> {
        let pair = site.library_pair(self.layout());
        for path in [&pair.library, &pair.backup] {
            remove_file_if_exists(self.fs.as_ref(), path)
                .map_err(|e| fs_error::operation_failed("remove", path, &e))?;
        }

        self.fs
            .remove_dir(&site.dir)
            .map_err(|e| fs_error::operation_failed("remove directory", &site.dir, &e))?;

        info!(dir = %site.dir.display(), "Removed alternate JVM directory");
        Ok(())
    }
}
