//! Sources of replacement (DCEVM) libraries
//!
//! A [`PatchSource`] maps a version directory (`1.7`, `1.8`) and a bit-width
//! to the bytes of the replacement library, or reports that none exists.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, fs};
use crate::hash;
use crate::layout::Layout;

/// Provider of replacement library streams
pub trait PatchSource: Send + Sync {
    /// Open the replacement library, `None` if no build exists for this key
    fn open(&self, version_dir: &str, bit64: bool) -> Result<Option<Box<dyn Read>>>;
}

/// A replacement library read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub bytes: Vec<u8>,
    /// BLAKE3 hash of `bytes`
    pub hash: String,
}

impl Patch {
    pub fn new(bytes: Vec<u8>) -> Self {
        let hash = hash::hash_bytes(&bytes);
        Self { bytes, hash }
    }
}

/// Read the patch for a key into memory before anything is touched on disk
pub fn fetch(source: &dyn PatchSource, version_dir: &str, bit64: bool) -> Result<Option<Patch>> {
    let Some(mut stream) = source.open(version_dir, bit64)? else {
        return Ok(None);
    };

    let mut bytes = Vec::new();
    stream
        .read_to_end(&mut bytes)
        .map_err(|e| fs::operation_failed("read patch", Path::new(version_dir), &e))?;

    Ok(Some(Patch::new(bytes)))
}

/// Patches laid out on disk as `<root>/<version dir>/<resource path>/product/<library>`
pub struct DirectoryPatchSource {
    root: PathBuf,
    layout: Arc<dyn Layout>,
}

impl DirectoryPatchSource {
    pub fn new(root: impl Into<PathBuf>, layout: Arc<dyn Layout>) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Where the library for this key is expected
    pub fn patch_path(&self, version_dir: &str, bit64: bool) -> PathBuf {
        self.root
            .join(version_dir)
            .join(self.layout.resource_path(bit64))
            .join("product")
            .join(self.layout.library_name())
    }
}

impl PatchSource for DirectoryPatchSource {
    fn open(&self, version_dir: &str, bit64: bool) -> Result<Option<Box<dyn Read>>> {
        let path = self.patch_path(version_dir, bit64);
        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(fs::operation_failed("open patch", &path, &e)),
        }
    }
}

/// In-memory patches, e.g. embedded with `include_bytes!`
#[derive(Debug, Clone, Default)]
pub struct StaticPatchSource {
    patches: HashMap<(String, bool), Arc<[u8]>>,
}

impl StaticPatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, version_dir: &str, bit64: bool, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(version_dir, bit64, bytes);
        self
    }

    pub fn insert(&mut self, version_dir: &str, bit64: bool, bytes: impl Into<Arc<[u8]>>) {
        self.patches
            .insert((version_dir.to_string(), bit64), bytes.into());
    }
}

impl PatchSource for StaticPatchSource {
    fn open(&self, version_dir: &str, bit64: bool) -> Result<Option<Box<dyn Read>>> {
        Ok(self
            .patches
            .get(&(version_dir.to_string(), bit64))
            .map(|bytes| Box::new(io::Cursor::new(Arc::clone(bytes))) as Box<dyn Read>))
    }
}
