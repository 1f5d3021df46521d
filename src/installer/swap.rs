//! Backup, write and rollback of a single library
//!
//! A [`Swap`] runs the protocol in three steps:
//!
//! 1. [`Swap::backup`] moves an existing library to the backup path (the only
//!    copy of the original from then on),
//! 2. [`Swap::write`] writes the replacement to the library path,
//! 3. [`Swap::commit`] on success, or [`Swap::rollback`] on failure.
//!
//! Rollback only undoes what this swap did: a backup it moved is moved back
//! over the library, and a library it wrote without a backup is removed.
//! Dropping an unfinished swap rolls back.

use std::io;

use tracing::{info, warn};

use super::site::LibraryPair;
use crate::error::{Result, fs as fs_error, install};
use crate::fs::{FileSystem, remove_file_if_exists};

pub struct Swap<'a> {
    fs: &'a dyn FileSystem,
    pair: &'a LibraryPair,
    backed_up: bool,
    write_attempted: bool,
    finished: bool,
}

impl<'a> Swap<'a> {
    pub fn begin(fs: &'a dyn FileSystem, pair: &'a LibraryPair) -> Self {
        Self {
            fs,
            pair,
            backed_up: false,
            write_attempted: false,
            finished: false,
        }
    }

    /// Move the existing library, if any, to the backup path
    pub fn backup(&mut self) -> Result<()> {
        if !self.fs.exists(&self.pair.library) {
            return Ok(());
        }

        self.fs
            .rename(&self.pair.library, &self.pair.backup)
            .map_err(|e| fs_error::operation_failed("back up", &self.pair.library, &e))?;
        self.backed_up = true;
        Ok(())
    }

    /// Write the replacement library
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_attempted = true;
        self.fs
            .write_new(&self.pair.library, bytes)
            .map_err(|e| fs_error::operation_failed("write", &self.pair.library, &e))
    }

    pub fn commit(mut self) {
        self.finished = true;
    }

    /// Undo the steps taken so far
    pub fn rollback(&mut self) -> io::Result<()> {
        self.finished = true;

        if self.backed_up {
            self.fs.rename(&self.pair.backup, &self.pair.library)
        } else if self.write_attempted {
            remove_file_if_exists(self.fs, &self.pair.library)
        } else {
            Ok(())
        }
    }
}

impl Drop for Swap<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.rollback() {
                warn!(library = %self.pair.library.display(), "Rollback failed: {e}");
            }
        }
    }
}

/// Replace the library at `pair` with `bytes`, keeping the original as backup
pub fn swap(fs: &dyn FileSystem, pair: &LibraryPair, bytes: &[u8]) -> Result<()> {
    let mut swap = Swap::begin(fs, pair);

    if let Err(err) = swap.backup().and_then(|()| swap.write(bytes)) {
        warn!(library = %pair.library.display(), "Swap failed, rolling back: {err}");
        return match swap.rollback() {
            Ok(()) => Err(err),
            Err(rollback_err) => Err(install::rollback_failed(
                pair.library.display().to_string(),
                err.to_string(),
                rollback_err.to_string(),
            )),
        };
    }

    swap.commit();
    Ok(())
}

/// Put the backed-up original back in place.
///
/// Returns `false` when there is no backup, in which case nothing is touched.
pub fn restore(fs: &dyn FileSystem, pair: &LibraryPair) -> Result<bool> {
    if !fs.exists(&pair.backup) {
        return Ok(false);
    }

    remove_file_if_exists(fs, &pair.library)
        .map_err(|e| fs_error::operation_failed("remove", &pair.library, &e))?;
    fs.rename(&pair.backup, &pair.library)
        .map_err(|e| fs_error::operation_failed("restore", &pair.backup, &e))?;

    info!(library = %pair.library.display(), "Restored original library");
    Ok(true)
}
