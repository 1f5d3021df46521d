//! Discovery of JDK/JRE installations
//!
//! Scanning is best-effort: a root that cannot be listed or a candidate that
//! cannot be probed is recorded as a [`ScanDiagnostic`] and skipped, and the
//! scan goes on with the rest.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::layout::Layout;

pub mod installation;

pub use installation::Installation;

/// Why a path was left out of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The search root could not be listed
    UnreadableRoot,
    /// An entry of the search root could not be read
    UnreadableEntry,
    /// Looked like a JDK/JRE but could not be probed
    InvalidInstallation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
    pub reason: String,
}

/// Installations found by a scan, plus what was skipped
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Deduplicated, in the order first found
    pub installations: Vec<Installation>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Scan the immediate children of each root for installations
pub fn scan<I, P>(layout: &dyn Layout, roots: I) -> ScanReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut scanner = Scanner {
        layout,
        report: ScanReport::default(),
        seen: HashSet::new(),
    };

    for root in roots {
        scanner.scan_root(root.as_ref());
    }

    scanner.report
}

/// Scan the layout's configured search paths
pub fn scan_default(layout: &dyn Layout) -> ScanReport {
    scan(layout, layout.search_paths())
}

struct Scanner<'a> {
    layout: &'a dyn Layout,
    report: ScanReport,
    seen: HashSet<PathBuf>,
}

impl Scanner<'_> {
    fn scan_root(&mut self, root: &Path) {
        if !root.is_dir() {
            debug!(root = %root.display(), "Search root is not a directory, skipping");
            return;
        }

        let entries = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    self.diagnose(root.to_path_buf(), DiagnosticKind::UnreadableRoot, e.to_string());
                    return;
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    self.diagnose(path, DiagnosticKind::UnreadableEntry, e.to_string());
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_dir() && self.layout.classify(path).is_some() {
                self.add_candidate(path);
            }
        }
    }

    fn add_candidate(&mut self, path: &Path) {
        match Installation::probe(self.layout, path) {
            Ok(installation) => {
                if self.seen.insert(installation.root.clone()) {
                    debug!(root = %installation.root.display(), version = %installation.version, "Found installation");
                    self.report.installations.push(installation);
                } else {
                    debug!(path = %path.display(), "Installation already found, skipping");
                }
            }
            Err(e) => {
                self.diagnose(path.to_path_buf(), DiagnosticKind::InvalidInstallation, e.to_string());
            }
        }
    }

    fn diagnose(&mut self, path: PathBuf, kind: DiagnosticKind, reason: String) {
        warn!(path = %path.display(), ?kind, "Skipping during scan: {reason}");
        self.report.diagnostics.push(ScanDiagnostic { path, kind, reason });
    }
}
