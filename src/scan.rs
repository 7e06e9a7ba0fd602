//! Source file discovery.
//!
//! Stage 1 of the pipeline. Walks the source directory and lists every
//! regular file that should be embedded, in a stable order.
//!
//! ## Ordering
//!
//! Directory entries are visited sorted by file name, depth first, so the
//! same tree always yields the same list on every platform. This order is
//! carried through to the generated handlers and routes.
//!
//! ## Exclusions
//!
//! Each exclude pattern is a glob. A pattern matches an entry when it
//! matches either the entry's `/`-separated path relative to the root or
//! its bare file name:
//!
//! ```text
//! exclude = ["*.map", ".*", "drafts"]
//!
//! static/
//! ├── index.html        kept
//! ├── app.js            kept
//! ├── app.js.map        skipped (*.map matches the name)
//! ├── .DS_Store         skipped (.* matches the name)
//! └── drafts/           skipped with everything below it
//! ```
//!
//! Symlinks are followed, so a link to a file is embedded like the file.

use crate::naming;
use crate::types::SourceFile;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Cannot walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Compiled exclude patterns.
#[derive(Debug, Clone)]
pub struct Excludes {
    set: GlobSet,
}

impl Excludes {
    pub fn new(patterns: &[String]) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| ScanError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| ScanError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { set })
    }

    /// Whether an entry with this relative path and file name is excluded.
    pub fn matches(&self, relative_path: &str, name: &str) -> bool {
        self.set.is_match(relative_path) || self.set.is_match(name)
    }
}

/// List all embeddable files under `root`, skipping excluded entries.
pub fn scan(root: &Path, exclude: &[String]) -> Result<Vec<SourceFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    let excludes = Excludes::new(exclude)?;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // Never filter the root itself, whatever its name.
            if entry.depth() == 0 {
                return true;
            }
            let rel = naming::relative_path(root, entry.path()).unwrap_or_default();
            let name = entry.file_name().to_string_lossy();
            !excludes.matches(&rel, &name)
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative_path) = naming::relative_path(root, entry.path()) else {
            continue;
        };
        files.push(SourceFile {
            path: entry.into_path(),
            relative_path,
        });
    }

    tracing::info!(root = %root.display(), files = files.len(), "scan complete");
    Ok(files)
}
