//! Output generation.
//!
//! Stage 3 of the pipeline. Renders the compiled assets into
//! `StaticFiles.h` and, when requested, the bootstrap sketch.
//!
//! ## Output Structure
//!
//! ```text
//! sketch/
//! ├── StaticFiles.h       # One handler per asset + ServeStatic()
//! └── sketch.ino          # Only with create_sketch = "wifi" | "ethernet"
//! ```
//!
//! The sketch is named after its directory because the Arduino IDE only
//! opens `<dir>/<dir>.ino`.
//!
//! ## Writes
//!
//! Both texts are rendered in full before the first byte hits the disk.
//! Each file is written to a temporary file in the destination directory
//! and then persisted over the target, so a failed write leaves the
//! previous build's file as it was.

use crate::render;
use crate::types::{AssetDescriptor, SketchMode};
use sha2::{Digest, Sha256};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File name of the generated header.
pub const STATIC_FILES_NAME: &str = "StaticFiles.h";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Duplicate routes: {}", format_duplicates(.0))]
    DuplicateRoutes(Vec<(String, Vec<String>)>),
    #[error("Cannot derive a sketch name from {0}")]
    SketchName(PathBuf),
}

fn format_duplicates(dups: &[(String, Vec<String>)]) -> String {
    dups.iter()
        .map(|(url, sources)| format!("\"{}\" <- {}", url, sources.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex SHA-256 of the written contents.
    pub sha256: String,
}

/// Everything a run wrote.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub static_files: GeneratedFile,
    pub sketch: Option<GeneratedFile>,
}

/// Path of the bootstrap sketch for `sketch_dir`.
///
/// The sketch takes the directory's own name: `out/my-device/` becomes
/// `out/my-device/my-device.ino`. Relative paths such as `.`, `..` or
/// `out/..` are resolved against the working directory first. Only a
/// filesystem root has no name.
pub fn sketch_path(sketch_dir: &Path) -> Result<PathBuf, GenerateError> {
    let mut file = directory_name(sketch_dir)
        .ok_or_else(|| GenerateError::SketchName(sketch_dir.to_path_buf()))?;
    file.push(".ino");
    Ok(sketch_dir.join(file))
}

/// Final segment of `dir` once made absolute, with `.` and `..` folded
/// lexically.
fn directory_name(dir: &Path) -> Option<OsString> {
    let abs = std::path::absolute(dir).ok()?;
    let mut segments: Vec<&OsStr> = Vec::new();
    for component in abs.components() {
        match component {
            Component::Normal(segment) => segments.push(segment),
            Component::ParentDir => {
                segments.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    segments.last().map(|s| s.to_os_string())
}

/// Render and write all outputs for `assets`.
pub fn generate(
    assets: &[AssetDescriptor],
    sketch_dir: &Path,
    mode: SketchMode,
) -> Result<GenerateResult, GenerateError> {
    let dups = render::router::duplicate_routes(assets);
    if !dups.is_empty() {
        return Err(GenerateError::DuplicateRoutes(dups));
    }

    let static_files = render::render_static_files(assets);
    let sketch = match render::render_sketch(mode) {
        Some(text) => Some((sketch_path(sketch_dir)?, text)),
        None => None,
    };

    let static_files = write_file(&sketch_dir.join(STATIC_FILES_NAME), &static_files)?;
    let sketch = match sketch {
        Some((path, text)) => Some(write_file(&path, &text)?),
        None => None,
    };

    tracing::info!(dir = %sketch_dir.display(), sketch = sketch.is_some(), "generate complete");
    Ok(GenerateResult {
        static_files,
        sketch,
    })
}

/// Hex SHA-256 of `contents`.
pub fn content_hash(contents: &[u8]) -> String {
    format!("{:x}", Sha256::digest(contents))
}

/// Write `contents` to `path`, creating parent directories.
///
/// The previous file at `path` is replaced only once the new contents are
/// fully on disk.
pub fn write_file(path: &Path, contents: &str) -> Result<GeneratedFile, GenerateError> {
    let err = |source: std::io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(err)?;
    tmp.write_all(contents.as_bytes()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;
    tmp.persist(path).map_err(|e| err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(GeneratedFile {
        path: path.to_path_buf(),
        bytes: contents.len(),
        sha256: content_hash(contents.as_bytes()),
    })
}
