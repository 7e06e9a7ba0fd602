//! Asset compilation.
//!
//! Stage 2 of the pipeline. Reads every discovered source, gzips it, splits
//! the result into literal-sized chunks and derives its names, producing one
//! [`AssetDescriptor`] per file.
//!
//! ## Parallel Processing
//!
//! Sources are independent, so each one is compiled as its own
//! [rayon](https://docs.rs/rayon) task. Results are collected in scan order
//! and the first failure aborts the whole stage: either every asset compiles
//! or the caller gets an error and nothing downstream runs.
//!
//! ## Identifier collisions
//!
//! Sanitizing is lossy (`a.b.js` and `a_b.js` both become `static_a_b_js`),
//! and a file literally named `index` in the root maps onto the reserved
//! `static_index`. Emitting both would produce duplicate C symbols, so
//! [`process`] rejects any run where two sources share an identifier.

use crate::compress::{self, MAX_CHUNK_SIZE};
use crate::naming;
use crate::types::{AssetDescriptor, SourceFile};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Compression failed for {path}: {source}")]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Identifier {identifier} is produced by both {first} and {second}")]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },
}

/// Settings for compiling assets.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Relative path of the file served at `""`, already normalized.
    pub index_file: String,
    /// Upper bound for a single literal block.
    pub max_chunk: usize,
}

impl ProcessConfig {
    pub fn new(index_file: &str) -> Self {
        Self {
            index_file: naming::normalize_index_path(index_file),
            max_chunk: MAX_CHUNK_SIZE,
        }
    }
}

/// Compile one source file into a descriptor.
pub fn compile_asset(
    source: &SourceFile,
    config: &ProcessConfig,
) -> Result<AssetDescriptor, ProcessError> {
    let data = std::fs::read(&source.path).map_err(|e| ProcessError::Read {
        path: source.path.clone(),
        source: e,
    })?;
    let compressed =
        compress::compress_asset(&data, config.max_chunk).map_err(|e| ProcessError::Compress {
            path: source.path.clone(),
            source: e,
        })?;

    let is_index = source.relative_path == config.index_file;
    let descriptor = AssetDescriptor {
        identifier: naming::identifier(&source.relative_path, is_index),
        url_path: naming::url_path(&source.relative_path, is_index),
        relative_path: source.relative_path.clone(),
        content_type: naming::content_type(&source.relative_path),
        original_len: compressed.original_len,
        compressed_len: compressed.compressed_len,
        chunks: compressed.chunks,
    };

    tracing::debug!(
        path = %descriptor.relative_path,
        identifier = %descriptor.identifier,
        original = descriptor.original_len,
        compressed = descriptor.compressed_len,
        chunks = descriptor.chunks.len(),
        "compiled asset"
    );
    Ok(descriptor)
}

/// Compile all sources in parallel, preserving their order.
pub fn process(
    sources: &[SourceFile],
    config: &ProcessConfig,
) -> Result<Vec<AssetDescriptor>, ProcessError> {
    let assets = sources
        .par_iter()
        .map(|source| compile_asset(source, config))
        .collect::<Result<Vec<_>, _>>()?;

    check_identifiers(&assets)?;

    if !assets.iter().any(AssetDescriptor::is_index) {
        tracing::warn!(
            index_file = %config.index_file,
            "index file not found among sources; nothing will be served at the root URL"
        );
    }
    tracing::info!(assets = assets.len(), "process complete");
    Ok(assets)
}

/// Fail on the first identifier produced by two different sources.
pub fn check_identifiers(assets: &[AssetDescriptor]) -> Result<(), ProcessError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(assets.len());
    for asset in assets {
        if let Some(first) = seen.insert(&asset.identifier, &asset.relative_path) {
            return Err(ProcessError::IdentifierCollision {
                identifier: asset.identifier.clone(),
                first: first.to_string(),
                second: asset.relative_path.clone(),
            });
        }
    }
    Ok(())
}
