//! End-to-end runs: scan → process → generate.
//!
//! [`build`] is the whole pipeline; [`check`] stops after processing so a
//! source tree can be validated without touching the output directory.

use crate::config::BuildConfig;
use crate::generate::{self, GenerateError, GenerateResult};
use crate::process::{self, ProcessConfig, ProcessError};
use crate::scan::{self, ScanError};
use crate::types::{AssetDescriptor, SourceFile};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Result of a successful [`check`].
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub sources: Vec<SourceFile>,
    pub assets: Vec<AssetDescriptor>,
}

/// Result of a successful [`build`].
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub assets: Vec<AssetDescriptor>,
    pub output: GenerateResult,
}

/// Scan and compile every asset without writing anything.
pub fn check(config: &BuildConfig) -> Result<CheckReport, BuildError> {
    let sources = scan::scan(&config.sources, &config.exclude)?;
    let assets = process::process(&sources, &ProcessConfig::new(&config.index_file))?;
    Ok(CheckReport { sources, assets })
}

/// Run the full pipeline and write its outputs.
///
/// Nothing is written unless every source was read and compiled.
pub fn build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let sources = scan::scan(&config.sources, &config.exclude)?;
    build_sources(config, &sources)
}

/// Compile and write an already scanned source list.
pub fn build_sources(
    config: &BuildConfig,
    sources: &[SourceFile],
) -> Result<BuildReport, BuildError> {
    let assets = process::process(sources, &ProcessConfig::new(&config.index_file))?;
    let output = generate::generate(&assets, &config.sketch_dir, config.create_sketch)?;
    Ok(BuildReport { assets, output })
}
