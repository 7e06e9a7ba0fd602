//! Build configuration.
//!
//! Options are resolved in three layers, each overriding the previous:
//!
//! 1. Stock defaults ([`BuildConfig::default`])
//! 2. `awot-static.toml` in the working directory (or the file given with `--config`)
//! 3. Command-line flags
//!
//! Layers are merged as TOML tables with [`merge_toml`], then deserialized
//! and validated once. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! sources = "static"         # Directory of files to embed
//! exclude = []               # Glob patterns to skip (e.g. ["*.map", ".*"])
//! index_file = "index.html"  # Served at the root URL ""
//! sketch_dir = "sketch"      # Where StaticFiles.h (and the sketch) are written
//! create_sketch = "no"       # no | wifi | ethernet
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```

use crate::types::SketchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "awot-static.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root directory to scan for assets.
    pub sources: PathBuf,
    /// Glob patterns for files or directories to skip.
    pub exclude: Vec<String>,
    /// Path (relative to `sources`) served at the root URL.
    pub index_file: String,
    /// Output directory for generated files.
    pub sketch_dir: PathBuf,
    /// Which bootstrap program to emit, if any.
    pub create_sketch: SketchMode,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("static"),
            exclude: Vec::new(),
            index_file: "index.html".to_string(),
            sketch_dir: PathBuf::from("sketch"),
            create_sketch: SketchMode::No,
            processing: ProcessingConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.as_os_str().is_empty() {
            return Err(ConfigError::Validation("sources must not be empty".into()));
        }
        if self.sketch_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sketch_dir must not be empty".into(),
            ));
        }
        if self.index_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "index_file must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel compression workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Values supplied on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sources: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub index_file: Option<String>,
    pub sketch_dir: Option<PathBuf>,
    pub create_sketch: Option<SketchMode>,
}

impl CliOverrides {
    /// Render the overrides as a sparse TOML table.
    ///
    /// `exclude` patterns replace the configured list when any are given.
    pub fn to_toml(&self) -> toml::Value {
        let mut table = toml::map::Map::new();
        if let Some(ref s) = self.sources {
            table.insert("sources".into(), path_value(s));
        }
        if !self.exclude.is_empty() {
            let list = self
                .exclude
                .iter()
                .map(|p| toml::Value::String(p.clone()))
                .collect();
            table.insert("exclude".into(), toml::Value::Array(list));
        }
        if let Some(ref i) = self.index_file {
            table.insert("index_file".into(), toml::Value::String(i.clone()));
        }
        if let Some(ref d) = self.sketch_dir {
            table.insert("sketch_dir".into(), path_value(d));
        }
        if let Some(mode) = self.create_sketch {
            table.insert(
                "create_sketch".into(),
                toml::Value::String(mode.as_str().into()),
            );
        }
        toml::Value::Table(table)
    }
}

fn path_value(path: &Path) -> toml::Value {
    toml::Value::String(path.to_string_lossy().into_owned())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    // `processing.max_processes` is `None` by default and serializes as an
    // absent key, so the table always round-trips.
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge all layers, then deserialize and validate.
pub fn resolve_config(
    file: Option<toml::Value>,
    cli: &CliOverrides,
) -> Result<BuildConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    if let Some(file) = file {
        merged = merge_toml(merged, file);
    }
    merged = merge_toml(merged, cli.to_toml());
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` (if present) and apply CLI overrides.
///
/// An explicitly requested file that does not exist is an error; the
/// implicit `awot-static.toml` is optional.
pub fn load_config(
    path: Option<&Path>,
    cli: &CliOverrides,
) -> Result<BuildConfig, ConfigError> {
    let raw = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::Validation(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            load_raw_config(p)?
        }
        None => load_raw_config(Path::new(CONFIG_FILENAME))?,
    };
    resolve_config(raw, cli)
}

/// Returns a fully-commented stock `awot-static.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# awot-static configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory of files to embed.
sources = "static"

# Glob patterns for files or directories to skip. A pattern matches either
# the path relative to `sources` or the bare file/directory name.
# Example: exclude = ["*.map", ".*", "drafts/**"]
exclude = []

# File (relative to `sources`) served at the root URL "".
index_file = "index.html"

# Output directory for StaticFiles.h and the optional sketch.
sketch_dir = "sketch"

# Bootstrap sketch to generate next to StaticFiles.h: "no", "wifi" or "ethernet".
create_sketch = "no"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel compression workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
