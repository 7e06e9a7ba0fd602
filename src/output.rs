//! CLI output formatting for all pipeline stages.
//!
//! Each asset is shown by its route first, with the generated symbol and
//! source file as indented context, so the listing reads like the route
//! table the device will serve.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sources (static/)
//! 001 css/app.css
//! 002 index.html
//! ```
//!
//! ## Build / Check
//!
//! ```text
//! Assets
//! 001 /css/app.css → static_css_app_css
//!     text/css; charset=utf-8, 6 B → 26 B (1 chunk)
//! 002 / → static_index
//!     Source: index.html
//!     text/html; charset=utf-8, 11 B → 31 B (1 chunk)
//!
//! Wrote sketch/StaticFiles.h (2.1 KiB, sha256 3f2a9c1e0b7d)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{GenerateResult, GeneratedFile};
use crate::types::{AssetDescriptor, SourceFile};
use std::path::Path;

/// Characters of the content hash shown in summaries.
const SHORT_HASH_LEN: usize = 12;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count: `512 B`, `2.1 KiB`, `1.4 MiB`.
fn format_bytes(n: usize) -> String {
    const KIB: f64 = 1024.0;
    let f = n as f64;
    if f < KIB {
        format!("{} B", n)
    } else if f < KIB * KIB {
        format!("{:.1} KiB", f / KIB)
    } else {
        format!("{:.1} MiB", f / (KIB * KIB))
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn display_route(url_path: &str) -> String {
    format!("/{}", url_path)
}

// ============================================================================
// Scan
// ============================================================================

/// Format the list of files that would be embedded.
pub fn format_scan_output(files: &[SourceFile], source_root: &Path) -> Vec<String> {
    let mut lines = vec![format!("Sources ({}/)", source_root.display())];
    if files.is_empty() {
        lines.push("    (no files)".to_string());
    }
    for (i, file) in files.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), file.relative_path));
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(files: &[SourceFile], source_root: &Path) {
    for line in format_scan_output(files, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Format the compiled assets as a route listing.
///
/// The source line is shown only when it differs from the route, which in
/// practice means the index file.
pub fn format_assets(assets: &[AssetDescriptor]) -> Vec<String> {
    let mut lines = vec!["Assets".to_string()];
    for (i, asset) in assets.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            display_route(&asset.url_path),
            asset.identifier
        ));
        if asset.url_path != asset.relative_path {
            lines.push(format!("    Source: {}", asset.relative_path));
        }
        lines.push(format!(
            "    {}, {} \u{2192} {} ({})",
            asset.content_type,
            format_bytes(asset.original_len),
            format_bytes(asset.compressed_len),
            plural(asset.chunks.len(), "chunk")
        ));
    }
    if !assets.iter().any(AssetDescriptor::is_index) {
        lines.push("    (no index file: nothing is served at /)".to_string());
    }
    lines
}

/// Format the totals line shared by `check` and `build`.
pub fn format_totals(assets: &[AssetDescriptor]) -> String {
    let original: usize = assets.iter().map(|a| a.original_len).sum();
    let compressed: usize = assets.iter().map(|a| a.compressed_len).sum();
    let chunks: usize = assets.iter().map(|a| a.chunks.len()).sum();
    format!(
        "{}, {} \u{2192} {} gzipped, {}",
        plural(assets.len(), "asset"),
        format_bytes(original),
        format_bytes(compressed),
        plural(chunks, "chunk")
    )
}

fn format_written(file: &GeneratedFile) -> String {
    let short = &file.sha256[..SHORT_HASH_LEN.min(file.sha256.len())];
    format!(
        "Wrote {} ({}, sha256 {})",
        file.path.display(),
        format_bytes(file.bytes),
        short
    )
}

/// Format the summary of a completed build.
pub fn format_build_output(assets: &[AssetDescriptor], result: &GenerateResult) -> Vec<String> {
    let mut lines = format_assets(assets);
    lines.push(String::new());
    lines.push(format_written(&result.static_files));
    if let Some(ref sketch) = result.sketch {
        lines.push(format_written(sketch));
    }
    lines.push(format_totals(assets));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(assets: &[AssetDescriptor], result: &GenerateResult) {
    for line in format_build_output(assets, result) {
        println!("{}", line);
    }
}

/// Print check output to stdout.
pub fn print_check_output(assets: &[AssetDescriptor]) {
    for line in format_assets(assets) {
        println!("{}", line);
    }
    println!();
    println!("{}", format_totals(assets));
}
