//! Shared test utilities for the awot-static test suite.
//!
//! Provides a temp-site builder, gzip decoding, and helpers that pull chunk
//! bytes back out of rendered handlers so tests can check the generated
//! text against the original files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = write_site(&[("index.html", b"<h1>hi</h1>"), ("css/app.css", b"body{}")]);
//! let files = scan(tmp.path(), &[]).unwrap();
//! assert_eq!(relative_paths(&files), vec!["css/app.css", "index.html"]);
//! ```

use crate::compress::{MAX_CHUNK_SIZE, compress_asset};
use crate::encoding::parse_hex_literals;
use crate::naming;
use crate::types::{AssetDescriptor, Chunk, SourceFile};
use flate2::read::GzDecoder;
use std::io::Read;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding `files` (relative path, contents).
pub fn write_site(files: &[(&str, &[u8])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, data) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, data).unwrap();
    }
    tmp
}

/// Deterministic incompressible bytes (xorshift64).
pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Build a descriptor straight from bytes, bypassing the filesystem.
pub fn descriptor_from_bytes(relative_path: &str, is_index: bool, data: &[u8]) -> AssetDescriptor {
    let compressed = compress_asset(data, MAX_CHUNK_SIZE).unwrap();
    AssetDescriptor {
        identifier: naming::identifier(relative_path, is_index),
        url_path: naming::url_path(relative_path, is_index),
        relative_path: relative_path.to_string(),
        content_type: naming::content_type(relative_path),
        original_len: compressed.original_len,
        compressed_len: compressed.compressed_len,
        chunks: compressed.chunks,
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Relative paths of scanned files, in scan order.
pub fn relative_paths(files: &[SourceFile]) -> Vec<&str> {
    files.iter().map(|f| f.relative_path.as_str()).collect()
}

/// Concatenate chunk bytes in the order given.
pub fn concat_chunks(chunks: &[Chunk]) -> Vec<u8> {
    chunks.iter().flat_map(|c| c.bytes.iter().copied()).collect()
}

/// Decompress a gzip stream. Panics on malformed input.
pub fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

/// Parse the `P(<identifier>_<n>)` blocks of a rendered handler, in part order.
///
/// Panics if a block is unterminated or holds malformed hex.
pub fn extract_handler_chunks(text: &str, identifier: &str) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    for part in 1.. {
        let marker = format!("P({identifier}_{part}) = {{");
        let Some(start) = text.find(&marker) else {
            break;
        };
        let body_start = start + marker.len();
        let body_len = text[body_start..]
            .find("};")
            .unwrap_or_else(|| panic!("unterminated block {identifier}_{part}"));
        let body = &text[body_start..body_start + body_len];
        let bytes = parse_hex_literals(body)
            .unwrap_or_else(|| panic!("malformed hex in block {identifier}_{part}"));
        chunks.push(bytes);
    }
    chunks
}
