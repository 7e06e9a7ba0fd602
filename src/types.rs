//! Shared types passed between pipeline stages.
//!
//! Stage 1 ([`scan`](crate::scan)) produces [`SourceFile`]s, stage 2
//! ([`process`](crate::process)) turns each into an [`AssetDescriptor`], and
//! stage 3 ([`generate`](crate::generate)) renders descriptors into text.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A regular file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Absolute (or root-joined) path used to read the file.
    pub path: PathBuf,
    /// Path relative to the source root, always `/`-separated.
    pub relative_path: String,
}

/// A contiguous slice of an asset's compressed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position within the asset.
    pub part: usize,
    pub bytes: Vec<u8>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything the emitters need to render one asset.
///
/// Invariant: `chunks` is non-empty and ordered by ascending `part`;
/// concatenating their bytes yields the full gzip stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Symbol used for the handler and its literal blocks.
    pub identifier: String,
    /// Route the handler is registered at. Empty for the index file.
    pub url_path: String,
    pub relative_path: String,
    pub content_type: String,
    /// Size of the source file before compression.
    pub original_len: usize,
    /// Total length of the gzip stream across all chunks.
    pub compressed_len: usize,
    pub chunks: Vec<Chunk>,
}

impl AssetDescriptor {
    pub fn is_index(&self) -> bool {
        self.url_path.is_empty()
    }
}

/// Which bootstrap program, if any, to emit next to `StaticFiles.h`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SketchMode {
    /// Emit only `StaticFiles.h`.
    #[default]
    No,
    /// Emit a sketch that joins a WiFi network.
    Wifi,
    /// Emit a sketch that brings up a wired Ethernet shield.
    Ethernet,
}

impl SketchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SketchMode::No => "no",
            SketchMode::Wifi => "wifi",
            SketchMode::Ethernet => "ethernet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sketch_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: SketchMode,
        }
        let w: Wrapper = toml::from_str(r#"mode = "ethernet""#).unwrap();
        assert_eq!(w.mode, SketchMode::Ethernet);
    }

    #[test]
    fn sketch_mode_rejects_unknown() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            mode: SketchMode,
        }
        assert!(toml::from_str::<Wrapper>(r#"mode = "bluetooth""#).is_err());
    }

    #[test]
    fn sketch_mode_as_str_roundtrips_through_serde() {
        for mode in [SketchMode::No, SketchMode::Wifi, SketchMode::Ethernet] {
            let value = toml::Value::try_from(mode).unwrap();
            assert_eq!(value.as_str(), Some(mode.as_str()));
        }
    }

    #[test]
    fn index_descriptor_has_empty_url() {
        let d = AssetDescriptor {
            identifier: "static_index".into(),
            url_path: String::new(),
            relative_path: "index.html".into(),
            content_type: "text/html; charset=utf-8".into(),
            original_len: 0,
            compressed_len: 0,
            chunks: vec![],
        };
        assert!(d.is_index());
    }
}
