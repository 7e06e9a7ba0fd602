//! Compression and chunking of asset payloads.
//!
//! Every asset is gzip-compressed at the default level and then cut into
//! slices no larger than [`MAX_CHUNK_SIZE`]. The bound comes from the AVR
//! toolchain: a single `PROGMEM` array cannot exceed 32767 bytes, so larger
//! payloads are emitted as several literal blocks written back to back.
//!
//! ## Empty payloads
//!
//! [`split_chunks`] maps a zero-length payload to zero chunks. That case
//! never reaches the emitters: a gzip stream always carries a 10-byte header
//! and an 8-byte trailer, so [`compress_asset`] always yields at least one
//! chunk, even for a zero-byte source file.

use crate::types::Chunk;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::{self, Write};

/// Largest literal block the target compiler accepts, in bytes.
pub const MAX_CHUNK_SIZE: usize = 32767;

/// Gzip-compressed bytes of one asset, split into literal-sized chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAsset {
    pub original_len: usize,
    pub compressed_len: usize,
    pub chunks: Vec<Chunk>,
}

/// Gzip `data` with default settings.
///
/// The header carries no file name and a zero mtime, so identical input
/// always produces identical output.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Split `bytes` into ordered slices of at most `max` bytes.
///
/// Parts are numbered from 1. Only the final chunk may be shorter than
/// `max`. An empty input yields no chunks.
pub fn split_chunks(bytes: &[u8], max: usize) -> Vec<Chunk> {
    assert!(max > 0, "chunk size must be non-zero");
    bytes
        .chunks(max)
        .enumerate()
        .map(|(i, slice)| Chunk {
            part: i + 1,
            bytes: slice.to_vec(),
        })
        .collect()
}

/// Compress a source payload and split it at `max_chunk`.
pub fn compress_asset(data: &[u8], max_chunk: usize) -> io::Result<CompressedAsset> {
    let zipped = gzip(data)?;
    let chunks = split_chunks(&zipped, max_chunk);
    debug_assert!(!chunks.is_empty(), "gzip output is never empty");
    Ok(CompressedAsset {
        original_len: data.len(),
        compressed_len: zipped.len(),
        chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{concat_chunks, gunzip, pseudo_random_bytes};

    #[test]
    fn gzip_is_deterministic() {
        let a = gzip(b"<h1>hi</h1>").unwrap();
        let b = gzip(b"<h1>hi</h1>").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gzip_has_magic_header() {
        let z = gzip(b"body{}").unwrap();
        assert_eq!(&z[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn gzip_of_empty_input_is_not_empty() {
        let z = gzip(b"").unwrap();
        assert!(z.len() >= 18);
        assert_eq!(gunzip(&z), b"");
    }

    #[test]
    fn split_empty_yields_no_chunks() {
        assert!(split_chunks(&[], MAX_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn split_exact_multiple() {
        let data = vec![7u8; 6];
        let chunks = split_chunks(&data, 3);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].part, 1);
        assert_eq!(chunks[1].part, 2);
        assert!(chunks.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn split_remainder_goes_last() {
        let data: Vec<u8> = (0..10).collect();
        let chunks = split_chunks(&data, 4);
        let lens: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![4, 4, 2]);
        assert_eq!(concat_chunks(&chunks), data);
    }

    #[test]
    fn split_single_short_chunk() {
        let chunks = split_chunks(b"abc", MAX_CHUNK_SIZE);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].bytes, b"abc");
    }

    #[test]
    fn zero_byte_source_yields_one_chunk() {
        let asset = compress_asset(b"", MAX_CHUNK_SIZE).unwrap();
        assert_eq!(asset.original_len, 0);
        assert_eq!(asset.chunks.len(), 1);
        assert_eq!(gunzip(&concat_chunks(&asset.chunks)), b"");
    }

    #[test]
    fn large_incompressible_source_spans_chunks() {
        let data = pseudo_random_bytes(100_000, 42);
        let asset = compress_asset(&data, MAX_CHUNK_SIZE).unwrap();

        assert!(asset.chunks.len() >= 4);
        let (last, rest) = asset.chunks.split_last().unwrap();
        assert!(rest.iter().all(|c| c.len() == MAX_CHUNK_SIZE));
        assert!(last.len() <= MAX_CHUNK_SIZE);
        assert_eq!(
            asset.chunks.iter().map(Chunk::len).sum::<usize>(),
            asset.compressed_len
        );
        assert_eq!(gunzip(&concat_chunks(&asset.chunks)), data);
    }
}
