//! # awot-static
//!
//! Compiles a directory of static web assets into a C++ header for the
//! [aWOT](https://github.com/lasselukkari/aWOT) web server, so a
//! microcontroller can serve a web UI with no filesystem.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      static/   →  [SourceFile]        (filesystem → ordered file list)
//! 2. Process   sources   →  [AssetDescriptor]   (gzip + chunk + name, in parallel)
//! 3. Generate  assets    →  sketch/StaticFiles.h (+ optional sketch.ino)
//! ```
//!
//! Stages are plain functions over plain data. Stage 2 reads every file
//! before stage 3 renders anything, so a single unreadable source fails the
//! run with the previous output untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the source directory, applies exclude globs |
//! | [`process`] | Stage 2: compiles each source into an [`types::AssetDescriptor`] |
//! | [`generate`] | Stage 3: renders and atomically writes the outputs |
//! | [`pipeline`] | `build` and `check` runs across all stages |
//! | [`compress`] | Gzip and literal-sized chunking |
//! | [`naming`] | Identifier, route and content-type rules |
//! | [`encoding`] | Hex-literal rendering of chunk bytes |
//! | [`render`] | Handler, router and sketch templates |
//! | [`config`] | Layered `awot-static.toml` + CLI configuration |
//! | [`types`] | Data shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Gzip on the Wire
//!
//! Assets are stored gzip-compressed and served with
//! `Content-Encoding: gzip`; the browser inflates them. Flash is the
//! scarce resource on the device, and every browser accepts gzip.
//!
//! ## Two Separate Limits
//!
//! [`compress::MAX_CHUNK_SIZE`] (32767 bytes) bounds a single `PROGMEM`
//! array and therefore decides how many literal blocks an asset needs.
//! [`encoding::LINE_WRAP_WIDTH`] (72 characters) only controls how the
//! bytes are laid out on screen. They live in different modules so one
//! cannot be mistaken for the other.
//!
//! ## Fail on Collisions
//!
//! Identifiers are derived lossily from paths, so `a.b.js` and `a_b.js`
//! both map to `static_a_b_js`. Rather than emit a header that does not
//! compile, the run fails and names both files. Duplicate routes are
//! rejected the same way.

pub mod compress;
pub mod config;
pub mod encoding;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
