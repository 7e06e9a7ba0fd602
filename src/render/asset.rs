//! Per-asset handler rendering.
//!
//! Each asset becomes one aWOT handler. Chunk data lives in `PROGMEM`
//! blocks declared with the `P()` macro and is streamed with `writeP`:
//!
//! ```cpp
//! void static_css_app_css (Request &req, Response &res) {
//!   P(static_css_app_css_1) = {
//!     0x1f, 0x8b, 0x08, 0x00, ...
//!   };
//!
//!   res.set("Content-Encoding", "gzip");
//!   res.success("text/css; charset=utf-8");
//!   res.writeP(static_css_app_css_1, 26);
//! }
//! ```

use super::c_string_escape;
use crate::encoding::{LINE_WRAP_WIDTH, hex_literal_lines};
use crate::types::{AssetDescriptor, Chunk};

/// Indentation of hex lines inside a literal block.
const DATA_INDENT: &str = "   ";

/// Name of the literal block holding `chunk`.
pub fn chunk_symbol(identifier: &str, chunk: &Chunk) -> String {
    format!("{}_{}", identifier, chunk.part)
}

fn render_block(identifier: &str, chunk: &Chunk) -> String {
    let mut out = format!("  P({}) = {{\n", chunk_symbol(identifier, chunk));
    for line in hex_literal_lines(&chunk.bytes, LINE_WRAP_WIDTH) {
        out.push_str(DATA_INDENT);
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("  };");
    out
}

/// Render the handler function for one asset.
pub fn render_asset(asset: &AssetDescriptor) -> String {
    let blocks: Vec<String> = asset
        .chunks
        .iter()
        .map(|chunk| render_block(&asset.identifier, chunk))
        .collect();
    let writes: Vec<String> = asset
        .chunks
        .iter()
        .map(|chunk| {
            format!(
                "  res.writeP({}, {});",
                chunk_symbol(&asset.identifier, chunk),
                chunk.len()
            )
        })
        .collect();

    format!(
        "void {id} (Request &req, Response &res) {{\n{blocks}\n\n  res.set(\"Content-Encoding\", \"gzip\");\n  res.success(\"{ct}\");\n{writes}\n}}",
        id = asset.identifier,
        blocks = blocks.join("\n"),
        ct = c_string_escape(&asset.content_type),
        writes = writes.join("\n"),
    )
}
