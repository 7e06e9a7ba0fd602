//! Text rendering of the generated C++ sources.
//!
//! | Module | Output |
//! |--------|--------|
//! | [`asset`] | One handler per asset: literal blocks + response writes |
//! | [`router`] | `ServeStatic()`, binding each handler to its route |
//! | [`sketch`] | Optional `.ino` program that brings up networking |
//!
//! Renderers are pure functions from descriptors to `String`; all file
//! I/O lives in [`generate`](crate::generate).

pub mod asset;
pub mod router;
pub mod sketch;

pub use asset::render_asset;
pub use router::render_router;
pub use sketch::render_sketch;

/// First line of every generated header.
pub const HEADER_BANNER: &str = "// Generated by awot-static. Do not edit: changes are overwritten on the next build.";

/// Render the complete `StaticFiles.h` text.
///
/// Handlers are separated by a blank line and followed by the router.
pub fn render_static_files(assets: &[crate::types::AssetDescriptor]) -> String {
    let handlers: Vec<String> = assets.iter().map(render_asset).collect();
    format!(
        "{}\n\n{}{}\n",
        HEADER_BANNER,
        handlers.join("\n\n"),
        render_router(assets)
    )
}

/// Escape a string for use inside a C string literal.
pub(crate) fn c_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
