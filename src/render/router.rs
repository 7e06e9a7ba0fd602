//! Route table rendering.
//!
//! ```cpp
//! void ServeStatic(WebApp* app) {
//!   app->get("", &static_index);
//!   app->get("css/app.css", &static_css_app_css);
//! }
//! ```
//!
//! Two handlers registered for the same path would silently shadow each
//! other on the device. [`duplicate_routes`] reports them so
//! [`generate`](crate::generate) can refuse the run before rendering.

use super::c_string_escape;
use crate::types::AssetDescriptor;
use std::collections::BTreeMap;

/// Name of the generated registration function.
pub const ROUTER_FUNCTION: &str = "ServeStatic";

/// Find URL paths registered by more than one asset.
///
/// Returns `(url_path, relative paths)` for each duplicate, sorted by URL.
pub fn duplicate_routes(assets: &[AssetDescriptor]) -> Vec<(String, Vec<String>)> {
    let mut by_url: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for asset in assets {
        by_url
            .entry(asset.url_path.as_str())
            .or_default()
            .push(asset.relative_path.clone());
    }
    by_url
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(url, sources)| (url.to_string(), sources))
        .collect()
}

/// Render the registration function binding every asset to its route.
pub fn render_router(assets: &[AssetDescriptor]) -> String {
    let routes: Vec<String> = assets
        .iter()
        .map(|a| {
            format!(
                "  app->get(\"{}\", &{});",
                c_string_escape(&a.url_path),
                a.identifier
            )
        })
        .collect();
    format!(
        "\n\nvoid {}(WebApp* app) {{\n{}\n}}",
        ROUTER_FUNCTION,
        routes.join("\n")
    )
}
