//! Naming rules that map a source file to its generated symbol and route.
//!
//! All names derive from the file's path relative to the source root:
//!
//! | Relative path | Identifier | URL path |
//! |---------------|------------|----------|
//! | `index.html` (the index file) | `static_index` | `""` |
//! | `css/app.css` | `static_css_app_css` | `css/app.css` |
//! | `img/Logo-2x.PNG` | `static_img_logo_2x_png` | `img/Logo-2x.PNG` |
//!
//! Identifiers are lowercased and every character outside `[A-Za-z0-9_$]`
//! becomes `_`, so two different paths can collide (`a.b.js` and `a_b.js`).
//! Collisions are detected by [`process`](crate::process), not here.

use std::path::{Component, Path};

/// Identifier reserved for the index file.
pub const INDEX_IDENTIFIER: &str = "static_index";

const IDENTIFIER_PREFIX: &str = "static_";

/// Content type used when the extension is unknown.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Render `path` relative to `root` with `/` separators.
///
/// Returns `None` when `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Normalize a user-supplied index path for comparison with relative paths.
///
/// `./index.html`, `/index.html` and `.\index.html` all become `index.html`.
pub fn normalize_index_path(index_file: &str) -> String {
    let unified = index_file.replace('\\', "/");
    let mut s = unified.as_str();
    loop {
        if let Some(rest) = s.strip_prefix("./") {
            s = rest;
        } else if let Some(rest) = s.strip_prefix('/') {
            s = rest;
        } else {
            break;
        }
    }
    s.to_string()
}

/// Replace every character outside `[A-Za-z0-9_$]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Whether `s` is usable as a symbol in the generated code.
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Identifier for an asset; `is_index` selects the reserved name.
pub fn identifier(relative_path: &str, is_index: bool) -> String {
    if is_index {
        INDEX_IDENTIFIER.to_string()
    } else {
        format!("{}{}", IDENTIFIER_PREFIX, sanitize(&relative_path.to_lowercase()))
    }
}

/// Route an asset is served at: empty for the index file.
pub fn url_path(relative_path: &str, is_index: bool) -> String {
    if is_index {
        String::new()
    } else {
        relative_path.to_string()
    }
}

/// HTTP `Content-Type` for a file, inferred from its extension.
///
/// Textual types carry an explicit UTF-8 charset. Unknown extensions fall
/// back to [`FALLBACK_CONTENT_TYPE`].
pub fn content_type(relative_path: &str) -> String {
    let Some(mime) = mime_guess::from_path(relative_path).first() else {
        return FALLBACK_CONTENT_TYPE.to_string();
    };
    let essence = mime.essence_str();
    if needs_charset(&mime) {
        format!("{essence}; charset=utf-8")
    } else {
        essence.to_string()
    }
}

fn needs_charset(mime: &mime_guess::Mime) -> bool {
    if mime.type_() == mime_guess::mime::TEXT {
        return true;
    }
    matches!(
        mime.essence_str(),
        "application/javascript" | "application/json" | "application/xml"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn relative_path_nested() {
        let root = PathBuf::from("/site");
        let p = root.join("css").join("app.css");
        assert_eq!(relative_path(&root, &p).as_deref(), Some("css/app.css"));
    }

    #[test]
    fn relative_path_outside_root() {
        let root = PathBuf::from("/site");
        assert_eq!(relative_path(&root, Path::new("/other/a.css")), None);
    }

    #[test]
    fn normalize_strips_prefixes() {
        assert_eq!(normalize_index_path("./index.html"), "index.html");
        assert_eq!(normalize_index_path("/index.html"), "index.html");
        assert_eq!(normalize_index_path(".\\www\\index.html"), "www/index.html");
        assert_eq!(normalize_index_path("index.html"), "index.html");
    }

    #[test]
    fn identifier_for_index() {
        assert_eq!(identifier("index.html", true), "static_index");
    }

    #[test]
    fn identifier_for_nested_css() {
        assert_eq!(identifier("css/app.css", false), "static_css_app_css");
    }

    #[test]
    fn identifier_lowercases() {
        assert_eq!(identifier("img/Logo-2x.PNG", false), "static_img_logo_2x_png");
    }

    #[test]
    fn identifier_keeps_dollar_and_underscore() {
        assert_eq!(identifier("$lib/a_b.js", false), "static_$lib_a_b_js");
    }

    #[test]
    fn identifier_replaces_plus_and_spaces() {
        assert_eq!(identifier("a+b c.txt", false), "static_a_b_c_txt");
    }

    #[test]
    fn identifier_replaces_non_ascii_per_char() {
        assert_eq!(identifier("café.html", false), "static_caf__html");
    }

    #[test]
    fn colliding_paths_share_identifier() {
        assert_eq!(identifier("a.b.js", false), identifier("a_b.js", false));
    }

    #[test]
    fn identifiers_are_valid() {
        for path in ["index.html", "css/app.css", "weird name!.@#", "ü/ñ", "-"] {
            assert!(is_valid_identifier(&identifier(path, false)), "{path}");
        }
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("a-b"));
    }

    #[test]
    fn url_path_rules() {
        assert_eq!(url_path("index.html", true), "");
        assert_eq!(url_path("css/app.css", false), "css/app.css");
    }

    #[test]
    fn content_type_html_has_charset() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
    }

    #[test]
    fn content_type_css_has_charset() {
        assert_eq!(content_type("css/app.css"), "text/css; charset=utf-8");
    }

    #[test]
    fn content_type_png_has_no_charset() {
        assert_eq!(content_type("img/logo.png"), "image/png");
    }

    #[test]
    fn content_type_json_has_charset() {
        assert_eq!(content_type("data.json"), "application/json; charset=utf-8");
    }

    #[test]
    fn content_type_unknown_falls_back() {
        assert_eq!(content_type("firmware.zzqx"), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type("LICENSE"), FALLBACK_CONTENT_TYPE);
    }
}
