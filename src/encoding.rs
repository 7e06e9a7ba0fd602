//! Textual encoding of chunk bytes as C array initializers.
//!
//! Bytes are written as ` 0xhh` tokens joined by commas, and the resulting
//! text is cut every [`LINE_WRAP_WIDTH`] characters:
//!
//! ```text
//!  0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xb3, 0xc9,
//!  0x30, 0xb4, 0xcb, 0xc8, 0xb4, 0xd1, 0x07, 0x52, 0x00, 0x45, 0x60, 0x2e
//! ```
//!
//! Every token after the first is six characters wide, so lines break
//! right after a comma. Wrapping only affects layout; the bytes in a block
//! are exactly the bytes of one [`Chunk`](crate::types::Chunk).

use std::fmt::Write;

/// Maximum characters of hex-literal text per rendered line.
pub const LINE_WRAP_WIDTH: usize = 72;

/// Render `bytes` as comma-separated hex literals wrapped at `width`.
///
/// Returns the lines without indentation or line terminators.
pub fn hex_literal_lines(bytes: &[u8], width: usize) -> Vec<String> {
    assert!(width > 0, "wrap width must be non-zero");
    let mut text = String::with_capacity(bytes.len() * 6);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        // Writing to a String cannot fail.
        let _ = write!(text, " 0x{b:02x}");
    }

    // The text is pure ASCII, so byte offsets are char boundaries.
    text.as_bytes()
        .chunks(width)
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}

/// Parse hex literals back out of rendered text.
///
/// Accepts anything [`hex_literal_lines`] produces, ignoring whitespace,
/// commas and line breaks. Returns `None` on a malformed token.
pub fn parse_hex_literals(text: &str) -> Option<Vec<u8>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            let digits = t.strip_prefix("0x")?;
            u8::from_str_radix(digits, 16).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte() {
        assert_eq!(hex_literal_lines(&[0x1f], LINE_WRAP_WIDTH), vec![" 0x1f"]);
    }

    #[test]
    fn tokens_are_comma_joined() {
        assert_eq!(
            hex_literal_lines(&[0x00, 0xab, 0xff], LINE_WRAP_WIDTH),
            vec![" 0x00, 0xab, 0xff"]
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(hex_literal_lines(&[], LINE_WRAP_WIDTH).is_empty());
    }

    #[test]
    fn lines_never_exceed_width() {
        let bytes: Vec<u8> = (0..=255).collect();
        let lines = hex_literal_lines(&bytes, LINE_WRAP_WIDTH);
        assert!(lines.iter().all(|l| l.len() <= LINE_WRAP_WIDTH));
        assert!(lines[..lines.len() - 1].iter().all(|l| l.len() == LINE_WRAP_WIDTH));
    }

    #[test]
    fn full_lines_hold_twelve_bytes_and_end_with_comma() {
        let bytes = vec![0xaa; 30];
        let lines = hex_literal_lines(&bytes, LINE_WRAP_WIDTH);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(','));
        assert!(lines[1].starts_with(" 0xaa"));
        assert_eq!(lines[1].matches("0x").count(), 12);
        assert!(!lines[2].ends_with(','));
    }

    #[test]
    fn parse_inverts_render() {
        let bytes: Vec<u8> = (0..200u16).map(|i| (i * 7 % 256) as u8).collect();
        let text = hex_literal_lines(&bytes, LINE_WRAP_WIDTH).join("\n   ");
        assert_eq!(parse_hex_literals(&text), Some(bytes));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_hex_literals(" 0x1f, 0xzz"), None);
        assert_eq!(parse_hex_literals(" 1f"), None);
    }
}
