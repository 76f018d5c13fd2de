//! Browser-style text utilities from the site's tools section.
//!
//! Every tool is a pure function over `&str` so the same code backs the
//! `clickoz-tools` command line and the tests.

pub mod base64_codec;
pub mod entities;
pub mod json_formatter;
pub mod url_codec;
pub mod utm;
pub mod word_counter;
pub mod youtube_tags;

/// NBSP → space and CRLF → LF, the normalisation every tool applies first.
pub fn normalize_text(text: &str) -> String {
    text.replace('\u{00A0}', " ").replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_nbsp_and_crlf() {
        assert_eq!(normalize_text("a\u{00A0}b\r\nc"), "a b\nc");
    }
}
