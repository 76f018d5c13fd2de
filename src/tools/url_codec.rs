//! Percent-encoding for whole strings and for query strings.
//!
//! Encoding follows the component rules browsers use: ASCII letters, digits
//! and `-_.!~*'()` pass through, everything else becomes `%XX` over its UTF-8
//! bytes.  Decoding never fails; malformed or non-UTF-8 escapes are kept as
//! written.

use super::normalize_text;
use crate::error::{ClickozError, ClickozResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PERCENT_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("static regex"));

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// Encode the whole input as one component.
    Encode,
    /// Decode every `%XX` escape.
    Decode,
    /// Re-encode query keys and values, keeping the base URL and fragment.
    Query,
}

impl UrlMode {
    pub const ALL: [UrlMode; 3] = [UrlMode::Encode, UrlMode::Decode, UrlMode::Query];

    pub fn key(self) -> &'static str {
        match self {
            UrlMode::Encode => "encode",
            UrlMode::Decode => "decode",
            UrlMode::Query => "query",
        }
    }

    /// Advice when the input looks like it wants the other direction.
    pub fn hint(self, input: &str) -> Option<&'static str> {
        match self {
            UrlMode::Encode if looks_encoded(input) && input.chars().count() > 4 => {
                Some("Looks already encoded. If you want the readable version, switch to decode.")
            }
            UrlMode::Decode if !looks_encoded(input) => Some(
                "No %XX sequences detected. If you meant to make it safe for URLs, switch to encode.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for UrlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for UrlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| format!("unknown mode '{s}'"))
    }
}

/// Run `mode` over normalised input.  Only blank input is an error.
pub fn transform(input: &str, mode: UrlMode, plus_as_space: bool) -> ClickozResult<String> {
    let text = normalize_text(input);
    if text.trim().is_empty() {
        return Err(ClickozError::EmptyInput { tool: "url-encoder" });
    }
    Ok(match mode {
        UrlMode::Encode => encode_component(&text),
        UrlMode::Decode => decode_with_plus(&text, plus_as_space),
        UrlMode::Query => encode_query_only(&text, plus_as_space),
    })
}

/// `true` when the text has a `%XX` escape or a `+`.
pub fn looks_encoded(text: &str) -> bool {
    PERCENT_ESCAPE.is_match(text) || text.contains('+')
}

/// Characters that usually break a query string when left raw: space,
/// quotes, `<>&=?#%+` and anything outside printable ASCII.
pub fn count_unsafe_chars(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            matches!(
                c,
                ' ' | '"' | '\'' | '<' | '>' | '&' | '=' | '?' | '#' | '%' | '+'
            ) || u32::from(c) > 0x7E
        })
        .count()
}

/// Non-empty `&`-separated pairs between the first `?` and the `#`.  Text
/// without a `?` is treated as a bare query.
pub fn count_query_pairs(text: &str) -> usize {
    let after = text.split('?').nth(1).unwrap_or(text);
    let query = after.split('#').next().unwrap_or_default();
    if query.trim().is_empty() {
        return 0;
    }
    query.split('&').filter(|p| !p.is_empty()).count()
}

/// Percent-encode everything outside the unreserved component set.
pub fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Decode runs of `%XX` escapes.  A run that is not valid UTF-8, and a `%`
/// not followed by two hex digits, are copied through unchanged.
pub fn safe_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let run_end = escape_run_end(bytes, i);
        if run_end > i {
            let decoded: Vec<u8> = bytes[i..run_end]
                .chunks(3)
                .filter_map(|esc| hex_value(esc[1]).zip(hex_value(esc[2])))
                .map(|(hi, lo)| (hi << 4) | lo)
                .collect();
            match String::from_utf8(decoded) {
                Ok(s) => out.push_str(&s),
                Err(_) => out.push_str(&text[i..run_end]),
            }
            i = run_end;
        } else {
            // Not an escape: copy one whole character.
            let ch = text[i..].chars().next().unwrap_or_default();
            out.push(ch);
            i += ch.len_utf8().max(1);
        }
    }
    out
}

/// [`safe_decode`], with `+` read as a space first when `plus_as_space`.
pub fn decode_with_plus(text: &str, plus_as_space: bool) -> String {
    if plus_as_space {
        safe_decode(&text.replace('+', " "))
    } else {
        safe_decode(text)
    }
}

/// Re-encode the keys and values of a URL's query, leaving the base and the
/// fragment as they are.
///
/// Each key and value is decoded before encoding, so existing escapes are not
/// doubled.  Input without a `?` is treated as a bare query and comes back
/// prefixed with `?`.  A blank query yields the base plus fragment.
pub fn encode_query_only(input: &str, plus_as_space: bool) -> String {
    let normalized = normalize_text(input);
    let raw = normalized.trim();
    if raw.is_empty() {
        return String::new();
    }

    let (rest, hash) = match raw.find('#') {
        Some(at) => raw.split_at(at),
        None => (raw, ""),
    };
    let (base, query) = match rest.find('?') {
        Some(at) => (&rest[..at], &rest[at + 1..]),
        None => ("", rest),
    };
    let query = query.trim_start_matches('&');

    if query.trim().is_empty() {
        return if base.is_empty() {
            raw.to_string()
        } else {
            format!("{base}{hash}")
        };
    }

    let encode_value = |part: &str| {
        let encoded = encode_component(&decode_with_plus(part, plus_as_space));
        if plus_as_space {
            encoded.replace("%20", "+")
        } else {
            encoded
        }
    };

    let pairs: Vec<String> = query
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={}", encode_value(key), encode_value(value)),
            None => encode_value(pair),
        })
        .collect();

    format!("{base}?{}{hash}", pairs.join("&"))
}

/// End of the run of well-formed `%XX` escapes starting at `start`.
fn escape_run_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start;
    while bytes.get(j) == Some(&b'%')
        && bytes.get(j + 1).copied().and_then(hex_value).is_some()
        && bytes.get(j + 2).copied().and_then(hex_value).is_some()
    {
        j += 3;
    }
    j
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
