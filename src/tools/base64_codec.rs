//! Base64 / Base64URL encoding and decoding, plus a JWT peek.

use super::json_formatter::prettify_if_json;
use super::normalize_text;
use crate::error::{ClickozError, ClickozResult};
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Keep trailing `=`; ignored for URL-safe output, which never pads.
    pub pad: bool,
    /// Use the `-`/`_` alphabet.
    pub url_safe: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pad: true,
            url_safe: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub output: String,
    /// Input looked like a hex dump and was encoded as raw bytes.
    pub hex_detected: bool,
    pub bytes_in: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// UTF-8 text (lossy), pretty-printed when it is JSON.
    pub text: String,
    pub is_json: bool,
    pub url_safe: bool,
    pub bytes_out: usize,
}

/// Header and payload of a three-part token; `None` where a part is not
/// valid Base64URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtParts {
    pub header: Option<String>,
    pub payload: Option<String>,
    pub signature: String,
}

impl JwtParts {
    pub fn looks_valid(&self) -> bool {
        self.header.is_some() && self.payload.is_some()
    }
}

pub fn encode(input: &str, options: EncodeOptions) -> ClickozResult<Encoded> {
    let t = normalize_text(input);
    let raw = t.trim();
    if raw.is_empty() {
        return Err(ClickozError::EmptyInput { tool: "base64" });
    }

    let (bytes, hex_detected) = match hex_bytes(raw) {
        Some(bytes) => (bytes, true),
        None => (raw.as_bytes().to_vec(), false),
    };
    let output = if options.url_safe {
        URL_SAFE_NO_PAD.encode(&bytes)
    } else if options.pad {
        STANDARD.encode(&bytes)
    } else {
        STANDARD_NO_PAD.encode(&bytes)
    };
    Ok(Encoded {
        output,
        hex_detected,
        bytes_in: bytes.len(),
    })
}

/// Decode Base64 or Base64URL, with or without padding.  Whitespace anywhere
/// in the input is ignored.
pub fn decode(input: &str) -> ClickozResult<Decoded> {
    let compact = compact(input);
    if compact.is_empty() {
        return Err(ClickozError::EmptyInput { tool: "base64" });
    }

    let url_safe = compact.contains(['-', '_']) && !compact.contains(['+', '/']);
    let bytes = decode_bytes(&compact)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let (text, is_json) = match prettify_if_json(&text) {
        Some(pretty) => (pretty, true),
        None => (text, false),
    };
    Ok(Decoded {
        text,
        is_json,
        url_safe,
        bytes_out: bytes.len(),
    })
}

/// Split a `header.payload.signature` token and decode the first two parts.
pub fn inspect_jwt(token: &str) -> Option<JwtParts> {
    let compact = compact(token);
    let mut parts = compact.split('.');
    let (header, payload, signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let decode_part = |part: &str| {
        let bytes = decode_bytes(part).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        Some(prettify_if_json(&text).unwrap_or(text))
    };
    Some(JwtParts {
        header: decode_part(header),
        payload: decode_part(payload),
        signature: signature.to_string(),
    })
}

fn compact(input: &str) -> String {
    normalize_text(input)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Map either alphabet onto the standard one, restore padding, decode.
fn decode_bytes(b64: &str) -> ClickozResult<Vec<u8>> {
    let mut standard: String = b64
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let rem = standard.len() % 4;
    if rem != 0 {
        standard.push_str(&"=".repeat(4 - rem));
    }
    STANDARD
        .decode(standard.as_bytes())
        .map_err(|e| ClickozError::InvalidBase64(e.to_string()))
}

/// Even-length hex (whitespace ignored) becomes raw bytes.
fn hex_bytes(text: &str) -> Option<Vec<u8>> {
    let hex: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if hex.len() < 2 || hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
