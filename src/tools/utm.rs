//! Campaign-tagged links: normalise `utm_*` values and merge them into a URL.
//!
//! Only the five `utm_*` keys are rewritten.  Every other query pair and the
//! fragment come through byte-for-byte.

use crate::error::{ClickozError, ClickozResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)[a-z][a-z0-9+.-]*://").expect("static regex"));
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\-_.~ ]").expect("static regex"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("static regex"));

/// Lowercase, `&` → `and`, drop anything outside letters/digits/`-_.~`,
/// spaces → `-`, collapse and trim hyphens.
pub fn normalize_utm_value(value: &str) -> String {
    let t = collapse_spaces(value);
    if t.is_empty() {
        return String::new();
    }
    let lowered = t.to_lowercase().replace('&', "and");
    let kept = UNSAFE_CHARS.replace_all(&lowered, "");
    let hyphenated = collapse_spaces(&kept).replace(' ', "-");
    HYPHEN_RUNS
        .replace_all(&hyphenated, "-")
        .trim_matches('-')
        .to_string()
}

/// Prefix `https://` unless the text already names a scheme.
pub fn ensure_protocol(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() || SCHEME.is_match(t) {
        return t.to_string();
    }
    format!("https://{}", t.trim_start_matches('/'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtmPreset {
    Youtube,
    Instagram,
    Tiktok,
    Newsletter,
    Ads,
}

impl UtmPreset {
    pub const ALL: [UtmPreset; 5] = [
        UtmPreset::Youtube,
        UtmPreset::Instagram,
        UtmPreset::Tiktok,
        UtmPreset::Newsletter,
        UtmPreset::Ads,
    ];

    pub fn key(self) -> &'static str {
        match self {
            UtmPreset::Youtube => "youtube",
            UtmPreset::Instagram => "instagram",
            UtmPreset::Tiktok => "tiktok",
            UtmPreset::Newsletter => "newsletter",
            UtmPreset::Ads => "ads",
        }
    }

    /// Source, medium and content; campaign and term are always left to the user.
    fn values(self) -> (&'static str, &'static str, &'static str) {
        match self {
            UtmPreset::Youtube => ("youtube", "video", "description"),
            UtmPreset::Instagram => ("instagram", "social", "bio"),
            UtmPreset::Tiktok => ("tiktok", "social", "profile"),
            UtmPreset::Newsletter => ("newsletter", "email", "cta"),
            UtmPreset::Ads => ("google", "cpc", "ad-variant-a"),
        }
    }
}

impl FromStr for UtmPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown preset '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub term: String,
    pub content: String,
}

impl UtmParams {
    /// Fill blank fields from `preset`; non-blank fields are kept.
    pub fn apply_preset(&mut self, preset: UtmPreset) {
        let (source, medium, content) = preset.values();
        for (field, value) in [
            (&mut self.source, source),
            (&mut self.medium, medium),
            (&mut self.content, content),
        ] {
            if field.trim().is_empty() {
                *field = value.to_string();
            }
        }
    }

    /// `(key, normalised value)` in canonical key order; blank values are empty.
    pub fn normalized(&self) -> [(&'static str, String); 5] {
        [
            (UTM_KEYS[0], normalize_utm_value(&self.source)),
            (UTM_KEYS[1], normalize_utm_value(&self.medium)),
            (UTM_KEYS[2], normalize_utm_value(&self.campaign)),
            (UTM_KEYS[3], normalize_utm_value(&self.term)),
            (UTM_KEYS[4], normalize_utm_value(&self.content)),
        ]
    }
}

/// A built link plus the preview fields shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtmLink {
    pub url: String,
    pub host: String,
    pub path: String,
    pub utm_count: usize,
}

/// Merge `params` into `base`: non-blank values replace any existing key,
/// blank values remove it.
pub fn build_utm_url(base: &str, params: &UtmParams) -> ClickozResult<UtmLink> {
    let mut url = SplitUrl::parse(&collapse_spaces(base))?;
    for (key, value) in params.normalized() {
        if value.is_empty() {
            url.delete(key);
        } else {
            url.set(key, &value);
        }
    }
    Ok(UtmLink {
        utm_count: url.utm_count(),
        host: url.authority.clone(),
        path: url.path.clone(),
        url: url.to_string(),
    })
}

/// Number of `utm_*` keys with a non-empty value.
pub fn count_utm_params(url: &str) -> ClickozResult<usize> {
    Ok(SplitUrl::parse(url)?.utm_count())
}

/// `utm_key=value` lines for the keys present on `url`, in canonical order.
pub fn params_text(url: &str) -> ClickozResult<String> {
    let url = SplitUrl::parse(url)?;
    let rows: Vec<String> = UTM_KEYS
        .iter()
        .filter_map(|key| {
            url.get(key)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{key}={v}"))
        })
        .collect();
    Ok(rows.join("\n"))
}

/// `scheme://authority/path?query#fragment` with raw query pairs.
#[derive(Debug, Clone)]
struct SplitUrl {
    scheme: String,
    authority: String,
    path: String,
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

impl SplitUrl {
    fn parse(raw: &str) -> ClickozResult<Self> {
        let fixed = ensure_protocol(raw);
        if fixed.is_empty() {
            return Err(ClickozError::EmptyInput {
                tool: "utm-builder",
            });
        }
        let invalid = || ClickozError::InvalidUrl(raw.trim().to_string());

        let (scheme, rest) = fixed.split_once("://").ok_or_else(invalid)?;
        let (rest, fragment) = match rest.split_once('#') {
            Some((before, frag)) => (before, Some(frag.to_string())),
            None => (rest, None),
        };
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if authority.is_empty() || authority.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_ascii_lowercase(),
            path: if path.is_empty() { "/" } else { path }.to_string(),
            query,
            fragment,
        })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` pair in place and drop later duplicates, or
    /// append when absent.
    fn set(&mut self, key: &str, value: &str) {
        let encoded = form_encode(value);
        match self.query.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.query[first].1 = encoded;
                let mut idx = 0;
                self.query.retain(|(k, _)| {
                    let keep = idx <= first || k != key;
                    idx += 1;
                    keep
                });
            }
            None => self.query.push((key.to_string(), encoded)),
        }
    }

    fn delete(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }

    fn utm_count(&self) -> usize {
        UTM_KEYS
            .iter()
            .filter(|key| self.get(key).is_some_and(|v| !v.is_empty()))
            .count()
    }
}

impl fmt::Display for SplitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            if v.is_empty() {
                write!(f, "{sep}{k}")?;
            } else {
                write!(f, "{sep}{k}={v}")?;
            }
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

fn collapse_spaces(text: &str) -> String {
    text.replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `application/x-www-form-urlencoded` byte encoding.
fn form_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(source: &str, medium: &str, campaign: &str) -> UtmParams {
        UtmParams {
            source: source.into(),
            medium: medium.into(),
            campaign: campaign.into(),
            ..Default::default()
        }
    }

    #[test]
    fn values_are_slugged() {
        assert_eq!(normalize_utm_value("  Spring  Sale & Promo! "), "spring-sale-and-promo");
        assert_eq!(normalize_utm_value("--Été--2025--"), "été-2025");
        assert_eq!(normalize_utm_value("a/b?c"), "abc");
        assert_eq!(normalize_utm_value("   "), "");
    }

    #[test]
    fn protocol_is_added_once() {
        assert_eq!(ensure_protocol("clickoz.com/tools/"), "https://clickoz.com/tools/");
        assert_eq!(ensure_protocol("//clickoz.com"), "https://clickoz.com");
        assert_eq!(ensure_protocol("HTTP://x.io"), "HTTP://x.io");
        assert_eq!(ensure_protocol("ftp://files.io/a"), "ftp://files.io/a");
        assert_eq!(ensure_protocol("  "), "");
    }

    #[test]
    fn builds_url_with_root_path() {
        let link = build_utm_url("Clickoz.com", &params("Newsletter", "email", "Jan Update"))
            .expect("valid url");
        assert_eq!(
            link.url,
            "https://clickoz.com/?utm_source=newsletter&utm_medium=email&utm_campaign=jan-update"
        );
        assert_eq!(link.host, "clickoz.com");
        assert_eq!(link.path, "/");
        assert_eq!(link.utm_count, 3);
    }

    #[test]
    fn keeps_other_params_and_fragment() {
        let link = build_utm_url(
            "https://clickoz.com/tools/?ref=a%20b&utm_source=old&utm_term=x#top",
            &params("youtube", "video", ""),
        )
        .expect("valid url");
        assert_eq!(
            link.url,
            "https://clickoz.com/tools/?ref=a%20b&utm_source=youtube&utm_medium=video#top"
        );
        assert_eq!(link.utm_count, 2);
    }

    #[test]
    fn duplicate_keys_collapse_to_first_position() {
        let link = build_utm_url(
            "https://x.io/?utm_source=a&k=1&utm_source=b",
            &params("c", "", ""),
        )
        .expect("valid url");
        assert_eq!(link.url, "https://x.io/?utm_source=c&k=1");
    }

    #[test]
    fn unicode_values_are_percent_encoded() {
        let link = build_utm_url("https://x.io", &params("été", "", "")).expect("valid url");
        assert_eq!(link.url, "https://x.io/?utm_source=%C3%A9t%C3%A9");
    }

    #[test]
    fn presets_only_fill_blanks() {
        let mut p = UtmParams {
            source: "partner".into(),
            ..Default::default()
        };
        p.apply_preset(UtmPreset::Youtube);
        assert_eq!(p.source, "partner");
        assert_eq!(p.medium, "video");
        assert_eq!(p.content, "description");
        assert!(p.campaign.is_empty());
        assert_eq!("ads".parse::<UtmPreset>(), Ok(UtmPreset::Ads));
    }

    #[test]
    fn bad_urls_are_errors() {
        assert_eq!(
            build_utm_url("", &UtmParams::default()).unwrap_err(),
            ClickozError::EmptyInput {
                tool: "utm-builder"
            }
        );
        assert!(matches!(
            build_utm_url("https:///path", &UtmParams::default()),
            Err(ClickozError::InvalidUrl(_))
        ));
    }

    #[test]
    fn counts_and_lists_utm_params() {
        let url = "https://x.io/?utm_source=a&utm_medium=&utm_content=b&q=1";
        assert_eq!(count_utm_params(url), Ok(2));
        assert_eq!(
            params_text(url).expect("valid"),
            "utm_source=a\nutm_content=b"
        );
    }
}
