//! HTML entity encoding with presets, and decoding via `html-escape`.

use super::normalize_text;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#\d+|#x[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]+);").expect("static regex")
});

/// Readable named forms used when [`EntityOptions::named`] is on.
const NAMED_EXTRA: [(char, &str); 10] = [
    ('©', "&copy;"),
    ('®', "&reg;"),
    ('€', "&euro;"),
    ('£', "&pound;"),
    ('¥', "&yen;"),
    ('•', "&bull;"),
    ('…', "&hellip;"),
    ('–', "&ndash;"),
    ('—', "&mdash;"),
    ('™', "&trade;"),
];

/// `&`, `<` and `>` are always encoded; everything else is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityOptions {
    pub named: bool,
    pub quotes: bool,
    pub apostrophe: bool,
    /// Code points above 127 become `&#N;`.
    pub non_ascii: bool,
    /// When false, every space followed by another space becomes `&nbsp;`.
    pub keep_spaces: bool,
}

impl Default for EntityOptions {
    fn default() -> Self {
        EntityPreset::HtmlSafe.options()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPreset {
    HtmlSafe,
    TextOnly,
    Attributes,
    Unicode,
    Layout,
}

impl EntityPreset {
    pub const ALL: [EntityPreset; 5] = [
        EntityPreset::HtmlSafe,
        EntityPreset::TextOnly,
        EntityPreset::Attributes,
        EntityPreset::Unicode,
        EntityPreset::Layout,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EntityPreset::HtmlSafe => "html-safe",
            EntityPreset::TextOnly => "text-only",
            EntityPreset::Attributes => "attributes",
            EntityPreset::Unicode => "unicode",
            EntityPreset::Layout => "layout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityPreset::HtmlSafe => "HTML-safe (recommended)",
            EntityPreset::TextOnly => "Minimal (only < > &)",
            EntityPreset::Attributes => "Attributes (quotes on)",
            EntityPreset::Unicode => "Unicode to numeric",
            EntityPreset::Layout => "Layout-safe spaces (&nbsp;)",
        }
    }

    pub fn options(self) -> EntityOptions {
        let all_quotes = EntityOptions {
            named: true,
            quotes: true,
            apostrophe: true,
            non_ascii: false,
            keep_spaces: true,
        };
        match self {
            EntityPreset::HtmlSafe | EntityPreset::Attributes => all_quotes,
            EntityPreset::TextOnly => EntityOptions {
                named: false,
                quotes: false,
                apostrophe: false,
                ..all_quotes
            },
            EntityPreset::Unicode => EntityOptions {
                named: false,
                non_ascii: true,
                ..all_quotes
            },
            EntityPreset::Layout => EntityOptions {
                keep_spaces: false,
                ..all_quotes
            },
        }
    }
}

impl FromStr for EntityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown preset '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOutput {
    pub text: String,
    pub entity_count: usize,
}

impl EntityOutput {
    pub fn changed(&self, input: &str) -> bool {
        self.text != normalize_text(input)
    }
}

pub fn encode_entities(text: &str, options: EntityOptions) -> EntityOutput {
    let t = normalize_text(text);
    let mut out = String::with_capacity(t.len());
    let mut count = 0;

    let mut chars = t.chars().peekable();
    while let Some(ch) = chars.next() {
        let entity: Option<std::borrow::Cow<'static, str>> = match ch {
            '&' => Some("&amp;".into()),
            '<' => Some("&lt;".into()),
            '>' => Some("&gt;".into()),
            '"' if options.quotes => Some("&quot;".into()),
            '\'' if options.apostrophe => Some("&#39;".into()),
            '"' | '\'' => None,
            ' ' if !options.keep_spaces && chars.peek() == Some(&' ') => Some("&nbsp;".into()),
            ' ' => None,
            c if options.named && named_extra(c).is_some() => named_extra(c).map(Into::into),
            c if options.non_ascii && (c as u32) > 127 => Some(format!("&#{};", c as u32).into()),
            _ => None,
        };
        match entity {
            Some(e) => {
                out.push_str(&e);
                count += 1;
            }
            None => out.push(ch),
        }
    }

    EntityOutput {
        text: out,
        entity_count: count,
    }
}

/// Decode named and numeric entities.  Unknown `&name;` sequences are left
/// as written; the count is of entity-shaped sequences in the input.
pub fn decode_entities(text: &str) -> EntityOutput {
    let t = normalize_text(text);
    EntityOutput {
        entity_count: ENTITY.find_iter(&t).count(),
        text: html_escape::decode_html_entities(&t).into_owned(),
    }
}

fn named_extra(c: char) -> Option<&'static str> {
    NAMED_EXTRA
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_preset_only_touches_markup() {
        let out = encode_entities(
            r#"<a href="x">Tom & 'Jerry'</a>"#,
            EntityPreset::TextOnly.options(),
        );
        assert_eq!(out.text, r#"&lt;a href="x"&gt;Tom &amp; 'Jerry'&lt;/a&gt;"#);
        assert_eq!(out.entity_count, 5);
    }

    #[test]
    fn html_safe_encodes_quotes_and_named_extras() {
        let out = encode_entities(r#"© "a" 'b' — ok"#, EntityOptions::default());
        assert_eq!(out.text, "&copy; &quot;a&quot; &#39;b&#39; &mdash; ok");
        assert_eq!(out.entity_count, 6);
    }

    #[test]
    fn unicode_preset_uses_numeric_code_points() {
        let out = encode_entities("é😀©", EntityPreset::Unicode.options());
        assert_eq!(out.text, "&#233;&#128512;&#169;");
        assert_eq!(out.entity_count, 3);
    }

    #[test]
    fn layout_preset_converts_runs_of_spaces() {
        let out = encode_entities("a   b c", EntityPreset::Layout.options());
        assert_eq!(out.text, "a&nbsp;&nbsp; b c");
        assert_eq!(out.entity_count, 2);
    }

    #[test]
    fn decodes_named_and_numeric() {
        let out = decode_entities("&lt;b&gt; &amp;&#39;&#x41;&copy; &bogus; & plain");
        assert_eq!(out.text, "<b> &'A© &bogus; & plain");
        assert_eq!(out.entity_count, 7);
    }

    #[test]
    fn presets_parse_from_keys() {
        for preset in EntityPreset::ALL {
            assert_eq!(preset.key().parse::<EntityPreset>(), Ok(preset));
        }
        assert!("loud".parse::<EntityPreset>().is_err());
    }

    #[test]
    fn changed_compares_normalised_input() {
        let input = "plain text";
        assert!(!encode_entities(input, EntityOptions::default()).changed(input));
        assert!(encode_entities("a<b", EntityOptions::default()).changed("a<b"));
    }
}
