//! Tool directory: category chips, search filtering and random picks.
//!
//! The built-in [`fallback_catalog`] is used whenever fewer than
//! [`RECOMMENDED_COUNT`] real cards are available.

use bevy::log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cards shown in the "recommended now" strip.
pub const RECOMMENDED_COUNT: usize = 6;

const SEO_SLUGS: [&str; 7] = [
    "word-counter-pro",
    "readability-analyzer",
    "keyword-density",
    "meta-tags",
    "title-description",
    "alt-text",
    "seo-outline",
];

/// `readability-analyzer` is also in [`SEO_SLUGS`], which wins.
const TEXT_SLUGS: [&str; 2] = ["word-counter", "readability-analyzer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Seo,
    Text,
    Dev,
    Creator,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Seo,
        Category::Text,
        Category::Dev,
        Category::Creator,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Seo => "seo",
            Category::Text => "text",
            Category::Dev => "dev",
            Category::Creator => "creator",
        }
    }
}

/// Active category chip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChipFilter {
    #[default]
    All,
    Only(Category),
}

impl ChipFilter {
    /// Parse a chip key or a URL hash such as `"#seo"`.  Unknown keys show
    /// everything.
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().trim_start_matches('#').to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .map_or(ChipFilter::All, ChipFilter::Only)
    }

    pub fn hash(self) -> String {
        match self {
            ChipFilter::All => "#all".to_string(),
            ChipFilter::Only(c) => format!("#{}", c.key()),
        }
    }

    pub fn accepts(self, category: Category) -> bool {
        match self {
            ChipFilter::All => true,
            ChipFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for ChipFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCard {
    pub slug: String,
    pub href: String,
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Overrides the slug lookup when set.
    #[serde(default)]
    pub category: Option<Category>,
    /// Extra search keywords.
    #[serde(default)]
    pub hay: String,
}

impl ToolCard {
    pub fn new(href: &str, icon: &str, title: &str, description: &str) -> Self {
        let href = normalize_href(href);
        Self {
            slug: slug_from_href(&href),
            href,
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: None,
            hay: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        resolve_category(self.category, &self.slug)
    }

    pub fn cta(&self) -> String {
        format!("Use {}", self.title)
    }

    fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || format!("{} {} {}", self.hay, self.title, self.description)
                .to_lowercase()
                .contains(term)
    }
}

/// Explicit category, else the slug sets, else [`Category::Dev`].
pub fn resolve_category(explicit: Option<Category>, slug: &str) -> Category {
    if let Some(c) = explicit {
        return c;
    }
    if SEO_SLUGS.contains(&slug) {
        Category::Seo
    } else if TEXT_SLUGS.contains(&slug) {
        Category::Text
    } else {
        Category::Dev
    }
}

/// Cards whose text contains `term` (trimmed, case-insensitive) and whose
/// category passes `chip`.
pub fn filter_cards<'a>(cards: &'a [ToolCard], term: &str, chip: ChipFilter) -> Vec<&'a ToolCard> {
    let term = term.trim().to_lowercase();
    cards
        .iter()
        .filter(|card| card.matches(&term) && chip.accepts(card.category()))
        .collect()
}

/// Rewrite a legacy `/tool/` prefix to `/tools/`.
pub fn normalize_href(href: &str) -> String {
    let href = href.trim();
    match href.strip_prefix("/tool/") {
        Some(rest) => format!("/tools/{rest}"),
        None => href.to_string(),
    }
}

fn slug_from_href(href: &str) -> String {
    href.trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn fallback_catalog() -> Vec<ToolCard> {
    [
        ("/tools/word-counter/", "🔢", "Word Counter", "Count words, characters, sentences, paragraphs and reading time."),
        ("/tools/word-counter-pro/", "✨", "Word Counter Pro", "Advanced stats: speaking time, section breakdown and keyword hints."),
        ("/tools/readability-analyzer/", "📚", "Readability Analyzer", "Readability score + clarity hints to improve scannability."),
        ("/tools/keyword-density/", "🎯", "Keyword Density", "Measure keyword frequency and spot overuse without stuffing."),
        ("/tools/meta-tags/", "🏷️", "Meta Tag Optimizer", "SERP preview + length checks to improve CTR."),
        ("/tools/json-formatter/", "🧾", "JSON Formatter", "Prettify/minify/validate JSON instantly for debugging."),
        ("/tools/url-encoder/", "🔗", "URL Encoder", "Encode/decode URLs and query strings safely."),
        ("/tools/base64/", "🔐", "Base64", "Encode/decode Base64 strings for tokens and payloads."),
        ("/tools/title-description/", "📝", "Title & Description", "Generate SEO title/description ideas aligned to intent."),
        ("/tools/alt-text/", "🖼️", "Alt Text Generator", "Accessibility-friendly alt text variants without spam."),
        ("/tools/seo-outline/", "🧠", "SEO Outline Helper", "Build H1/H2/H3 outline + FAQ ideas that match intent."),
    ]
    .into_iter()
    .map(|(href, icon, title, desc)| ToolCard::new(href, icon, title, desc))
    .collect()
}

/// The page's own cards (hrefs normalised) when there are enough of them,
/// otherwise [`fallback_catalog`].
pub fn build_catalog(cards: &[ToolCard]) -> Vec<ToolCard> {
    if cards.len() < RECOMMENDED_COUNT {
        debug!(
            "Only {} tool cards, using the built-in catalog",
            cards.len()
        );
        return fallback_catalog();
    }
    cards
        .iter()
        .map(|card| ToolCard {
            href: normalize_href(&card.href),
            ..card.clone()
        })
        .collect()
}

/// `n` distinct cards in random order, or `None` when the catalog is smaller
/// than `n`.
pub fn pick_recommended<'a, R: Rng + ?Sized>(
    catalog: &'a [ToolCard],
    n: usize,
    rng: &mut R,
) -> Option<Vec<&'a ToolCard>> {
    if catalog.len() < n {
        return None;
    }
    Some(
        rand::seq::index::sample(rng, catalog.len(), n)
            .into_iter()
            .map(|i| &catalog[i])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn fallback_has_eleven_tools_routes() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 11);
        assert!(catalog.iter().all(|c| c.href.starts_with("/tools/")));
        assert_eq!(catalog[0].slug, "word-counter");
        assert_eq!(catalog[0].cta(), "Use Word Counter");
    }

    #[test]
    fn categories_resolve_from_slug() {
        assert_eq!(resolve_category(None, "meta-tags"), Category::Seo);
        assert_eq!(resolve_category(None, "readability-analyzer"), Category::Seo);
        assert_eq!(resolve_category(None, "word-counter"), Category::Text);
        assert_eq!(resolve_category(None, "base64"), Category::Dev);
        assert_eq!(
            resolve_category(Some(Category::Creator), "base64"),
            Category::Creator
        );
    }

    #[test]
    fn chips_parse_keys_and_hashes() {
        assert_eq!(ChipFilter::parse("#SEO"), ChipFilter::Only(Category::Seo));
        assert_eq!(ChipFilter::parse("creator"), ChipFilter::Only(Category::Creator));
        assert_eq!(ChipFilter::parse("#all"), ChipFilter::All);
        assert_eq!(ChipFilter::parse("#faq"), ChipFilter::All);
        assert_eq!(ChipFilter::Only(Category::Dev).hash(), "#dev");
    }

    #[test]
    fn search_and_chip_combine() {
        let catalog = fallback_catalog();
        let json = filter_cards(&catalog, "  JSON ", ChipFilter::All);
        assert_eq!(json.len(), 1);
        assert_eq!(json[0].title, "JSON Formatter");

        let seo_count = filter_cards(&catalog, "", ChipFilter::Only(Category::Seo)).len();
        assert_eq!(seo_count, 7);
        assert!(filter_cards(&catalog, "json", ChipFilter::Only(Category::Seo)).is_empty());
    }

    #[test]
    fn legacy_hrefs_are_rewritten() {
        assert_eq!(normalize_href("/tool/base64/"), "/tools/base64/");
        assert_eq!(normalize_href("/tools/base64/"), "/tools/base64/");
        assert_eq!(normalize_href("https://x.io/tool/a"), "https://x.io/tool/a");

        let mut cards = fallback_catalog();
        cards[0].href = "/tool/word-counter/".into();
        assert_eq!(build_catalog(&cards)[0].href, "/tools/word-counter/");
        assert_eq!(build_catalog(&cards[..3]).len(), 11);
    }

    #[test]
    fn picks_are_distinct() {
        let catalog = fallback_catalog();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picks = pick_recommended(&catalog, RECOMMENDED_COUNT, &mut rng).expect("enough cards");
            let slugs: HashSet<_> = picks.iter().map(|c| c.slug.as_str()).collect();
            assert_eq!(slugs.len(), RECOMMENDED_COUNT);
        }
        assert!(pick_recommended(&catalog[..5], RECOMMENDED_COUNT, &mut rng).is_none());
    }
}
