//! Video title scoring and tag suggestions.
//!
//! Tags come in three groups, merged in order and de-duplicated
//! case-insensitively: the primary keyword and its 2/3-token prefixes,
//! category phrases plus title context, then long-tail variants.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Tags requested when nothing else is said.
pub const DEFAULT_MAX_TAGS: usize = 25;

/// Most tips [`feedback`] returns.
pub const MAX_TIPS: usize = 6;

const STOP_EN: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "to", "of", "for", "in", "on", "at", "with", "without",
    "from", "by", "as", "is", "are", "was", "were", "this", "that", "these", "those", "your", "my",
    "our", "their", "you", "we", "they", "i", "me", "us", "them", "how", "what", "why", "when",
    "where", "who", "which", "best", "top", "new", "official", "video",
];

const STOP_IT: &[&str] = &[
    "un", "una", "il", "lo", "la", "i", "gli", "le", "e", "o", "ma", "per", "di", "del", "della",
    "dei", "delle", "in", "su", "con", "senza", "da", "come", "che", "cosa", "perché", "quando",
    "dove", "chi", "quale", "migliore", "nuovo", "ufficiale", "video",
];

static NOT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s\-]").expect("static regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("static regex"));
static ANGLE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(steps|checklist|guide|tips|tutorial|beginner|fast|easy)\b")
        .expect("static regex")
});
static MUSIC_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(official|lyrics|mv)\b").expect("static regex"));
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()\-:]").expect("static regex"));

/// Language of the generated phrases and tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Italian,
}

impl Language {
    pub fn key(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
        }
    }

    fn stop_words(self) -> &'static [&'static str] {
        match self {
            Language::English => STOP_EN,
            Language::Italian => STOP_IT,
        }
    }

    fn is_stop(self, word: &str) -> bool {
        self.stop_words().contains(&word)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Language::English),
            "it" => Ok(Language::Italian),
            other => Err(format!("unknown language '{other}' (en, it)")),
        }
    }
}

/// Channel category; each one biases the supporting tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCategory {
    General,
    HowTo,
    Tech,
    Gaming,
    Music,
    Education,
    Vlog,
    Finance,
    Fitness,
}

impl VideoCategory {
    pub const ALL: [VideoCategory; 9] = [
        VideoCategory::General,
        VideoCategory::HowTo,
        VideoCategory::Tech,
        VideoCategory::Gaming,
        VideoCategory::Music,
        VideoCategory::Education,
        VideoCategory::Vlog,
        VideoCategory::Finance,
        VideoCategory::Fitness,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VideoCategory::General => "general",
            VideoCategory::HowTo => "howto",
            VideoCategory::Tech => "tech",
            VideoCategory::Gaming => "gaming",
            VideoCategory::Music => "music",
            VideoCategory::Education => "education",
            VideoCategory::Vlog => "vlog",
            VideoCategory::Finance => "finance",
            VideoCategory::Fitness => "fitness",
        }
    }

    /// Phrases that lead the supporting group.
    pub fn bias(self) -> &'static [&'static str] {
        match self {
            VideoCategory::General => &["tips", "guide", "tutorial", "how to", "best", "checklist"],
            VideoCategory::HowTo => &["how to", "tutorial", "step by step", "checklist", "tips"],
            VideoCategory::Tech => &["tutorial", "settings", "fix", "review", "2026"],
            VideoCategory::Gaming => &["gameplay", "tips", "settings", "best", "ranked"],
            VideoCategory::Music => &["official video", "lyrics", "audio", "music video", "mv"],
            VideoCategory::Education => &["lesson", "explained", "study", "tutorial", "guide"],
            VideoCategory::Vlog => &[
                "vlog",
                "day in the life",
                "travel",
                "storytime",
                "behind the scenes",
            ],
            VideoCategory::Finance => &["explained", "strategy", "investing", "beginner", "tips"],
            VideoCategory::Fitness => &["workout", "routine", "beginner", "tips", "form"],
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for VideoCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Bias used when no category is given.
const UNCATEGORISED_BIAS: &[&str] = &["tips", "guide", "tutorial", "how to"];

/// Everything [`build_tags`] needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRequest<'a> {
    pub title: &'a str,
    /// Overrides the keyword inferred from the title when not blank.
    pub focus: &'a str,
    pub language: Language,
    pub category: Option<VideoCategory>,
    /// Clamped to `[5, 60]`.
    pub max_tags: usize,
}

impl<'a> TagRequest<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            focus: "",
            language: Language::default(),
            category: Some(VideoCategory::General),
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub primary_keyword: String,
    pub tags: Vec<String>,
}

impl TagSet {
    /// Comma-separated, ready to paste into the tags box.
    pub fn joined(&self) -> String {
        self.tags.join(", ")
    }
}

/// Lowercase, drop accents and punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect();
    let stripped = NOT_WORD.replace_all(&lowered, " ");
    SPACES.replace_all(&stripped, " ").trim().to_string()
}

fn words(text: &str) -> Vec<String> {
    normalize(text).split(' ').filter(|w| !w.is_empty()).map(String::from).collect()
}

/// Keep the first occurrence of each entry, compared case-insensitively.
fn dedup_ci(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .collect()
}

/// Heuristic 0–100 score: length, word count, a year, an angle word and a
/// separator all count.
pub fn title_health(title: &str) -> u8 {
    let t = title.trim();
    let word_count = words(t).len();
    let chars = t.chars().count();

    let mut score: i32 = 70;
    if chars < 25 {
        score -= 18;
    }
    if chars > 85 {
        score -= 10;
    }
    if (35..=72).contains(&chars) {
        score += 10;
    }
    if word_count < 5 {
        score -= 12;
    }
    if (6..=12).contains(&word_count) {
        score += 6;
    }
    if YEAR.is_match(t) {
        score += 6;
    }
    if ANGLE_WORDS.is_match(t) {
        score += 6;
    }
    if MUSIC_WORDS.is_match(t) {
        score += 4;
    }
    if SEPARATOR.is_match(t) {
        score += 3;
    }
    score.clamp(0, 100) as u8
}

/// Clear titles need fewer tags; very short ones get a few more variants.
pub fn recommended_max_tags(title: &str) -> usize {
    let rec = match title_health(title) {
        85..=u8::MAX => 16,
        75..=84 => 18,
        60..=74 => 22,
        _ => 26,
    };
    let bonus = if words(title).len() <= 4 { 4 } else { 0 };
    (rec + bonus).clamp(12, 30)
}

/// The first two or three meaningful title words (stop words and words of
/// two letters or fewer skipped).
pub fn infer_primary_keyword(title: &str, language: Language) -> String {
    let all = words(title);
    let kept: Vec<&str> = all
        .iter()
        .map(String::as_str)
        .filter(|w| !language.is_stop(w) && w.chars().count() > 2)
        .collect();
    match kept.as_slice() {
        [a, b, c, ..] => format!("{a} {b} {c}"),
        [a, b] => format!("{a} {b}"),
        [a] => a.to_string(),
        [] => all.first().cloned().unwrap_or_default(),
    }
}

/// Primary, supporting and long-tail tags for a title, capped at
/// `request.max_tags`.
pub fn build_tags(request: &TagRequest<'_>) -> TagSet {
    let title = request.title.trim();
    let language = request.language;

    let primary_keyword = if request.focus.trim().is_empty() {
        infer_primary_keyword(title, language)
    } else {
        normalize(request.focus)
    };
    let tokens: Vec<&str> = primary_keyword.split(' ').filter(|t| !t.is_empty()).take(4).collect();
    let first2 = tokens.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    let first3 = tokens.iter().take(3).copied().collect::<Vec<_>>().join(" ");

    let primary = dedup_ci([primary_keyword.clone(), first2.clone(), first3.clone()]);

    let bias = request.category.map_or(UNCATEGORISED_BIAS, VideoCategory::bias);
    let supporting: Vec<String> = dedup_ci(
        bias.iter()
            .map(|s| s.to_string())
            .chain(context_tokens(title, language)),
    )
    .into_iter()
    .filter(|s| s.chars().count() > 2)
    .collect();

    let long_tail = if tokens.is_empty() {
        Vec::new()
    } else {
        let year = YEAR.find(title).map(|m| m.as_str());
        dedup_ci(long_tails(&first2, &first3, year, language))
    };

    let tags = dedup_ci(primary.into_iter().chain(supporting).chain(long_tail))
        .into_iter()
        .map(|tag| SPACES.replace_all(&tag, " ").trim().to_string())
        .filter(|tag| tag.chars().count() >= 3)
        .take(request.max_tags.clamp(5, 60))
        .collect();

    TagSet {
        primary_keyword,
        tags,
    }
}

/// Up to 12 early title words plus adjacent pairs, 16 entries at most.
fn context_tokens(title: &str, language: Language) -> Vec<String> {
    let ctx: Vec<String> = words(title)
        .into_iter()
        .filter(|w| !language.is_stop(w) && w.chars().count() > 2)
        .take(12)
        .collect();
    let pair_count = ctx.len().saturating_sub(1).min(8);
    let pairs = ctx
        .windows(2)
        .take(pair_count)
        .map(|w| format!("{} {}", w[0], w[1]))
        .filter(|pair| pair.chars().count() >= 6);
    let mut out = dedup_ci(ctx.iter().cloned().chain(pairs));
    out.truncate(16);
    out
}

fn long_tails(first2: &str, first3: &str, year: Option<&str>, language: Language) -> Vec<String> {
    let (how, tutorial, guide, tips, beginners, best) = match language {
        Language::English => ("how to", "tutorial", "guide", "tips", "for beginners", "best"),
        Language::Italian => ("come", "tutorial", "guida", "consigli", "per principianti", "miglior"),
    };
    let mut out = vec![
        format!("{how} {first2}"),
        format!("{first2} {tutorial}"),
        format!("{first3} {guide}"),
    ];
    if let Some(year) = year {
        out.push(format!("{first2} {year}"));
    }
    out.push(format!("{first2} {tips}"));
    out.push(format!("{first2} {beginners}"));
    out.push(format!("{best} {first2}"));
    out
}

/// Short, actionable tips for improving the title.
pub fn feedback(title: &str, language: Language) -> Vec<&'static str> {
    let t = title.trim();
    let it = language == Language::Italian;
    let pick = |en: &'static str, it_text: &'static str| if it { it_text } else { en };

    if t.is_empty() {
        return vec![pick(
            "Paste a title to generate tags and suggestions.",
            "Incolla un titolo per ottenere tag e consigli.",
        )];
    }

    let chars = t.chars().count();
    let mut tips = Vec::new();
    if chars < 30 {
        tips.push(pick(
            "Title is a bit short: add a detail (year, format, outcome).",
            "Titolo un po’ corto: aggiungi un dettaglio (anno, formato, outcome).",
        ));
    }
    if chars > 85 {
        tips.push(pick(
            "Title is long: trim extra words while keeping the core idea.",
            "Titolo lungo: prova a tagliare parole inutili mantenendo l’idea.",
        ));
    }
    if words(t).len() < 5 {
        tips.push(pick(
            "Add 1-2 keywords to clarify the topic.",
            "Aggiungi 1-2 parole chiave per chiarire il topic.",
        ));
    }
    if !YEAR.is_match(t) {
        tips.push(pick(
            "If it's current content, add the year to boost CTR.",
            "Se è contenuto attuale, aggiungi l’anno per aumentare CTR.",
        ));
    }
    if !SEPARATOR.is_match(t) {
        tips.push(pick(
            "A separator (colon, dash, parentheses) can improve scannability.",
            "Un separatore (due punti, trattino, parentesi) aiuta a rendere il titolo più leggibile.",
        ));
    }
    if title_health(t) >= 85 {
        tips.push(pick(
            "Title is already strong: prioritize specific long-tail tags.",
            "Titolo già molto buono: punta su tag long-tail specifici.",
        ));
    }
    tips.truncate(MAX_TIPS);
    tips
}
