//! Word, sentence and paragraph statistics with reading-time estimates.

use super::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

/// Silent reading speed (words per minute).
pub const HUMAN_WPM: f64 = 235.0;

/// Synthetic voice speaking speed (words per minute).
pub const VOICE_WPM: f64 = 155.0;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("static regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    pub words: usize,
    /// Unicode scalar values, whitespace included.
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub avg_words_per_sentence: f64,
    pub human_reading_secs: f64,
    pub voice_reading_secs: f64,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words = word_count(text);
        let sentences = sentence_count(text);
        let avg = if sentences > 0 {
            words as f64 / sentences as f64
        } else {
            0.0
        };
        Self {
            words,
            characters: text.chars().count(),
            characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            sentences,
            paragraphs: paragraph_count(text),
            avg_words_per_sentence: avg,
            human_reading_secs: words as f64 / HUMAN_WPM * 60.0,
            voice_reading_secs: words as f64 / VOICE_WPM * 60.0,
        }
    }

    /// Plain-text summary, one stat per line.
    pub fn report(&self) -> String {
        format!(
            "Word Counter (Clickoz)\n\
             Words: {}\n\
             Human reading: {}\n\
             AI voice reading: {}\n\
             Characters: {}\n\
             Chars (no spaces): {}\n\
             Sentences: {}\n\
             Paragraphs: {}\n\
             Avg words/sentence: {:.1}",
            self.words,
            format_duration(self.human_reading_secs),
            format_duration(self.voice_reading_secs),
            self.characters,
            self.characters_no_spaces,
            self.sentences,
            self.paragraphs,
            self.avg_words_per_sentence,
        )
    }
}

/// Whitespace-separated runs; apostrophes and hyphens stay inside words.
pub fn word_count(text: &str) -> usize {
    normalize_text(text).split_whitespace().count()
}

/// Sentences end at `.`, `!` or `?` followed by whitespace.  Non-empty text
/// always has at least one.
pub fn sentence_count(text: &str) -> usize {
    let t = normalize_text(text);
    let t = t.trim();
    if t.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut current_has_text = false;
    let mut chars = t.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            current_has_text = true;
        }
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|next| next.is_whitespace());
        if at_boundary && current_has_text {
            count += 1;
            current_has_text = false;
        }
    }
    if current_has_text {
        count += 1;
    }
    count.max(1)
}

/// Blocks separated by two or more newlines.
pub fn paragraph_count(text: &str) -> usize {
    let t = normalize_text(text);
    let t = t.trim();
    if t.is_empty() {
        return 0;
    }
    PARAGRAPH_BREAK
        .split(t)
        .filter(|p| !p.trim().is_empty())
        .count()
}

/// `"N sec"`, `"M min"` or `"M min S sec"`, rounded to whole seconds.
pub fn format_duration(seconds: f64) -> String {
    let s = if seconds.is_finite() {
        seconds.max(0.0).round() as u64
    } else {
        0
    };
    if s < 60 {
        return format!("{s} sec");
    }
    let (m, r) = (s / 60, s % 60);
    if r == 0 {
        format!("{m} min")
    } else {
        format!("{m} min {r} sec")
    }
}
