//! Profile-driven text transform stages.
//!
//! Every stage is a total `&str -> String` function over whitespace-delimited
//! words. The pipeline applies them in a fixed order:
//! vowel -> style -> stress -> chant.

use once_cell::sync::Lazy;
use regex::Regex;

use super::CHANT_SEPARATOR;
use super::params::{Style, VowelMode};

static VOWEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouAEIOU]").expect("vowel pattern is valid"));

// =============================================================================
// Vowel Stages
// =============================================================================

/// Doubles every vowel in place, preserving case.
///
/// Not idempotent: `elongate_vowels(&elongate_vowels("a")) == "aaaa"`.
pub fn elongate_vowels(text: &str) -> String {
    VOWEL_RE.replace_all(text, "$0$0").into_owned()
}

/// Inserts an apostrophe right after every vowel.
pub fn shorten_vowels(text: &str) -> String {
    VOWEL_RE.replace_all(text, "$0'").into_owned()
}

/// Applies the single vowel transform selected by `mode`.
pub fn apply_vowel_mode(text: &str, mode: VowelMode) -> String {
    match mode {
        VowelMode::Normal => text.to_string(),
        VowelMode::Short => shorten_vowels(text),
        VowelMode::Long => elongate_vowels(text),
    }
}

// =============================================================================
// Style Stage
// =============================================================================

/// Rejoins words with the style's separator.
///
/// Staccato and clipped put their mark between words, never after the last
/// one. Punctuation-only tokens such as pause dots get a plain space. Legato
/// and neutral leave the text untouched.
pub fn apply_style(text: &str, style: Style) -> String {
    let Some(mark) = style.separator_mark() else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len() * 2);
    let mut words = text.split_whitespace().peekable();
    while let Some(word) = words.next() {
        out.push_str(word);
        if words.peek().is_some() {
            if is_spoken(word) {
                out.push(mark);
            }
            out.push(' ');
        }
    }
    out
}

/// Whether `word` has anything to pronounce, as opposed to bare punctuation.
fn is_spoken(word: &str) -> bool {
    word.chars().any(char::is_alphanumeric)
}

// =============================================================================
// Stress Stage
// =============================================================================

/// Upper-cases the first spoken word, leaving the rest of the text
/// byte-for-byte intact so separators from earlier stages survive.
///
/// Leading punctuation-only tokens (pause dots) are skipped. With `suffix`
/// set, the stressed word also ends in `!` (trailing `.` marks are replaced).
/// Input without words is returned unchanged.
pub fn stress_first_word(text: &str, suffix: bool) -> String {
    let mut searched = 0;
    let span = text.split_whitespace().find_map(|word| {
        let start = searched + text[searched..].find(word)?;
        searched = start + word.len();
        is_spoken(word).then_some((start, searched))
    });
    let Some((start, end)) = span else {
        return text.to_string();
    };

    let mut stressed = text[start..end].to_uppercase();
    if suffix && !stressed.ends_with('!') {
        let kept = stressed.trim_end_matches('.').len();
        stressed.truncate(kept);
        stressed.push('!');
    }

    let mut out = String::with_capacity(text.len() + 1);
    out.push_str(&text[..start]);
    out.push_str(&stressed);
    out.push_str(&text[end..]);
    out
}

// =============================================================================
// Chant Stage
// =============================================================================

/// Rejoins words with `" ~ "`.
///
/// Runs after the style stage and replaces its separator: the mark `style`
/// placed after each non-final spoken word is stripped first.
pub fn chant_join(text: &str, style: Style) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(index, word)| match style.separator_mark() {
            Some(mark) if index < last && is_spoken(word) => {
                word.strip_suffix(mark).unwrap_or(word)
            }
            _ => word,
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(CHANT_SEPARATOR)
}
