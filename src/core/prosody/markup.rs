//! Inline markup expansion.
//!
//! Raw text may carry three kinds of embedded markup:
//!
//! | Markup | Expansion |
//! |--------|-----------|
//! | `[pause=<ms>]` | [`encode_pause`] token |
//! | `[repeat=<n>]` | preceding target repeated `n` times |
//! | `*phrase*` | `phrase!` |
//!
//! All occurrences are resolved in a single left-to-right pass, so each tag
//! is handled independently and in position. Forms that do not parse (a
//! non-numeric value, a count outside the accepted range, a repeat that would
//! grow the text past [`MAX_EXPANDED_BYTES`]) are left in the text verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::pause::encode_pause;
use super::{MAX_EXPANDED_BYTES, MAX_INLINE_REPEAT, MAX_PAUSE_MS};

static MARKUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[pause=(?P<pause>\d+)\]|\[repeat=(?P<repeat>\d+)\]|\*(?P<emphasis>[^*\n]+)\*")
        .expect("markup pattern is valid")
});

/// Characters that end a phrase for [`RepeatScope::Phrase`].
const CLAUSE_BOUNDARIES: &[char] = &['.', ',', '!', '?', ';', ':', '~'];

// =============================================================================
// Repeat Scope
// =============================================================================

/// What a `[repeat=n]` tag repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepeatScope {
    /// The last word before the tag
    #[default]
    Word,
    /// Everything after the last clause boundary before the tag
    Phrase,
    /// The entire text before the tag
    Preceding,
}

impl RepeatScope {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RepeatScope::Word => "word",
            RepeatScope::Phrase => "phrase",
            RepeatScope::Preceding => "preceding",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "word" => Some(RepeatScope::Word),
            "phrase" => Some(RepeatScope::Phrase),
            "preceding" | "all" => Some(RepeatScope::Preceding),
            _ => None,
        }
    }
}

impl fmt::Display for RepeatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`expand_markup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupOptions {
    pub repeat_scope: RepeatScope,
}

// =============================================================================
// Expansion
// =============================================================================

/// Returns whether `text` contains at least one markup candidate.
pub fn contains_markup(text: &str) -> bool {
    MARKUP_RE.is_match(text)
}

/// Expands all inline markup in `text`.
///
/// When at least one tag is expanded, runs of whitespace collapse to a single
/// space. Text without expandable markup is returned unchanged.
///
/// # Example
///
/// ```rust
/// use prosody_tts::core::prosody::{expand_markup, MarkupOptions};
///
/// let out = expand_markup("Hello there [pause=600] this works", &MarkupOptions::default());
/// assert_eq!(out, "Hello there . . this works");
/// ```
pub fn expand_markup(text: &str, options: &MarkupOptions) -> String {
    expand_within(text, options, MAX_EXPANDED_BYTES)
}

fn expand_within(text: &str, options: &MarkupOptions, limit: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut expanded = false;

    for caps in MARKUP_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();

        if let Some(ms) = caps.name("pause") {
            match parse_bounded(ms.as_str(), 0, MAX_PAUSE_MS) {
                Some(ms) => {
                    out.push_str(encode_pause(ms).as_str());
                    expanded = true;
                }
                None => out.push_str(whole.as_str()),
            }
        } else if let Some(count) = caps.name("repeat") {
            let repeated = parse_bounded(count.as_str(), 1, MAX_INLINE_REPEAT)
                .is_some_and(|count| repeat_tail(&mut out, count, options.repeat_scope, limit));
            if repeated {
                expanded = true;
            } else {
                out.push_str(whole.as_str());
            }
        } else if let Some(phrase) = caps.name("emphasis") {
            // Emphasis does not nest, but pause/repeat tags inside it still expand.
            let inner = expand_within(phrase.as_str(), options, limit.saturating_sub(out.len()));
            out.push_str(inner.trim());
            out.push('!');
            expanded = true;
        }
    }
    out.push_str(&text[cursor..]);

    if expanded {
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        out
    }
}

fn parse_bounded(digits: &str, min: u32, max: u32) -> Option<u32> {
    digits
        .parse::<u32>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}

/// Replaces the repeat target at the end of `out` with `count` copies.
///
/// A tag with nothing before it is consumed without output. Returns `false`
/// and leaves `out` untouched when the result would be longer than `limit`.
fn repeat_tail(out: &mut String, count: u32, scope: RepeatScope, limit: usize) -> bool {
    let kept = out.trim_end().len();

    let start = match scope {
        RepeatScope::Word => after_last(&out[..kept], char::is_whitespace),
        RepeatScope::Phrase => after_last(&out[..kept], |c| CLAUSE_BOUNDARIES.contains(&c)),
        RepeatScope::Preceding => 0,
    };

    let target = out[start..kept].trim().to_string();
    if target.is_empty() {
        out.truncate(kept);
        return true;
    }

    let count = count as usize;
    let separator = usize::from(start > 0 && !out[..start].ends_with(char::is_whitespace));
    let grown = start + separator + target.len() * count + (count - 1);
    if grown > limit {
        return false;
    }

    out.truncate(start);
    if separator == 1 {
        out.push(' ');
    }
    out.push_str(&vec![target.as_str(); count].join(" "));
    true
}

/// Byte offset just past the last char matching `pred`, or 0.
fn after_last(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .rev()
        .find(|(_, c)| pred(*c))
        .map_or(0, |(index, c)| index + c.len_utf8())
}
