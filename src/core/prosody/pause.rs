//! Pause encoding.
//!
//! The synthesis backend has no timing parameters, but it reliably pauses
//! after a sentence boundary. A pause of `ms` milliseconds is therefore
//! written as `max(1, ms / 250)` terminator groups (`". "`). The mapping is
//! lossy: every duration inside one 250 ms bucket yields the same token, and
//! there is no way to express a zero-length pause.

use std::fmt;

use super::{PAUSE_BUCKET_MS, PAUSE_GROUP};

/// Punctuation stand-in for a pause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauseToken {
    groups: u32,
    text: String,
}

impl PauseToken {
    /// Number of terminator groups in the token. Always at least one.
    #[inline]
    pub fn groups(&self) -> u32 {
        self.groups
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Never true; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for PauseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for PauseToken {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Converts a pause duration into its punctuation token.
///
/// # Example
///
/// ```rust
/// use prosody_tts::core::prosody::encode_pause;
///
/// assert_eq!(encode_pause(0).as_str(), ". ");
/// assert_eq!(encode_pause(600).as_str(), ". . ");
/// ```
pub fn encode_pause(ms: u32) -> PauseToken {
    let groups = (ms / PAUSE_BUCKET_MS).max(1);
    PauseToken {
        groups,
        text: PAUSE_GROUP.repeat(groups as usize),
    }
}
