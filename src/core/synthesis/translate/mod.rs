//! Google Translate TTS adapter.
//!
//! Talks to the unauthenticated `translate_tts` endpoint that backs the
//! Translate "listen" button. It takes plain text and a speed hint and
//! answers with MP3 audio.
//!
//! # API Reference
//!
//! - Endpoint: `GET https://translate.google.com/translate_tts`
//! - Query: `ie=UTF-8`, `client=tw-ob`, `tl=<lang>`, `q=<text>`, `total`, `idx`,
//!   `textlen`, `ttsspeed`
//! - Output: MP3, concatenable across chunks
//! - Limit: about 100 characters per request

pub mod config;
pub mod provider;

pub use config::TranslateTtsConfig;
pub use provider::TranslateTts;

// =============================================================================
// API Constants
// =============================================================================

/// Default backend host.
pub const TRANSLATE_TTS_BASE_URL: &str = "https://translate.google.com";

/// Path of the speech endpoint, relative to the base URL.
pub const TRANSLATE_TTS_PATH: &str = "translate_tts";

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Per-request character limit of the backend.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 100;

pub const MIN_MAX_CHUNK_CHARS: usize = 10;
pub const MAX_MAX_CHUNK_CHARS: usize = 5000;

/// `ttsspeed` value for normal speech.
pub const NORMAL_SPEED: &str = "1";

/// `ttsspeed` value for slow speech.
pub const SLOW_SPEED: &str = "0.3";
