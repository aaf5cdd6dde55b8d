//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `prosody` - Preset listing, text rendering and speech generation

pub mod api;
pub mod prosody;
