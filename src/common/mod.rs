//! Common utilities shared by the CLI and the scenario runner

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Return at most the first `max_chars` characters of `text`.
///
/// Cuts on `char` boundaries so multi-byte names in response bodies
/// never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
