//! Language tagging and the stop-word dataset loader contract.
//!
//! The stop-word file *format* and the per-language word lists themselves are external
//! collaborators (§1, §6) — this module only implements the contract they must satisfy: one
//! word per line, UTF-8, keyed by [`Language`] and a filesystem path. No production
//! stop-word list ships in this crate; tests supply small fixture files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    French,
    German,
    Spanish,
}

impl Language {
    pub fn from_key(key: &str) -> Option<Language> {
        match key.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "fr" | "french" => Some(Language::French),
            "de" | "german" => Some(Language::German),
            "es" | "spanish" => Some(Language::Spanish),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Load a stop-word set from `path`. Unreadable file or invalid UTF-8 yields an empty set,
/// logged at `warn` rather than propagated — consistent with [`crate::error::IrError::IOError`]
/// being a recovered condition.
pub fn load_stopwords(path: &Path) -> HashSet<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_ascii_lowercase())
            .collect(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load stop-word dataset; using empty set");
            HashSet::new()
        }
    }
}

/// Resolve a stop-word set for an unrecognized language key: always empty, logged.
pub fn load_stopwords_for_unknown_language(key: &str) -> HashSet<String> {
    tracing::warn!(language = %key, "unrecognized language; using empty stop-word set");
    HashSet::new()
}
