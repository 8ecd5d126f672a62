//! Split → case-fold → strip punctuation → stop-word removal → optional stemming,
//! preserving positions (§4.2).

use std::collections::HashSet;

use ahash::AHashMap;

use crate::document::Document;
use crate::lang::Language;
use crate::stemmer::StemmerKind;

#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    pub remove_stop_words: bool,
    pub language: Language,
    pub stemmer: StemmerKind,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            remove_stop_words: true,
            language: Language::English,
            stemmer: StemmerKind::None,
        }
    }
}

/// Normalize a document's content into a mapping from surviving token to its sorted
/// occurrence positions. `unstemmed_collector` accumulates every word that survives steps
/// 1–5 (before stemming), for permuterm index coverage (§4.3 step 5).
///
/// Positions count input tokens, not characters, and start at 0 at the first content token.
/// Position counting increments per input token regardless of whether that token is
/// ultimately dropped, so surviving tokens' positions reflect absolute occurrence.
pub fn normalize_document(
    document: &Document,
    config: &NormalizerConfig,
    stopwords: &HashSet<String>,
    unstemmed_collector: &mut HashSet<String>,
) -> AHashMap<String, Vec<u32>> {
    let mut result: AHashMap<String, Vec<u32>> = AHashMap::new();

    for (position, raw_token) in document.content().split_whitespace().enumerate() {
        let position = position as u32;

        // (1) case-fold to lower.
        let lowered = raw_token.to_lowercase();
        // (2) strip punctuation to produce a bare word.
        let bare: String = lowered.chars().filter(|c| c.is_alphanumeric() || *c == '_').collect();
        // (3) empty after stripping -> drop.
        if bare.is_empty() {
            continue;
        }
        // (4) stop-word removal.
        if config.remove_stop_words && stopwords.contains(&bare) {
            continue;
        }
        // (5) record surviving (pre-stem) word for permuterm coverage.
        unstemmed_collector.insert(bare.clone());
        // (6) optional stemming.
        let stemmed = config.stemmer.stem(&bare);
        // (7) empty stem -> drop.
        if stemmed.is_empty() {
            continue;
        }

        result.entry(stemmed).or_default().push(position);
    }

    result
}

/// Normalize a bare stop word through steps 1–3 only, as specified for the stop-word set
/// itself ("Language-tagged stop words themselves undergo steps 1–3 only").
pub fn normalize_stopword_entry(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
