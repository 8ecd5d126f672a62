//! Layered configuration: an all-`Option` raw layer, resolved against defaults into a fully
//! populated [`ResolvedIrConfig`], then validated. Mirrors the teacher's config layering
//! (raw config → `resolve_with_defaults()` → `Resolved*Config` → `validate()`), scoped down
//! to the two keys this spec actually names: `app.stemmer` and `index.dataStructure.type`.

use std::collections::HashMap;
use std::env;

use anyhow::Context;

use crate::error::IrError;
use crate::stemmer::StemmerKind;

/// Which ordered container backs the dictionary. Per the "Index backing-store choice" design
/// note, this crate's dictionary doubles as the permuterm backing container regardless of
/// which value is configured; the values are accepted for contract-compatibility (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexDataStructure {
    Hash,
    ConcurrentHash,
    PrefixTree,
}

impl IndexDataStructure {
    fn from_value(value: &str) -> Option<IndexDataStructure> {
        match value {
            "0" => Some(IndexDataStructure::Hash),
            "1" => Some(IndexDataStructure::ConcurrentHash),
            "2" => Some(IndexDataStructure::PrefixTree),
            _ => None,
        }
    }
}

/// The raw, possibly-incomplete configuration as loaded from key-value properties.
#[derive(Debug, Clone, Default)]
pub struct IrConfig {
    pub stemmer: Option<String>,
    pub index_data_structure: Option<String>,
    pub remove_stop_words: Option<bool>,
    pub max_results: Option<usize>,
}

impl IrConfig {
    /// Load from a `key -> value` properties map, applying environment-variable overrides
    /// `BOOLIX_APP_STEMMER` and `BOOLIX_INDEX_DATA_STRUCTURE_TYPE` on top (§6).
    pub fn from_properties(properties: &HashMap<String, String>) -> IrConfig {
        let mut config = IrConfig {
            stemmer: properties.get("app.stemmer").cloned(),
            index_data_structure: properties.get("index.dataStructure.type").cloned(),
            remove_stop_words: properties
                .get("normalizer.removeStopWords")
                .and_then(|v| v.parse().ok()),
            max_results: properties.get("retrieval.maxResults").and_then(|v| v.parse().ok()),
        };

        if let Ok(value) = env::var("BOOLIX_APP_STEMMER") {
            config.stemmer = Some(value);
        }
        if let Ok(value) = env::var("BOOLIX_INDEX_DATA_STRUCTURE_TYPE") {
            config.index_data_structure = Some(value);
        }

        config
    }

    /// Resolve missing fields against defaults, producing a fully populated config.
    /// Malformed values are recovered (logged, default substituted) rather than propagated,
    /// per [`IrError::ConfigError`]'s recovery policy.
    pub fn resolve_with_defaults(self) -> ResolvedIrConfig {
        let stemmer = match self.stemmer.as_deref() {
            Some(value) => StemmerKind::from_config_value(value),
            None => StemmerKind::None,
        };

        let index_data_structure = self
            .index_data_structure
            .as_deref()
            .and_then(IndexDataStructure::from_value)
            .unwrap_or_else(|| {
                if self.index_data_structure.is_some() {
                    tracing::warn!(
                        value = ?self.index_data_structure,
                        "unrecognized index.dataStructure.type; defaulting to hash index"
                    );
                }
                IndexDataStructure::Hash
            });

        ResolvedIrConfig {
            stemmer,
            index_data_structure,
            remove_stop_words: self.remove_stop_words.unwrap_or(true),
            max_results: self.max_results,
        }
    }
}

/// Fully populated configuration ready for use by the index builder and retrieval facade.
#[derive(Debug, Clone)]
pub struct ResolvedIrConfig {
    pub stemmer: StemmerKind,
    pub index_data_structure: IndexDataStructure,
    pub remove_stop_words: bool,
    pub max_results: Option<usize>,
}

impl ResolvedIrConfig {
    /// Sanity-check the resolved configuration. Currently only checks `max_results` is
    /// non-zero when set; extend as more properties are added.
    pub fn validate(&self) -> Result<(), IrError> {
        if self.max_results == Some(0) {
            return Err(IrError::ConfigError(
                "retrieval.maxResults must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ResolvedIrConfig {
    fn default() -> Self {
        IrConfig::default().resolve_with_defaults()
    }
}

/// Load configuration from a `key=value` properties file, with `anyhow::Context` around the
/// IO boundary, falling back to defaults (logged) on any failure — matching the teacher's
/// split between `thiserror` for library errors and `anyhow` at config-loading boundaries.
pub fn load_properties_file(path: &std::path::Path) -> anyhow::Result<HashMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading properties file {}", path.display()))?;
    let mut map = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(map)
}
