//! Stemmer selection.
//!
//! Stemmer *implementations* are an external collaborator (§1) — this module only selects
//! among the algorithms `rust_stemmers` ships and exposes the pure `stem(word) -> String`
//! contract (§6). An unrecognized configuration value resolves to [`StemmerKind::None`].

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StemmerKind {
    None,
    Porter,
    Snowball,
}

impl StemmerKind {
    /// Parse the `app.stemmer` configuration value. Unrecognized values resolve to `None`,
    /// matching the stemmer contract in §6 rather than erroring.
    pub fn from_config_value(value: &str) -> StemmerKind {
        match value.to_ascii_lowercase().as_str() {
            "porter" => StemmerKind::Porter,
            "snowball" => StemmerKind::Snowball,
            "none" | "" => StemmerKind::None,
            _ => StemmerKind::None,
        }
    }

    /// Pure function: `stem(word, language) -> string`. Language is currently always
    /// English-compatible Snowball/Porter tables; non-English stemming is out of scope.
    pub fn stem(&self, word: &str) -> String {
        match self {
            StemmerKind::None => word.to_string(),
            StemmerKind::Porter | StemmerKind::Snowball => {
                get_stemmer(*self).stem(word).into_owned()
            }
        }
    }
}

fn get_stemmer(kind: StemmerKind) -> &'static Stemmer {
    use once_cell::sync::Lazy;
    static PORTER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));
    static SNOWBALL: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));
    match kind {
        StemmerKind::Porter => &PORTER,
        StemmerKind::Snowball => &SNOWBALL,
        StemmerKind::None => unreachable!("None does not use a backing Stemmer"),
    }
}
