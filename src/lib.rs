//! # boolix
//!
//! A Boolean-model information retrieval engine: a positional inverted index with permuterm
//! and phonetic auxiliary indexes, a recursive-descent Boolean query parser (`&`/`|`/`!`,
//! quoted phrases with positional-distance markers, `*` wildcards), a posting-list-algebra
//! evaluator with skip pointers, and iterative spelling/phonetic correction.
//!
//! ## Features
//!
//! - Positional inverted index built in parallel over an arbitrary document corpus
//! - Permuterm index answering `*` wildcard queries as ordered-map prefix searches
//! - Soundex phonetic index for "sounds like" correction
//! - A Boolean query language: AND binds tighter than OR, adjacency implies AND, `!` toggles
//!   by parity, `"…"` phrases carry explicit or implicit positional-distance markers
//! - Skip-pointer-accelerated posting-list intersection/union for AND/OR/NOT
//! - Iterative, edit-distance- and Soundex-bounded spelling correction that folds candidates
//!   into the query as `original | (candidate₁ | …)`
//!
//! ## Example
//!
//! ```
//! use boolix::{Document, Irs, NormalizerConfig};
//! use std::collections::HashSet;
//!
//! let documents = vec![
//!     Document::from_text(None, "The cat is on the table"),
//!     Document::from_text(None, "The dog is eating"),
//!     Document::from_text(None, "The car is running"),
//! ];
//! let stopwords: HashSet<String> = ["the", "is", "on"].iter().map(|s| s.to_string()).collect();
//! let irs = Irs::build(documents, NormalizerConfig::default(), &stopwords, None).unwrap();
//!
//! let matches = irs.retrieve("cat | dog").unwrap();
//! assert_eq!(matches.len(), 2);
//! ```

pub mod config;
pub mod corrector;
pub mod doc_id;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod index;
pub mod lang;
pub mod normalizer;
pub mod permuterm;
pub mod posting;
pub mod query;
pub mod retrieval;
pub mod skiplist;
pub mod soundex;
pub mod stemmer;
pub mod term;

pub use corrector::{CorrectionStrategy, LeafCorrectors, SpellingCorrector};
pub use doc_id::{DocId, DocIdGenerator};
pub use document::{Corpus, Document};
pub use error::{IrError, IrResult};
pub use evaluator::evaluate;
pub use index::InvertedIndex;
pub use lang::Language;
pub use normalizer::NormalizerConfig;
pub use posting::{Posting, PostingList};
pub use query::{parse_query, Expr, ParseError};
pub use retrieval::{BooleanExpression, Irs};
pub use stemmer::StemmerKind;
pub use term::Term;
