//! The inverted index: the token → posting list dictionary plus its auxiliary phonetic and
//! permuterm indexes (§3, §4.3).

pub mod wildcard;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ahash::AHashMap;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::doc_id::DocId;
use crate::document::Corpus;
use crate::error::IrError;
use crate::normalizer::{normalize_document, NormalizerConfig};
use crate::permuterm::PermutermIndex;
use crate::posting::{cmp_by_doc_id, Posting, PostingList};
use crate::skiplist::{self, SkipList};
use crate::soundex::soundex;
use crate::stemmer::StemmerKind;
use crate::term::Term;
use wildcard::WildcardPattern;

/// Token → posting list, plus the phonetic and permuterm auxiliary structures built from it.
///
/// Immutable after [`InvertedIndex::build`] returns: queries are read-only against this
/// structure and may be served concurrently without any synchronization of their own (§5).
pub struct InvertedIndex {
    dictionary: AHashMap<String, Arc<Term>>,
    postings_by_doc: AHashMap<DocId, Vec<Posting>>,
    phonetic: AHashMap<String, Vec<Arc<Term>>>,
    permuterm: PermutermIndex,
    stemmer: StemmerKind,
}

impl InvertedIndex {
    /// Build protocol (§4.3): per-document normalization and aggregation run in parallel;
    /// the phonetic and permuterm indexes are built afterward from the completed
    /// dictionary, which is the synchronization point the rest of the build depends on.
    pub fn build(
        corpus: &Corpus,
        config: &NormalizerConfig,
        stopwords: &HashSet<String>,
    ) -> Result<InvertedIndex, IrError> {
        let documents: Vec<(DocId, &crate::document::Document)> = corpus.iter().collect();
        let progress = ProgressReporter::start(documents.len());

        let dictionary: DashMap<String, Term> = DashMap::new();
        let postings_by_doc: DashMap<DocId, Vec<Posting>> = DashMap::new();
        let unstemmed: DashSet<String> = DashSet::new();

        documents.par_iter().for_each(|(doc_id, document)| {
            let mut local_unstemmed = HashSet::new();
            let token_positions = normalize_document(document, config, stopwords, &mut local_unstemmed);
            for word in local_unstemmed {
                unstemmed.insert(word);
            }

            for (token, positions) in token_positions {
                let posting = Posting::new(*doc_id, positions);

                postings_by_doc
                    .entry(*doc_id)
                    .or_insert_with(Vec::new)
                    .push(posting.clone());

                let singleton = Term::singleton(token.clone(), posting);
                match dictionary.entry(token) {
                    Entry::Occupied(mut occupied) => {
                        let existing = occupied.get().clone();
                        let merged = existing
                            .merge(singleton)
                            .expect("token keys are equal by construction");
                        *occupied.get_mut() = merged;
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(singleton);
                    }
                }
            }
            progress.increment();
        });
        drop(progress);

        let dictionary: AHashMap<String, Arc<Term>> = dictionary
            .into_iter()
            .map(|(token, term)| (token, Arc::new(term)))
            .collect();

        let postings_by_doc: AHashMap<DocId, Vec<Posting>> = postings_by_doc
            .into_iter()
            .map(|(doc_id, mut postings)| {
                postings.sort();
                (doc_id, postings)
            })
            .collect();

        let mut phonetic: AHashMap<String, Vec<Arc<Term>>> = AHashMap::new();
        for term in dictionary.values() {
            let code = soundex(&term.token);
            let bucket = phonetic.entry(code).or_default();
            if !bucket.iter().any(|existing| Arc::ptr_eq(existing, term)) {
                bucket.push(Arc::clone(term));
            }
        }

        let mut permuterm = PermutermIndex::new();
        for token in dictionary.keys() {
            permuterm.insert(token);
        }
        for token in unstemmed.iter() {
            permuterm.insert(&token);
        }

        tracing::info!(
            documents = documents.len(),
            terms = dictionary.len(),
            "inverted index build complete"
        );

        Ok(InvertedIndex {
            dictionary,
            postings_by_doc,
            phonetic,
            permuterm,
            stemmer: config.stemmer,
        })
    }

    /// Tokens in the dictionary, sorted.
    pub fn dictionary(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.dictionary.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// Tokens whose posting-list length strictly exceeds `threshold`, sorted.
    pub fn dictionary_above_df(&self, threshold: usize) -> Vec<&str> {
        let mut tokens: Vec<&str> = self
            .dictionary
            .iter()
            .filter(|(_, term)| term.document_frequency() > threshold)
            .map(|(token, _)| token.as_str())
            .collect();
        tokens.sort_unstable();
        tokens
    }

    /// Posting list for `token`, honoring the wildcard rule when it contains `*`. Empty on
    /// miss.
    pub fn posting_list(&self, token: &str) -> PostingList {
        if token.contains('*') {
            self.resolve_wildcard(token)
        } else if let Some(term) = self.dictionary.get(token) {
            term.postings.clone()
        } else {
            SkipList::new()
        }
    }

    fn resolve_wildcard(&self, pattern: &str) -> PostingList {
        let mut result: PostingList = SkipList::new();
        for candidate in self.wildcard_candidates(pattern) {
            if let Some(term) = self.dictionary.get(&candidate) {
                let merged = skiplist::union(&result, &term.postings, cmp_by_doc_id);
                result = SkipList::from_sorted_vec(merged);
            }
        }
        result
    }

    /// Indexed (stemmed) tokens matching wildcard `pattern`: permuterm rotation lookup,
    /// confirmed by re-stemming each candidate and checking it against the prefix/suffix
    /// (§4.3). Exposed so a phrase word containing `*` can be expanded into its concrete
    /// per-word alternatives (§9's phrase-wildcard open question) rather than only ever
    /// being resolved down to a single merged posting list.
    pub fn wildcard_candidates(&self, pattern: &str) -> Vec<String> {
        let prepared = WildcardPattern::prepare(pattern);
        let rotations = self.permuterm.prefix_search(&prepared.prefix_query);

        let mut matched: Vec<String> = Vec::new();
        for candidate in rotations {
            let stemmed = self.stemmer.stem(&candidate);
            if prepared.matches(&stemmed) && self.dictionary.contains_key(&stemmed) && !matched.contains(&stemmed) {
                matched.push(stemmed);
            }
        }
        matched
    }

    pub fn postings_by_doc(&self, doc_id: DocId) -> &[Posting] {
        self.postings_by_doc
            .get(&doc_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted document identifiers with at least one posting.
    pub fn all_doc_ids(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = self.postings_by_doc.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn collection_frequency(&self, token: &str) -> usize {
        self.dictionary
            .get(token)
            .map(Term::collection_frequency)
            .unwrap_or(0)
    }

    pub fn df(&self, token: &str) -> usize {
        self.dictionary.get(token).map(Term::document_frequency).unwrap_or(0)
    }

    pub fn avg_df(&self) -> f64 {
        if self.dictionary.is_empty() {
            return 0.0;
        }
        let total: usize = self.dictionary.values().map(|t| t.document_frequency()).sum();
        total as f64 / self.dictionary.len() as f64
    }

    /// `log(N/df)` where `N` is corpus size. Zero when the token is not indexed.
    pub fn idf(&self, token: &str, n: usize) -> f64 {
        let df = self.df(token);
        if df == 0 || n == 0 {
            0.0
        } else {
            (n as f64 / df as f64).ln()
        }
    }

    /// Dictionary tokens whose Soundex code equals that of `word`.
    pub fn dictionary_matches_soundex(&self, word: &str) -> Vec<&str> {
        let code = soundex(word);
        self.phonetic
            .get(&code)
            .map(|terms| terms.iter().map(|t| t.token.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn permuterm_rotation_count(&self) -> usize {
        self.permuterm.len()
    }

    pub fn stemmer(&self) -> StemmerKind {
        self.stemmer
    }
}

/// Background progress-reporting timer (§5). Started before the build, joined
/// deterministically on drop so the synchronization point holds on every exit path.
struct ProgressReporter {
    processed: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressReporter {
    fn start(total: usize) -> Self {
        let processed = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let processed = Arc::clone(&processed);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    thread::sleep(Duration::from_millis(200));
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    tracing::debug!(
                        processed = processed.load(Ordering::Relaxed),
                        total,
                        "index build progress"
                    );
                }
            })
        };
        ProgressReporter {
            processed,
            stop,
            handle: Some(handle),
        }
    }

    fn increment(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The documented shape of a persisted index blob (§3.1, §6). No load/save IO is
/// implemented here — file persistence of the finished index is an external collaborator
/// (§1) — this type only pins down the contract's fields so they're checkable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedLayout {
    pub magic: [u8; 4],
    pub format_version: u32,
    pub stemmer_tag: StemmerKind,
    pub dictionary: Vec<(String, Vec<(u64, Vec<u32>)>)>,
    pub permuterm_tokens: Vec<String>,
    pub next_doc_id: u64,
}

impl PersistedLayout {
    /// On load, a stemmer mismatch is logged but not fatal (§6).
    pub fn stemmer_mismatch(&self, live: StemmerKind) -> bool {
        self.stemmer_tag != live
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
