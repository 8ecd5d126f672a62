//! Iterative spelling and phonetic correction of query leaves (§4.6).

use std::collections::{HashMap, HashSet};

use lru::LruCache;

use crate::index::InvertedIndex;
use crate::query::{BinaryOp, Expr};
use crate::soundex::soundex;

/// Widest edit distance a pure edit-distance corrector will ever propose. Bounds the
/// otherwise-unbounded "increase the bound on subsequent invocations" rule so correction is
/// guaranteed to terminate.
pub const MAX_EDIT_DISTANCE_BOUND: usize = 4;

/// How a [`SpellingCorrector`] selects candidates (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionStrategy {
    EditDistance,
    /// `use_edit_distance`: further filter/order phonetic matches by edit distance rather
    /// than accepting every same-code dictionary token in one shot.
    Phonetic { use_edit_distance: bool },
}

/// Per-leaf correction state: the original word, the chosen strategy, the current
/// edit-distance bound, and the set of candidates already handed out.
pub struct SpellingCorrector {
    original: String,
    strategy: CorrectionStrategy,
    edit_distance_bound: usize,
    stopped: bool,
    already_yielded: LruCache<String, ()>,
}

impl SpellingCorrector {
    pub fn new(original: impl Into<String>, strategy: CorrectionStrategy) -> Self {
        SpellingCorrector {
            original: original.into(),
            strategy,
            edit_distance_bound: 1,
            stopped: false,
            already_yielded: LruCache::new(std::num::NonZeroUsize::new(256).unwrap()),
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn edit_distance_bound(&self) -> usize {
        self.edit_distance_bound
    }

    /// Produce the next batch of candidate tokens, ordered by edit distance ascending, ties
    /// broken by descending collection frequency. Returns an empty `Vec` once exhausted or
    /// stopped — callers should treat two consecutive empty batches (or `is_stopped()`) as
    /// "no more candidates" (§4.6's termination clause).
    pub fn correct(&mut self, index: &InvertedIndex) -> Vec<String> {
        if self.stopped {
            return Vec::new();
        }

        let mut candidates: Vec<(String, i64, usize)> = Vec::new();
        match self.strategy {
            CorrectionStrategy::EditDistance => {
                for token in index.dictionary() {
                    if token == self.original || self.already_yielded.contains(token) {
                        continue;
                    }
                    let distance = strsim::levenshtein(&self.original, token) as i64;
                    if distance > 0 && distance as usize <= self.edit_distance_bound {
                        candidates.push((token.to_string(), distance, index.collection_frequency(token)));
                    }
                }
                self.edit_distance_bound += 1;
                if self.edit_distance_bound > MAX_EDIT_DISTANCE_BOUND {
                    self.stopped = true;
                }
            }
            CorrectionStrategy::Phonetic { use_edit_distance } => {
                let _code = soundex(&self.original);
                for token in index.dictionary_matches_soundex(&self.original) {
                    if token == self.original || self.already_yielded.contains(token) {
                        continue;
                    }
                    let distance = strsim::levenshtein(&self.original, token) as i64;
                    if use_edit_distance && distance as usize > self.edit_distance_bound {
                        continue;
                    }
                    candidates.push((token.to_string(), distance, index.collection_frequency(token)));
                }
                if use_edit_distance {
                    self.edit_distance_bound += 1;
                    if self.edit_distance_bound > MAX_EDIT_DISTANCE_BOUND {
                        self.stopped = true;
                    }
                } else {
                    // A fixed phonetic bucket is exhausted in a single pass.
                    self.stopped = true;
                }
            }
        }

        candidates.sort_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)));
        for (token, _, _) in &candidates {
            self.already_yielded.put(token.clone(), ());
        }
        candidates.into_iter().map(|(token, _, _)| token).collect()
    }
}

/// Drives one [`SpellingCorrector`] per distinct leaf word across an expression tree and
/// rewrites the tree to fold each leaf's candidates in as `original | (c1 | (c2 | ...))`
/// (§4.6). A token that was itself produced as a candidate is tracked in
/// `correction_tokens` and is never re-corrected, even if it reappears as its own leaf in a
/// later rewritten tree.
pub struct LeafCorrectors {
    strategy: CorrectionStrategy,
    correctors: HashMap<String, SpellingCorrector>,
    correction_tokens: HashSet<String>,
}

impl LeafCorrectors {
    pub fn new(strategy: CorrectionStrategy) -> Self {
        LeafCorrectors {
            strategy,
            correctors: HashMap::new(),
            correction_tokens: HashSet::new(),
        }
    }

    /// Advance every not-yet-exhausted leaf corrector one round and return the rewritten
    /// tree. Phrase leaves are not individually corrected — the spec scopes correction to
    /// single query words (§4.6's "single word or phrase" note applies the flags uniformly,
    /// but a phrase's distance structure has no well-defined single substitution point), so
    /// they pass through unchanged.
    pub fn apply_round(&mut self, expr: &Expr, index: &InvertedIndex) -> Expr {
        match expr {
            Expr::Value(word) => self.correct_leaf(word, index),
            Expr::Phrase { .. } => expr.clone(),
            Expr::Unary(op, inner) => Expr::Unary(*op, Box::new(self.apply_round(inner, index))),
            Expr::Binary(op, left, right) => Expr::Binary(
                *op,
                Box::new(self.apply_round(left, index)),
                Box::new(self.apply_round(right, index)),
            ),
        }
    }

    fn correct_leaf(&mut self, word: &str, index: &InvertedIndex) -> Expr {
        if self.correction_tokens.contains(word) {
            return Expr::value(word);
        }
        let corrector = self
            .correctors
            .entry(word.to_string())
            .or_insert_with(|| SpellingCorrector::new(word.to_string(), self.strategy));
        let candidates = corrector.correct(index);
        for candidate in &candidates {
            self.correction_tokens.insert(candidate.clone());
        }
        fold_or(word, candidates)
    }

    /// Whether every leaf corrector has stopped producing candidates.
    pub fn exhausted(&self) -> bool {
        !self.correctors.is_empty() && self.correctors.values().all(SpellingCorrector::is_stopped)
    }

    pub fn stop_all(&mut self) {
        for corrector in self.correctors.values_mut() {
            corrector.stop();
        }
    }

    /// The widest edit-distance bound any leaf corrector has reached so far.
    pub fn max_edit_distance_bound(&self) -> Option<usize> {
        self.correctors.values().map(SpellingCorrector::edit_distance_bound).max()
    }
}

fn fold_or(original: &str, candidates: Vec<String>) -> Expr {
    let mut iter = candidates.into_iter().rev();
    let mut tail = match iter.next() {
        Some(last) => Expr::value(last),
        None => return Expr::value(original),
    };
    for candidate in iter {
        tail = Expr::Binary(BinaryOp::Or, Box::new(Expr::value(candidate)), Box::new(tail));
    }
    Expr::Binary(BinaryOp::Or, Box::new(Expr::value(original)), Box::new(tail))
}

#[cfg(test)]
#[path = "corrector_tests.rs"]
mod tests;
