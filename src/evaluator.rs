//! Evaluates a parsed [`Expr`] tree against an [`InvertedIndex`] via posting-list set algebra
//! (§4.5).

use std::collections::HashMap;

use crate::doc_id::DocId;
use crate::error::IrError;
use crate::index::InvertedIndex;
use crate::posting::{cmp_by_doc_id, Posting, PostingList};
use crate::query::{BinaryOp, Expr, UnaryOp};
use crate::skiplist::{self, SkipList};

/// Recursion depth past which evaluation aborts rather than risk a native stack overflow
/// (§5, §7 `StackExhaustion`). A well-formed query from the parser is only this deep when
/// hand-crafted or pathologically nested.
pub const MAX_RECURSION_DEPTH: usize = 256;

/// Evaluate `expr` against `index`, returning matching document identifiers in ascending
/// order, truncated to `max_results` when given.
pub fn evaluate(
    expr: &Expr,
    index: &InvertedIndex,
    max_results: Option<usize>,
) -> Result<Vec<DocId>, IrError> {
    let postings = eval_inner(expr, index, 0)?;
    let mut ids: Vec<DocId> = postings.iter().map(|p| p.doc_id).collect();
    ids.sort();
    ids.dedup();
    if let Some(limit) = max_results {
        ids.truncate(limit);
    }
    Ok(ids)
}

fn eval_inner(expr: &Expr, index: &InvertedIndex, depth: usize) -> Result<PostingList, IrError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(IrError::StackExhaustion("query expression nested too deeply"));
    }
    match expr {
        Expr::Value(word) => Ok(index.posting_list(word)),
        Expr::Phrase { words, distances } => eval_phrase(words, distances, index),
        Expr::Unary(UnaryOp::Identity, inner) => eval_inner(inner, index, depth + 1),
        Expr::Unary(UnaryOp::Not, inner) => {
            let inner_list = eval_inner(inner, index, depth + 1)?;
            Ok(negate(&inner_list, index))
        }
        Expr::Binary(BinaryOp::And, left, right) => {
            let left = eval_inner(left, index, depth + 1)?;
            let right = eval_inner(right, index, depth + 1)?;
            Ok(SkipList::from_sorted_vec(skiplist::intersect(&left, &right, cmp_by_doc_id)))
        }
        Expr::Binary(BinaryOp::Or, left, right) => {
            let left = eval_inner(left, index, depth + 1)?;
            let right = eval_inner(right, index, depth + 1)?;
            Ok(SkipList::from_sorted_vec(skiplist::union(&left, &right, cmp_by_doc_id)))
        }
    }
}

/// All indexed documents not present in `inner`. The resulting postings carry no positions —
/// "does not contain token X" has none to report — so they are only ever valid as the
/// doc-identifier side of a further AND/OR combination, never as a phrase anchor.
fn negate(inner: &PostingList, index: &InvertedIndex) -> PostingList {
    let excluded: std::collections::HashSet<DocId> = inner.iter().map(|p| p.doc_id).collect();
    let postings: Vec<Posting> = index
        .all_doc_ids()
        .into_iter()
        .filter(|id| !excluded.contains(id))
        .map(|id| Posting::new(id, vec![]))
        .collect();
    SkipList::from_sorted_vec(postings)
}

/// A phrase matches a document at base position `p0` (an occurrence of `words[0]`) when,
/// for every `k`, `words[k + 1]` occurs at exactly `p0 + distances[k]` in that same document
/// (§4.5, §8's `"cat is"` example). Candidate documents are narrowed first via the ordinary
/// skip-accelerated doc-id intersection of every word's posting list; only surviving
/// documents pay for the per-position distance check.
///
/// A phrase word containing `*` is expanded into its concrete candidate tokens via the
/// permuterm before any of this runs, and the resulting per-word alternatives are
/// OR-combined (§9's phrase-wildcard open question) — a wildcard word can never be checked
/// for positional distance directly, since a merged posting list has already lost which
/// candidate contributed which position.
fn eval_phrase(words: &[String], distances: &[i64], index: &InvertedIndex) -> Result<PostingList, IrError> {
    if words.iter().any(|word| word.contains('*')) {
        return eval_phrase_with_wildcards(words, distances, index);
    }
    eval_concrete_phrase(words, distances, index)
}

/// Expand every wildcard word into its candidate tokens, then OR-combine (by document
/// identifier) the phrase matches of each concrete combination.
fn eval_phrase_with_wildcards(words: &[String], distances: &[i64], index: &InvertedIndex) -> Result<PostingList, IrError> {
    let mut alternatives: Vec<Vec<String>> = Vec::with_capacity(words.len());
    for word in words {
        if word.contains('*') {
            let candidates = index.wildcard_candidates(word);
            if candidates.is_empty() {
                return Ok(SkipList::new());
            }
            alternatives.push(candidates);
        } else {
            alternatives.push(vec![word.clone()]);
        }
    }

    let mut combined: PostingList = SkipList::new();
    for combo in cartesian_product(&alternatives) {
        let matches = eval_concrete_phrase(&combo, distances, index)?;
        combined = SkipList::from_sorted_vec(skiplist::union(&combined, &matches, cmp_by_doc_id));
    }
    Ok(combined)
}

/// All combinations picking one entry from each of `options`, in order.
fn cartesian_product(options: &[Vec<String>]) -> Vec<Vec<String>> {
    options.iter().fold(vec![Vec::new()], |combos, choices| {
        let mut next = Vec::with_capacity(combos.len() * choices.len());
        for combo in &combos {
            for choice in choices {
                let mut extended = combo.clone();
                extended.push(choice.clone());
                next.push(extended);
            }
        }
        next
    })
}

fn eval_concrete_phrase(words: &[String], distances: &[i64], index: &InvertedIndex) -> Result<PostingList, IrError> {
    let lists: Vec<PostingList> = words.iter().map(|w| index.posting_list(w)).collect();
    if lists.iter().any(PostingList::is_empty) {
        return Ok(SkipList::new());
    }

    let mut common = lists[0].clone();
    for list in &lists[1..] {
        common = SkipList::from_sorted_vec(skiplist::intersect(&common, list, cmp_by_doc_id));
    }
    if common.is_empty() {
        return Ok(SkipList::new());
    }

    let position_maps: Vec<HashMap<DocId, &[u32]>> = lists
        .iter()
        .map(|list| list.iter().map(|p| (p.doc_id, p.positions())).collect())
        .collect();

    let mut matches = Vec::new();
    for candidate in common.iter() {
        let doc_id = candidate.doc_id;
        let base_positions = position_maps[0].get(&doc_id).copied().unwrap_or(&[]);
        let mut anchors = Vec::new();
        for &p0 in base_positions {
            let satisfied = distances.iter().enumerate().all(|(k, &distance)| {
                let target = p0 as i64 + distance;
                target >= 0
                    && position_maps[k + 1]
                        .get(&doc_id)
                        .is_some_and(|positions| positions.binary_search(&(target as u32)).is_ok())
            });
            if satisfied {
                anchors.push(p0);
            }
        }
        if !anchors.is_empty() {
            matches.push(Posting::new(doc_id, anchors));
        }
    }
    matches.sort();
    Ok(SkipList::from_sorted_vec(matches))
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
