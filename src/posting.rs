//! Postings: occurrence records for a (term, document) pair.

use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::doc_id::DocId;
use crate::skiplist::SkipList;

/// `(document identifier, sorted positions, creation timestamp)`.
///
/// Equality and ordering ignore `created_at`: equality is by `(doc_id, positions)`, and
/// natural order is by `doc_id`, tie-broken by lexicographic comparison of `positions`.
/// Invariant: `positions` is strictly increasing.
#[derive(Debug, Clone)]
pub struct Posting {
    pub doc_id: DocId,
    positions: Vec<u32>,
    created_at: u128,
}

impl Posting {
    pub fn new(doc_id: DocId, positions: Vec<u32>) -> Self {
        debug_assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "posting positions must be strictly increasing"
        );
        Posting {
            doc_id,
            positions,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
        }
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }
}

impl PartialEq for Posting {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id && self.positions == other.positions
    }
}
impl Eq for Posting {}

impl PartialOrd for Posting {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Posting {
    fn cmp(&self, other: &Self) -> Ordering {
        self.doc_id
            .cmp(&other.doc_id)
            .then_with(|| self.positions.cmp(&other.positions))
    }
}

/// Compare two postings purely by document identifier, ignoring positions. Used when
/// combining posting lists from *different* terms (AND/OR/NOT), where position arrays are
/// not comparable to begin with.
pub fn cmp_by_doc_id(a: &Posting, b: &Posting) -> Ordering {
    a.doc_id.cmp(&b.doc_id)
}

/// A skip-augmented sorted sequence of distinct postings ordered by document identifier.
pub type PostingList = SkipList<Posting>;

pub fn posting_list_from_postings(mut postings: Vec<Posting>) -> PostingList {
    postings.sort();
    postings.dedup_by(|a, b| a == b);
    SkipList::from_sorted_vec(postings)
}
