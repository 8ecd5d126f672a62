//! A normalized token paired with its posting list.

use crate::error::IrError;
use crate::posting::{cmp_by_doc_id, Posting, PostingList};
use crate::skiplist::{self, SkipList};

#[derive(Debug, Clone)]
pub struct Term {
    pub token: String,
    pub postings: PostingList,
}

impl Term {
    pub fn singleton(token: impl Into<String>, posting: Posting) -> Self {
        Term {
            token: token.into(),
            postings: SkipList::from_sorted_vec(vec![posting]),
        }
    }

    pub fn new(token: impl Into<String>, postings: PostingList) -> Self {
        Term {
            token: token.into(),
            postings,
        }
    }

    /// Concatenate `self` and `other`'s posting lists with deduplication and re-finalize
    /// skip pointers. Fails with [`IrError::IncompatibleTerms`] when tokens differ.
    pub fn merge(self, other: Term) -> Result<Term, IrError> {
        if self.token != other.token {
            return Err(IrError::IncompatibleTerms {
                left: self.token,
                right: other.token,
            });
        }
        let merged = skiplist::union(&self.postings, &other.postings, cmp_by_doc_id);
        Ok(Term {
            token: self.token,
            postings: SkipList::from_sorted_vec(merged),
        })
    }

    pub fn document_frequency(&self) -> usize {
        self.postings.len()
    }

    pub fn collection_frequency(&self) -> usize {
        self.postings.iter().map(|p| p.positions().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_id::DocId;

    #[test]
    fn merge_concatenates_and_dedups() {
        let a = Term::singleton("cat", Posting::new(DocId::from_raw(1), vec![0]));
        let b = Term::singleton("cat", Posting::new(DocId::from_raw(2), vec![3]));
        let merged = a.merge(b).unwrap();
        assert_eq!(merged.document_frequency(), 2);
    }

    #[test]
    fn merge_rejects_mismatched_tokens() {
        let a = Term::singleton("cat", Posting::new(DocId::from_raw(1), vec![0]));
        let b = Term::singleton("dog", Posting::new(DocId::from_raw(1), vec![0]));
        match a.merge(b) {
            Err(IrError::IncompatibleTerms { .. }) => {}
            other => panic!("expected IncompatibleTerms, got {other:?}"),
        }
    }
}
