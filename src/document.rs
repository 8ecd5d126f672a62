//! Documents and the corpus they live in.

use std::collections::HashMap;

use crate::doc_id::{DocId, DocIdGenerator};
use crate::error::IrError;

/// A single document: an optional title plus a sequence of text blocks.
///
/// Equality is by `(title, content)`; identity within a [`Corpus`] is the [`DocId`] assigned
/// at construction, not any field of the document itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Document {
    pub title: Option<String>,
    content: Vec<String>,
}

impl Document {
    pub fn new(title: Option<String>, content: Vec<String>) -> Self {
        Document { title, content }
    }

    /// Convenience constructor for a single-block document.
    pub fn from_text(title: Option<&str>, text: impl Into<String>) -> Self {
        Document::new(title.map(str::to_owned), vec![text.into()])
    }

    /// Concatenation of the internal content blocks, joined by a single space, matching the
    /// corpus-producer contract's "content accessor returning a string" (§6).
    pub fn content(&self) -> String {
        self.content.join(" ")
    }

    pub fn content_blocks(&self) -> &[String] {
        &self.content
    }
}

/// Mapping from document identifier to document. Built once from a finite collection;
/// documents are never added or removed after construction.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: HashMap<DocId, Document>,
}

impl Corpus {
    /// Build a corpus from any iterable of documents, assigning each a fresh [`DocId`] from
    /// `generator`. Fails if the generator's counter space is exhausted partway through.
    pub fn build<I>(documents: I, generator: &DocIdGenerator) -> Result<Corpus, IrError>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut map = HashMap::new();
        for document in documents {
            let id = generator.next()?;
            map.insert(id, document);
        }
        Ok(Corpus { documents: map })
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn identifiers_are_unique_within_a_build() {
        let generator = DocIdGenerator::new();
        let corpus = Corpus::build(
            vec![
                Document::from_text(Some("D1"), "The cat is on the table"),
                Document::from_text(Some("D2"), "The dog is eating"),
            ],
            &generator,
        )
        .unwrap();
        assert_eq!(corpus.len(), 2);
        let ids: Vec<DocId> = corpus.iter().map(|(id, _)| id).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn equality_ignores_identifier() {
        let a = Document::from_text(Some("D1"), "same content");
        let b = Document::from_text(Some("D1"), "same content");
        assert_eq!(a, b);
    }
}
