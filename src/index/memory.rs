//! In-memory position index.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{NearSpanError, Result};
use crate::index::PositionIndex;
use crate::spans::{DocId, EmptyPositionStream, PositionStream, VecPositionStream};

/// Per-term postings: document to sorted token positions.
type Postings = BTreeMap<DocId, Vec<u32>>;

/// A position index held entirely in memory.
///
/// Text is split into Unicode words and lowercased; each word occupies one
/// position, counted from zero per field and document.
#[derive(Debug, Default, Clone)]
pub struct MemoryPositionIndex {
    fields: HashMap<String, HashMap<String, Postings>>,
    doc_count: u32,
}

impl MemoryPositionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split text into lowercased Unicode words.
    pub fn tokenize(text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_lowercase).collect()
    }

    /// Add a document made of `(field, text)` pairs and return its id.
    ///
    /// A document without fields still consumes an id. Fails once every
    /// document id is taken or a field holds more tokens than positions can
    /// address; the index is left unchanged in that case.
    pub fn add_document<F, T, I>(&mut self, fields: I) -> Result<DocId>
    where
        F: Into<String>,
        T: AsRef<str>,
        I: IntoIterator<Item = (F, T)>,
    {
        let doc = self.doc_count;
        let next_doc = doc
            .checked_add(1)
            .ok_or_else(|| NearSpanError::other(format!("index is full at {doc} documents")))?;

        let mut tokenized: Vec<(String, Vec<String>)> = Vec::new();
        for (field, text) in fields {
            let tokens = Self::tokenize(text.as_ref());
            // The last position needs room for its exclusive end.
            if !u32::try_from(tokens.len()).is_ok_and(|count| count < u32::MAX) {
                return Err(NearSpanError::other(format!(
                    "document {doc} has too many tokens in one field: {}",
                    tokens.len()
                )));
            }
            tokenized.push((field.into(), tokens));
        }

        for (field, tokens) in tokenized {
            let terms = self.fields.entry(field).or_default();
            for (position, token) in (0u32..).zip(tokens) {
                terms
                    .entry(token)
                    .or_default()
                    .entry(doc)
                    .or_default()
                    .push(position);
            }
        }
        self.doc_count = next_doc;
        Ok(doc)
    }

    /// Number of distinct terms in a field.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, HashMap::len)
    }
}

impl PositionIndex for MemoryPositionIndex {
    fn doc_count(&self) -> u64 {
        self.doc_count as u64
    }

    fn positions(&self, field: &str, term: &str) -> Result<Box<dyn PositionStream>> {
        let term = term.to_lowercase();
        let Some(postings) = self.fields.get(field).and_then(|terms| terms.get(&term)) else {
            debug!("no postings for {field}:{term}");
            return Ok(Box::new(EmptyPositionStream::new()));
        };

        let docs = postings
            .iter()
            .map(|(doc, positions)| (*doc, positions.clone()))
            .collect();
        Ok(Box::new(VecPositionStream::from_positions(docs)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::PositionInterval;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            MemoryPositionIndex::tokenize("The Quick, brown fox!"),
            vec!["the", "quick", "brown", "fox"]
        );
        assert!(MemoryPositionIndex::tokenize("  ").is_empty());
    }

    #[test]
    fn test_positions_per_field() {
        let mut index = MemoryPositionIndex::new();
        let first = index
            .add_document([("title", "Fox news"), ("body", "the fox and the hound")])
            .unwrap();
        let empty = index.add_document(Vec::<(String, String)>::new()).unwrap();
        let third = index.add_document([("body", "no match here")]).unwrap();

        assert_eq!((first, empty, third), (0, 1, 2));
        assert_eq!(index.doc_count(), 3);
        assert_eq!(index.term_count("body"), 7);

        let mut body = index.positions("body", "THE").unwrap();
        assert!(body.next().unwrap());
        assert_eq!(body.doc_id(), Some(0));
        assert_eq!(body.interval(), Some(PositionInterval::at(0)));
        assert!(body.next().unwrap());
        assert_eq!(body.interval(), Some(PositionInterval::at(3)));
        assert!(!body.next().unwrap());

        let mut title = index.positions("title", "fox").unwrap();
        assert!(title.next().unwrap());
        assert_eq!(title.interval(), Some(PositionInterval::at(0)));

        assert_eq!(index.term_doc_freq("body", "fox").unwrap(), 1);
        assert_eq!(index.term_doc_freq("body", "missing").unwrap(), 0);
        assert!(!index.positions("missing", "fox").unwrap().next().unwrap());
    }

    #[test]
    fn test_add_document_when_full() {
        let mut index = MemoryPositionIndex {
            doc_count: u32::MAX,
            ..Default::default()
        };

        let err = index.add_document([("body", "one more")]).unwrap_err();
        assert!(matches!(err, NearSpanError::Other(_)));
        assert_eq!(index.doc_count(), u64::from(u32::MAX));
        assert_eq!(index.term_count("body"), 0);
    }
}
