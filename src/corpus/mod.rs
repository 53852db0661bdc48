//! Ordered label -> phrase collections.
//!
//! A [`Corpus`] is both the seed data a registry is built from and the
//! labeled dataset the evaluation harness scores against. Label order is the
//! order of insertion (or of appearance in the JSON source) and is what makes
//! registry tie-breaks and evaluation runs reproducible.

pub mod builtin;
mod error;


pub use error::CorpusError;

use std::path::Path;

use serde_json::{Map, Value};

/// Ordered mapping of label to example phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<(String, Vec<String>)>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a label, builder style.
    pub fn with_label<L, I, S>(mut self, label: L, phrases: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(label, phrases);
        self
    }

    /// Adds a label. An existing label is replaced in place.
    pub fn insert<L, I, S>(&mut self, label: L, phrases: I)
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();

        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = phrases,
            None => self.entries.push((label, phrases)),
        }
    }

    /// Parses a JSON object such as `{"greet": ["hello", "hi"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(CorpusError::NotAnObject);
        };
        Self::from_map(map)
    }

    /// Reads and parses a JSON corpus file.
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, CorpusError> {
        let mut corpus = Self::new();
        for (label, value) in map {
            let phrases: Vec<String> = serde_json::from_value(value)
                .map_err(|_| CorpusError::InvalidEntry {
                    label: label.clone(),
                })?;
            corpus.entries.push((label, phrases));
        }
        Ok(corpus)
    }

    /// Iterates `(label, phrases)` in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(label, phrases)| (label.as_str(), phrases.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, phrases)| phrases.as_slice())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of phrases across all labels.
    pub fn total_examples(&self) -> usize {
        self.entries.iter().map(|(_, phrases)| phrases.len()).sum()
    }
}

impl<L, S> FromIterator<(L, Vec<S>)> for Corpus
where
    L: Into<String>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, Vec<S>)>>(iter: T) -> Self {
        let mut corpus = Corpus::new();
        for (label, phrases) in iter {
            corpus.insert(label, phrases);
        }
        corpus
    }
}
