use std::collections::HashMap;

use crate::data::dataset::Dataset;

/// Bag-of-words feature extractor over a fixed vocabulary.
///
/// The vector position of each word matches the dataset column it was
/// trained on, so `vectorize` output can be fed straight into a network
/// trained on that dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorizer {
    vocabulary: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl Vectorizer {
    pub fn new(vocabulary: Vec<String>) -> Vectorizer {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, word) in vocabulary.iter().enumerate() {
            positions.entry(word.to_lowercase()).or_default().push(i);
        }
        Vectorizer { vocabulary, positions }
    }

    /// Uses the dataset's feature column names as the vocabulary.
    pub fn from_dataset(dataset: &Dataset) -> Vectorizer {
        Vectorizer::new(dataset.feature_names().to_vec())
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Counts vocabulary words in `text`.
    ///
    /// Text is lowercased and split on whitespace and ASCII punctuation. A
    /// word listed more than once in the vocabulary is counted at every
    /// position.
    pub fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        let lowered = text.to_lowercase();
        for token in tokenize(&lowered) {
            if let Some(slots) = self.positions.get(token) {
                for &i in slots {
                    counts[i] += 1.0;
                }
            }
        }
        counts
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|t| !t.is_empty())
}
