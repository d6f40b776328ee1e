//! Character n-gram TF-IDF vectorizer for short merchant names.
//!
//! Word-boundary-aware character n-grams (each whitespace-delimited token
//! is padded with a single space on both sides and n-grams never cross
//! token edges) cope well with partial matches and misspellings in short
//! store names, which is exactly what merchant strings are.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smallest n-gram length
pub const NGRAM_MIN: usize = 2;
/// Largest n-gram length
pub const NGRAM_MAX: usize = 5;
/// Vocabulary cap; most frequent n-grams across the corpus are kept
pub const MAX_FEATURES: usize = 5000;

/// Fitted TF-IDF vectorizer over word-boundary-aware character n-grams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharGramVectorizer {
    /// n-gram -> column index, assigned in lexicographic n-gram order
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column
    idf: Vec<f64>,
    /// Documents seen during fit
    n_documents: usize,
}

/// Extract the padded n-grams of one document, lowercased.
/// Each token contributes the n-grams of " token " for n in 2..=5.
fn char_ngrams(text: &str) -> Vec<String> {
    let mut grams = Vec::new();
    for token in text.to_lowercase().split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(token.chars())
            .chain(std::iter::once(' '))
            .collect();
        for n in NGRAM_MIN..=NGRAM_MAX {
            if padded.len() < n {
                continue;
            }
            for window in padded.windows(n) {
                grams.push(window.iter().collect());
            }
        }
    }
    grams
}

impl CharGramVectorizer {
    /// Fit vocabulary and IDF weights on the training documents
    pub fn fit(documents: &[String]) -> Self {
        let n_documents = documents.len();
        let mut corpus_count: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let grams = char_ngrams(doc);
            for gram in &grams {
                *corpus_count.entry(gram.clone()).or_insert(0) += 1;
            }
            let unique: std::collections::HashSet<&String> = grams.iter().collect();
            for gram in unique {
                *document_frequency.entry(gram.clone()).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary at MAX_FEATURES by corpus frequency,
        // breaking count ties lexicographically so fits are deterministic.
        let mut ranked: Vec<(String, usize)> = corpus_count.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_FEATURES);

        // Column order is lexicographic over the kept n-grams
        let mut kept: Vec<String> = ranked.into_iter().map(|(gram, _)| gram).collect();
        kept.sort();

        let mut vocabulary = HashMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, gram) in kept.into_iter().enumerate() {
            let df = document_frequency.get(&gram).copied().unwrap_or(0);
            // smoothed IDF: ln((1 + N) / (1 + df)) + 1
            idf.push(((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(gram, idx);
        }

        Self {
            vocabulary,
            idf,
            n_documents,
        }
    }

    /// Transform a document into an L2-normalized TF-IDF vector
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];
        for gram in char_ngrams(document) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Documents seen during fit
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
