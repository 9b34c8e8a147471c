//! Lexical Feature Extraction - TF-IDF Vectorizer
//!
//! Learns a bounded vocabulary over the combined proposal + company-name
//! text at training time and reuses it verbatim at inference time. Terms
//! outside the frozen vocabulary contribute nothing; they never trigger a
//! re-fit.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tokens are runs of two or more word characters, lowercased.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // The pattern is a literal and always compiles.
    Regex::new(r"\b\w\w+\b").unwrap()
});

/// Standard English stop words, excluded from the vocabulary.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
        "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it",
        "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
        "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
        "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Tokenize a document: lowercase, split on the token pattern, drop stop words.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectorizer with a bounded, frozen vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    /// term -> column index, indices assigned in alphabetical term order
    vocabulary: HashMap<String, usize>,
    /// smooth inverse document frequency per column
    idf: Vec<f32>,
    /// corpus size seen at fit time; zero means unfitted
    n_documents: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Width of the lexical block. At most `max_features`, smaller when the
    /// training corpus held fewer distinct terms.
    pub fn vocab_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        self.n_documents > 0
    }

    /// Learn vocabulary and idf weights from a training corpus.
    ///
    /// The top `max_features` terms by total corpus frequency are kept
    /// (ties broken alphabetically); everything learned here is frozen
    /// until the next full retrain.
    pub fn fit(&mut self, documents: &[String]) {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let unique: HashSet<String> = tokens.iter().cloned().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
            for token in tokens {
                *corpus_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms, then index the survivors alphabetically.
        let mut ranked: Vec<(String, usize)> = corpus_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency.get(&term).copied().unwrap_or(0) as f32;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();
    }

    /// Project documents onto the frozen vocabulary.
    ///
    /// Term counts are weighted by idf and each row is L2-normalized.
    /// Unseen terms contribute zero weight.
    pub fn transform(&self, documents: &[String]) -> Array2<f32> {
        let width = self.vocab_len();
        let mut matrix = Array2::zeros((documents.len(), width));

        for (i, doc) in documents.iter().enumerate() {
            let mut row = matrix.row_mut(i);
            for token in tokenize(doc) {
                if let Some(&idx) = self.vocabulary.get(&token) {
                    row[idx] += 1.0;
                }
            }
            for (idx, weight) in row.iter_mut().enumerate() {
                *weight *= self.idf[idx];
            }
            let norm = row.iter().map(|w| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|w| w / norm);
            }
        }

        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("We will deliver the bridge in 12 months, on budget");
        assert_eq!(tokens, vec!["deliver", "bridge", "12", "months", "budget"]);
    }

    #[test]
    fn test_fit_builds_bounded_vocabulary() {
        let corpus = docs(&[
            "road construction and paving services",
            "bridge construction services",
            "paving and road maintenance",
        ]);
        let mut vectorizer = TfidfVectorizer::new(3);
        vectorizer.fit(&corpus);

        assert!(vectorizer.is_fitted());
        assert_eq!(vectorizer.vocab_len(), 3);
    }

    #[test]
    fn test_transform_rows_are_l2_normalized() {
        let corpus = docs(&["concrete supply", "steel supply", "concrete and steel"]);
        let mut vectorizer = TfidfVectorizer::new(10);
        vectorizer.fit(&corpus);

        let matrix = vectorizer.transform(&corpus);
        for row in matrix.rows() {
            let norm = row.iter().map(|w| w * w).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unseen_terms_contribute_zero() {
        let corpus = docs(&["concrete supply", "steel supply"]);
        let mut vectorizer = TfidfVectorizer::new(10);
        vectorizer.fit(&corpus);

        let matrix = vectorizer.transform(&docs(&["quantum blockchain synergy"]));
        assert!(matrix.row(0).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let corpus = docs(&[
            "road construction and paving services",
            "bridge construction services",
        ]);
        let mut a = TfidfVectorizer::new(50);
        a.fit(&corpus);
        let mut b = TfidfVectorizer::new(50);
        b.fit(&corpus);

        assert_eq!(a.transform(&corpus), b.transform(&corpus));
    }

    #[test]
    fn test_empty_corpus_yields_empty_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&docs(&["", "   "]));
        assert_eq!(vectorizer.vocab_len(), 0);

        let matrix = vectorizer.transform(&docs(&["anything"]));
        assert_eq!(matrix.dim(), (1, 0));
    }
}
