//! Combined Feature Matrix
//!
//! Assembles the structural and lexical blocks into one `(n, 5 + vocab)`
//! matrix. Whether the lexical vocabulary is learned or reused is decided
//! by the borrow mode, not by hidden vectorizer state.

use ndarray::{s, Array2};

use super::layout::STRUCTURAL_COUNT;
use super::structural::structural_features;
use super::text::TfidfVectorizer;
use crate::logic::record::BidRecord;

/// How the lexical block treats its vocabulary.
///
/// `Fit` learns a fresh vocabulary from the given records (training);
/// `Reuse` applies a previously learned vocabulary verbatim (inference).
pub enum VocabularyMode<'a> {
    Fit(&'a mut TfidfVectorizer),
    Reuse(&'a TfidfVectorizer),
}

/// Extract the feature matrix for an ordered batch of bids.
///
/// Row order matches record order. Zero records produce a zero-row matrix,
/// not an error.
pub fn extract(records: &[BidRecord], mode: VocabularyMode<'_>) -> Array2<f32> {
    let documents: Vec<String> = records.iter().map(BidRecord::combined_text).collect();

    let vectorizer: &TfidfVectorizer = match mode {
        VocabularyMode::Fit(vectorizer) => {
            if !records.is_empty() {
                vectorizer.fit(&documents);
            }
            &*vectorizer
        }
        VocabularyMode::Reuse(vectorizer) => vectorizer,
    };

    let width = STRUCTURAL_COUNT + vectorizer.vocab_len();
    let mut matrix = Array2::zeros((records.len(), width));
    if records.is_empty() {
        return matrix;
    }

    for (i, record) in records.iter().enumerate() {
        let structural = structural_features(record);
        for (j, value) in structural.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    let text = vectorizer.transform(&documents);
    matrix.slice_mut(s![.., STRUCTURAL_COUNT..]).assign(&text);

    matrix
}
