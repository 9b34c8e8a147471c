//! Cross-module tests for the feature extraction pipeline.

use ndarray::s;

use super::extractor::{extract, VocabularyMode};
use super::layout::STRUCTURAL_COUNT;
use super::text::TfidfVectorizer;
use crate::logic::record::BidRecord;

fn bid(id: i64, amount: f64, proposal: &str, submitted_at: Option<&str>) -> BidRecord {
    BidRecord {
        id,
        tender_id: 1,
        company_name: "Northfield Civil Works".to_string(),
        contact_email: "tenders@northfield.example".to_string(),
        bid_amount: amount,
        proposal: proposal.to_string(),
        submitted_at: submitted_at.map(str::to_string),
    }
}

fn corpus() -> Vec<BidRecord> {
    vec![
        bid(
            1,
            98_000.0,
            "Full resurfacing of the access road including drainage and signage",
            Some("2024-03-04 10:00:00"),
        ),
        bid(
            2,
            101_500.0,
            "Resurfacing and drainage works with certified road crews",
            Some("2024-03-04 14:30:00"),
        ),
        bid(
            3,
            95_250.0,
            "Road resurfacing, signage replacement and drainage maintenance",
            Some("2024-03-05 09:15:00"),
        ),
    ]
}

#[test]
fn test_fit_extracts_structural_and_lexical_blocks() {
    let records = corpus();
    let mut vectorizer = TfidfVectorizer::new(100);
    let matrix = extract(&records, VocabularyMode::Fit(&mut vectorizer));

    assert_eq!(matrix.nrows(), 3);
    assert_eq!(matrix.ncols(), STRUCTURAL_COUNT + vectorizer.vocab_len());
    assert!(vectorizer.vocab_len() > 0);

    // Structural slots of the first record
    assert_eq!(matrix[[0, 0]], 98_000.0);
    assert_eq!(matrix[[0, 3]], 10.0); // hour
    assert_eq!(matrix[[0, 4]], 0.0); // Monday

    // Shared vocabulary gives every record lexical weight
    for i in 0..3 {
        let lexical = matrix.slice(s![i, STRUCTURAL_COUNT..]);
        assert!(lexical.iter().any(|&w| w > 0.0));
    }
}

#[test]
fn test_reuse_keeps_width_and_ignores_unseen_terms() {
    let records = corpus();
    let mut vectorizer = TfidfVectorizer::new(100);
    let trained = extract(&records, VocabularyMode::Fit(&mut vectorizer));

    let unseen = vec![bid(
        9,
        30_000.0,
        "Zeppelin catering flotilla",
        Some("2024-03-06 03:00:00"),
    )];
    let matrix = extract(&unseen, VocabularyMode::Reuse(&vectorizer));

    assert_eq!(matrix.ncols(), trained.ncols());
    let lexical = matrix.slice(s![0, STRUCTURAL_COUNT..]);
    assert!(lexical.iter().all(|&w| w == 0.0));
}

#[test]
fn test_reuse_matches_fit_transform_for_training_rows() {
    let records = corpus();
    let mut vectorizer = TfidfVectorizer::new(100);
    let fitted = extract(&records, VocabularyMode::Fit(&mut vectorizer));
    let reused = extract(&records, VocabularyMode::Reuse(&vectorizer));

    assert_eq!(fitted, reused);
}

#[test]
fn test_missing_timestamp_equals_explicit_fallback_slot() {
    // 2024-03-06 is a Wednesday (weekday 2); fallback is hour 12, weekday 2.
    let implicit = vec![bid(1, 50_000.0, "Drainage proposal", None)];
    let explicit = vec![bid(
        1,
        50_000.0,
        "Drainage proposal",
        Some("2024-03-06 12:30:00"),
    )];

    let mut vectorizer = TfidfVectorizer::new(100);
    let a = extract(&implicit, VocabularyMode::Fit(&mut vectorizer));
    let b = extract(&explicit, VocabularyMode::Reuse(&vectorizer));

    assert_eq!(
        a.slice(s![0, ..STRUCTURAL_COUNT]),
        b.slice(s![0, ..STRUCTURAL_COUNT])
    );
    assert_eq!(a[[0, 3]], 12.0);
    assert_eq!(a[[0, 4]], 2.0);
}

#[test]
fn test_zero_records_yield_empty_matrix() {
    let mut vectorizer = TfidfVectorizer::new(100);
    let fitted = extract(&[], VocabularyMode::Fit(&mut vectorizer));
    assert_eq!(fitted.nrows(), 0);
    assert!(!vectorizer.is_fitted());

    let mut trained = TfidfVectorizer::new(100);
    extract(&corpus(), VocabularyMode::Fit(&mut trained));
    let reused = extract(&[], VocabularyMode::Reuse(&trained));
    assert_eq!(reused.nrows(), 0);
    assert_eq!(reused.ncols(), STRUCTURAL_COUNT + trained.vocab_len());
}
