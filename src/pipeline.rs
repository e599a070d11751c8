//! End-to-end extraction: parse a corpus document, score every record
//! against the requested word, and rank by confidence.

use crate::extract::{extract_document, ExtractError, HomeArea};
use crate::models::{ResponseMetadata, TranslationCandidate, SOURCE_CORPUS};
use crate::score;

/// The complete result of one extraction run.
#[derive(Debug, serde::Serialize)]
pub struct Extraction {
    pub metadata: ResponseMetadata,
    pub translations: Vec<TranslationCandidate>,
}

/// Runs the pipeline for one document and one search word.
///
/// Records come back sorted by confidence, highest first. The sort is
/// stable, so records with equal confidence keep their document order.
pub fn run(xml: &str, word: &str, home: &HomeArea) -> Result<Extraction, ExtractError> {
    let (metadata, records) = extract_document(xml, home)?;

    let mut translations: Vec<TranslationCandidate> = records
        .into_iter()
        .map(|record| {
            let confidence = score::confidence(
                word,
                &record.meaning,
                &record.evidence,
                record.grammar.as_deref(),
            );
            TranslationCandidate {
                german_word: word.to_string(),
                franconian_word: record.evidence.clone(),
                meaning: record.meaning,
                evidence: record.evidence,
                location: record.location,
                grammar: record.grammar,
                etymology: record.etymology,
                confidence,
                source: SOURCE_CORPUS,
            }
        })
        .collect();

    translations.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(Extraction {
        metadata,
        translations,
    })
}
