//! Core data models for the extraction pipeline.
//!
//! These types represent the translation records and document metadata that
//! flow out of the extractor and scorer. They are constructed once per
//! request, immutable thereafter, and serialized directly in CLI and
//! tool-server output.

use serde::Serialize;

/// Dictionary corpus identifier carried on every record.
pub const SOURCE_CORPUS: &str = "BDO-WBF";

/// One extracted dialect-translation record.
///
/// `franconian_word` holds the evidence transcription, which is the actual
/// dialect form; the headword (`lemma`) in the corpus is the standard-German
/// dictionary form.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationCandidate {
    pub german_word: String,
    pub franconian_word: String,
    pub meaning: String,
    pub evidence: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    /// Heuristic confidence in [0, 1]; computed, never persisted on its own.
    pub confidence: f64,
    pub source: &'static str,
}

/// Metadata from the document's `<info>` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMetadata {
    pub result_count: i64,
    pub timestamp: String,
    pub api_version: &'static str,
    pub licence: &'static str,
}

impl ResponseMetadata {
    pub fn new(result_count: i64, timestamp: String) -> Self {
        Self {
            result_count,
            timestamp,
            api_version: "1.0",
            licence: "CC-BY",
        }
    }
}
