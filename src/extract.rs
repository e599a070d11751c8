//! Validated extraction of translation records from a corpus XML document.
//!
//! Failure model is two-tier: document-level structural problems (empty
//! input, malformed markup, missing `<info>` metadata) abort the whole
//! extraction with a typed [`ExtractError`]; entry-level problems (missing
//! headword, missing meaning, no usable evidence) silently drop only the
//! affected `<artikel>` and extraction continues.
//!
//! Expected document shape: a root holding one `<info>` node (with
//! `<result_count>` and `<timestamp>` children) and zero or more `<artikel>`
//! nodes, each with `<lemma>`, `<bedeutung>`, zero or more `<beleg-angabe>`
//! blocks (`<beleg-text>` plus a `<beleg-region ort=… landkreis=…>`
//! descriptor), an optional `<grammatik wortart=… genus=…>` and an optional
//! `<etymologie>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::models::ResponseMetadata;

/// Preferred town/district used to tie-break among evidence blocks.
#[derive(Debug, Clone)]
pub struct HomeArea {
    pub district_code: String,
    pub town: String,
}

impl Default for HomeArea {
    fn default() -> Self {
        Self {
            district_code: "AN".to_string(),
            town: "Ansbach".to_string(),
        }
    }
}

/// Document-level validation failure. Entry-level defects never surface
/// here; they drop the single entry instead.
#[derive(Debug)]
pub enum ExtractError {
    EmptyDocument,
    Malformed(String),
    MissingMetadata,
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::EmptyDocument => write!(f, "empty corpus document"),
            ExtractError::Malformed(e) => write!(f, "malformed corpus markup: {}", e),
            ExtractError::MissingMetadata => {
                write!(f, "corpus document is missing its metadata node")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// One extracted record before scoring.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub lemma: String,
    pub meaning: String,
    pub evidence: String,
    pub location: String,
    pub grammar: Option<String>,
    pub etymology: Option<String>,
}

/// Which element's text is currently being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    ResultCount,
    Timestamp,
    Lemma,
    Meaning,
    EvidenceText,
    Etymology,
}

/// One `<beleg-angabe>` block under construction.
#[derive(Debug, Default)]
struct EvidenceBlock {
    text: Option<String>,
    has_region: bool,
    town: String,
    district: String,
}

/// One `<artikel>` under construction.
#[derive(Debug, Default)]
struct EntryBuilder {
    lemma: Option<String>,
    meaning: Option<String>,
    blocks: Vec<EvidenceBlock>,
    word_class: Option<String>,
    gender: Option<String>,
    etymology: Option<String>,
}

/// Parses a raw document into metadata and raw records.
///
/// The whole document is walked before anything is returned, so a structural
/// failure can never yield a partial result.
pub fn extract_document(
    xml: &str,
    home: &HomeArea,
) -> Result<(ResponseMetadata, Vec<RawRecord>), ExtractError> {
    if xml.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut saw_info = false;
    let mut in_info = false;
    let mut result_count_text = String::new();
    let mut timestamp_text = String::new();

    let mut capture = Capture::None;
    let mut pending = String::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut block: Option<EvidenceBlock> = None;
    let mut records: Vec<RawRecord> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"info" => {
                    saw_info = true;
                    in_info = true;
                }
                b"result_count" if in_info => {
                    capture = Capture::ResultCount;
                    pending.clear();
                }
                b"timestamp" if in_info => {
                    capture = Capture::Timestamp;
                    pending.clear();
                }
                b"artikel" => {
                    entry = Some(EntryBuilder::default());
                    block = None;
                }
                b"lemma" if entry.is_some() => {
                    capture = Capture::Lemma;
                    pending.clear();
                }
                b"bedeutung" if entry.is_some() => {
                    capture = Capture::Meaning;
                    pending.clear();
                }
                b"beleg-angabe" if entry.is_some() => {
                    block = Some(EvidenceBlock::default());
                }
                b"beleg-text" if block.is_some() => {
                    capture = Capture::EvidenceText;
                    pending.clear();
                }
                b"beleg-region" => {
                    if let Some(ref mut b) = block {
                        apply_region_attributes(&e, b);
                    }
                }
                b"grammatik" => {
                    if let Some(ref mut en) = entry {
                        apply_grammar_attributes(&e, en);
                    }
                }
                b"etymologie" if entry.is_some() => {
                    capture = Capture::Etymology;
                    pending.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"beleg-region" => {
                    if let Some(ref mut b) = block {
                        apply_region_attributes(&e, b);
                    }
                }
                b"grammatik" => {
                    if let Some(ref mut en) = entry {
                        apply_grammar_attributes(&e, en);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if capture != Capture::None {
                    pending.push_str(t.unescape().unwrap_or_default().as_ref());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"info" => in_info = false,
                b"result_count" => {
                    if capture == Capture::ResultCount {
                        result_count_text = std::mem::take(&mut pending);
                        capture = Capture::None;
                    }
                }
                b"timestamp" => {
                    if capture == Capture::Timestamp {
                        timestamp_text = std::mem::take(&mut pending);
                        capture = Capture::None;
                    }
                }
                b"lemma" => {
                    if capture == Capture::Lemma {
                        if let Some(ref mut en) = entry {
                            if en.lemma.is_none() {
                                en.lemma = Some(std::mem::take(&mut pending));
                            }
                        }
                        capture = Capture::None;
                    }
                }
                b"bedeutung" => {
                    if capture == Capture::Meaning {
                        if let Some(ref mut en) = entry {
                            if en.meaning.is_none() {
                                en.meaning = Some(std::mem::take(&mut pending));
                            }
                        }
                        capture = Capture::None;
                    }
                }
                b"beleg-text" => {
                    if capture == Capture::EvidenceText {
                        if let Some(ref mut b) = block {
                            if b.text.is_none() {
                                b.text = Some(std::mem::take(&mut pending));
                            }
                        }
                        capture = Capture::None;
                    }
                }
                b"beleg-angabe" => {
                    if let (Some(ref mut en), Some(b)) = (entry.as_mut(), block.take()) {
                        en.blocks.push(b);
                    }
                }
                b"etymologie" => {
                    if capture == Capture::Etymology {
                        if let Some(ref mut en) = entry {
                            if en.etymology.is_none() {
                                en.etymology = Some(std::mem::take(&mut pending));
                            }
                        }
                        capture = Capture::None;
                    }
                }
                b"artikel" => {
                    if let Some(en) = entry.take() {
                        if let Some(record) = finalize_entry(en, home) {
                            records.push(record);
                        }
                    }
                    block = None;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Malformed(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !saw_info {
        return Err(ExtractError::MissingMetadata);
    }

    let result_count = result_count_text.trim().parse::<i64>().unwrap_or(0);
    let metadata = ResponseMetadata::new(result_count, timestamp_text.trim().to_string());

    Ok((metadata, records))
}

fn apply_region_attributes(e: &BytesStart<'_>, block: &mut EvidenceBlock) {
    block.has_region = true;
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().unwrap_or_default();
        match attr.key.as_ref() {
            b"ort" => block.town = value.trim().to_string(),
            b"landkreis" => block.district = value.trim().to_string(),
            _ => {}
        }
    }
}

fn apply_grammar_attributes(e: &BytesStart<'_>, entry: &mut EntryBuilder) {
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().unwrap_or_default();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match attr.key.as_ref() {
            b"wortart" => entry.word_class = Some(value.to_string()),
            b"genus" => entry.gender = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Applies the entry-local drop rules and the home-area evidence tie-break.
/// Returns `None` when the entry must be silently dropped.
fn finalize_entry(entry: EntryBuilder, home: &HomeArea) -> Option<RawRecord> {
    let lemma = non_empty(entry.lemma)?;
    let meaning = non_empty(entry.meaning)?;

    let mut home_match: Option<(String, String)> = None;
    let mut fallback: Option<(String, String)> = None;

    for block in &entry.blocks {
        // Blocks without a transcription or region descriptor are unusable.
        if !block.has_region {
            continue;
        }
        let text = match block.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };

        let location = if !block.district.is_empty() {
            format!("{}, Landkreis {}", block.town, block.district)
        } else {
            block.town.clone()
        };

        if block.district == home.district_code || block.town.contains(&home.town) {
            home_match = Some((text.to_string(), location));
            break;
        }
        // First usable block is the fallback; keep scanning for a home match.
        if fallback.is_none() && !location.is_empty() {
            fallback = Some((text.to_string(), location));
        }
    }

    let (evidence, location) = home_match.or(fallback)?;

    let grammar = match (entry.word_class, entry.gender) {
        (None, None) => None,
        (word_class, gender) => {
            let joined = format!(
                "{} {}",
                word_class.as_deref().unwrap_or(""),
                gender.as_deref().unwrap_or("")
            );
            Some(joined.trim().to_string())
        }
    };

    let etymology = non_empty(entry.etymology);

    Some(RawRecord {
        lemma,
        meaning,
        evidence,
        location,
        grammar,
        etymology,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> HomeArea {
        HomeArea::default()
    }

    const EMPTY_DOC: &str = r#"<?xml version="1.0"?>
<wbf>
  <info>
    <result_count>0</result_count>
    <timestamp>2024-03-01T12:00:00</timestamp>
  </info>
</wbf>"#;

    fn doc_with_entries(entries: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<wbf>
  <info>
    <result_count>1</result_count>
    <timestamp>2024-03-01T12:00:00</timestamp>
  </info>
  {entries}
</wbf>"#
        )
    }

    const FULL_ENTRY: &str = r#"<artikel>
    <lemma>klein</lemma>
    <bedeutung>klein, winzig</bedeutung>
    <beleg-angabe>
      <beleg-text>glaa</beleg-text>
      <beleg-region ort="Feuchtwangen" landkreis="AN"/>
    </beleg-angabe>
    <grammatik wortart="Adjektiv"/>
    <etymologie>mhd. kleine</etymologie>
  </artikel>"#;

    #[test]
    fn empty_document_is_fatal() {
        assert!(matches!(
            extract_document("", &home()),
            Err(ExtractError::EmptyDocument)
        ));
        assert!(matches!(
            extract_document("   \n\t  ", &home()),
            Err(ExtractError::EmptyDocument)
        ));
    }

    #[test]
    fn malformed_markup_is_fatal() {
        let err = extract_document("<wbf><info></wbf>", &home()).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }

    #[test]
    fn missing_metadata_is_fatal_even_with_valid_entries() {
        let xml = format!("<wbf>{FULL_ENTRY}</wbf>");
        assert!(matches!(
            extract_document(&xml, &home()),
            Err(ExtractError::MissingMetadata)
        ));
    }

    #[test]
    fn zero_entries_with_metadata_succeeds() {
        let (metadata, records) = extract_document(EMPTY_DOC, &home()).unwrap();
        assert_eq!(metadata.result_count, 0);
        assert_eq!(metadata.timestamp, "2024-03-01T12:00:00");
        assert!(records.is_empty());
    }

    #[test]
    fn unparsable_result_count_defaults_to_zero() {
        let xml = r#"<wbf><info><result_count>many</result_count></info></wbf>"#;
        let (metadata, _) = extract_document(xml, &home()).unwrap();
        assert_eq!(metadata.result_count, 0);
        assert_eq!(metadata.timestamp, "");
    }

    #[test]
    fn full_entry_is_extracted() {
        let xml = doc_with_entries(FULL_ENTRY);
        let (metadata, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(metadata.result_count, 1);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.lemma, "klein");
        assert_eq!(record.meaning, "klein, winzig");
        assert_eq!(record.evidence, "glaa");
        assert_eq!(record.location, "Feuchtwangen, Landkreis AN");
        assert_eq!(record.grammar.as_deref(), Some("Adjektiv"));
        assert_eq!(record.etymology.as_deref(), Some("mhd. kleine"));
    }

    #[test]
    fn entry_without_lemma_is_dropped() {
        let xml = doc_with_entries(
            r#"<artikel>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn entry_without_meaning_is_dropped() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn entry_without_usable_evidence_is_dropped() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text></beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn bad_entry_does_not_poison_the_rest() {
        let xml = doc_with_entries(&format!(
            "<artikel><bedeutung>kaputt</bedeutung></artikel>\n  {FULL_ENTRY}"
        ));
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lemma, "klein");
    }

    #[test]
    fn home_district_block_wins_over_earlier_fallback() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>winzich</beleg-text>
        <beleg-region ort="Hof" landkreis="HO"/>
      </beleg-angabe>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].evidence, "glaa");
        assert_eq!(records[0].location, "Feuchtwangen, Landkreis AN");
    }

    #[test]
    fn home_town_substring_matches_without_district_code() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>winzich</beleg-text>
        <beleg-region ort="Hof" landkreis="HO"/>
      </beleg-angabe>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Ansbach-Eyb" landkreis=""/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].evidence, "glaa");
        assert_eq!(records[0].location, "Ansbach-Eyb");
    }

    #[test]
    fn first_usable_block_is_the_fallback() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>winzich</beleg-text>
        <beleg-region ort="Hof" landkreis="HO"/>
      </beleg-angabe>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Bamberg" landkreis="BA"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].evidence, "winzich");
        assert_eq!(records[0].location, "Hof, Landkreis HO");
    }

    #[test]
    fn block_without_region_descriptor_is_skipped() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>ohne region</beleg-text>
      </beleg-angabe>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Hof" landkreis="HO"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].evidence, "glaa");
    }

    #[test]
    fn bare_town_location_when_district_missing() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Dinkelsbühl"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].location, "Dinkelsbühl");
    }

    #[test]
    fn grammar_joins_word_class_and_gender() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>bub</lemma>
      <bedeutung>junge</bedeutung>
      <beleg-angabe>
        <beleg-text>bou</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
      <grammatik wortart="Substantiv" genus="M"/>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].grammar.as_deref(), Some("Substantiv M"));
    }

    #[test]
    fn grammar_and_etymology_are_optional() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>bub</lemma>
      <bedeutung>junge</bedeutung>
      <beleg-angabe>
        <beleg-text>bou</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert!(records[0].grammar.is_none());
        assert!(records[0].etymology.is_none());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>gro&#223;</lemma>
      <bedeutung>gro&#223; &amp; stattlich</bedeutung>
      <beleg-angabe>
        <beleg-text>grouß</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let (_, records) = extract_document(&xml, &home()).unwrap();
        assert_eq!(records[0].lemma, "groß");
        assert_eq!(records[0].meaning, "groß & stattlich");
    }

    #[test]
    fn custom_home_area_changes_the_tie_break() {
        let xml = doc_with_entries(
            r#"<artikel>
      <lemma>klein</lemma>
      <bedeutung>klein</bedeutung>
      <beleg-angabe>
        <beleg-text>winzich</beleg-text>
        <beleg-region ort="Feuchtwangen" landkreis="AN"/>
      </beleg-angabe>
      <beleg-angabe>
        <beleg-text>glaa</beleg-text>
        <beleg-region ort="Hof" landkreis="HO"/>
      </beleg-angabe>
    </artikel>"#,
        );
        let hof = HomeArea {
            district_code: "HO".to_string(),
            town: "Hof".to_string(),
        };
        let (_, records) = extract_document(&xml, &hof).unwrap();
        assert_eq!(records[0].evidence, "glaa");
        assert_eq!(records[0].location, "Hof, Landkreis HO");
    }
}
