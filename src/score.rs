//! Heuristic confidence scoring for translation candidates.
//!
//! `confidence` is a pure, total, deterministic function from
//! (query word, meaning text, evidence text, optional grammar tag) to a
//! score in [0, 1]. A base score is chosen by classifying the lexical
//! relationship between query and meaning through an ordered chain of
//! guards (first match wins — the order is an invariant), then two
//! independent additive adjustments are applied and the result is clamped.
//!
//! All lexical knowledge lives in immutable `const` tables below.

// Base scores, in guard order.
const SCORE_EXACT: f64 = 0.95;
const SCORE_ACTION_CONTEXT: f64 = 0.45;
const SCORE_MODIFIED: f64 = 0.65;
const SCORE_ANTONYM: f64 = 0.30;
const SCORE_DERIVED_NOUN: f64 = 0.70;
const SCORE_INFLECTED_ADJ: f64 = 0.75;
const SCORE_COMPARATIVE: f64 = 0.85;
const SCORE_FIRST_TOKEN: f64 = 0.80;
const SCORE_EARLY_TOKEN: f64 = 0.75;
const SCORE_LATE_TOKEN: f64 = 0.50;
const SCORE_PARTIAL: f64 = 0.60;
const SCORE_UNRELATED: f64 = 0.40;

/// Verbs that turn a leading "{word} ..." meaning into usage *about* the
/// word rather than a definition of it ("Kinder schimpfen").
const LEADING_ACTION_VERBS: &[&str] = &[
    "schimpfen",
    "tadeln",
    "rufen",
    "holen",
    "bringen",
    "sehen",
    "hören",
    "machen",
    "tun",
    "haben",
    "geben",
    "nehmen",
    "bekommen",
    "kriegen",
    "spielen",
    "lernen",
];

/// Action verbs checked after a mid-meaning token match. Deliberately a
/// slightly different list than [`LEADING_ACTION_VERBS`] (includes
/// sein/werden, drops spielen/lernen) — both lists are load-bearing.
const CONTEXT_ACTION_VERBS: &[&str] = &[
    "schimpfen",
    "tadeln",
    "rufen",
    "holen",
    "bringen",
    "sehen",
    "hören",
    "machen",
    "tun",
    "sein",
    "werden",
    "haben",
    "geben",
    "nehmen",
    "bekommen",
    "kriegen",
];

/// Negation/intensifier modifiers that qualify a meaning away from the
/// plain word ("unaufrichtig freundlich", "nicht gut").
const MODIFIERS: &[&str] = &[
    "nicht",
    "un",
    "kein",
    "ohne",
    "sehr",
    "zu",
    "unaufrichtig",
    "falsch",
    "pseudo",
    "schein",
    "kaum",
];

/// Negation prefixes for antonym detection.
const ANTONYM_PREFIXES: &[&str] = &["un", "nicht ", "in", "miss"];

/// Deverbal/deadjectival noun suffixes (Freundlichkeit, Wanderung).
const DERIVATIONAL_SUFFIXES: &[&str] = &["heit", "keit", "ung", "schaft"];

/// Adjective inflection endings (freundliches, freundlicher, ...).
const ADJECTIVE_ENDINGS: &[&str] = &["es", "er", "e", "en", "em"];

/// Comparative suffixes (schöner, schönere).
const COMPARATIVE_SUFFIXES: &[&str] = &["er", "ere", "erer"];

/// Superlative suffixes (schönste, schönster).
const SUPERLATIVE_SUFFIXES: &[&str] = &["ste", "ster", "stes"];

/// Umlaut shifts applied to the last stem vowel for comparative detection
/// (groß → größ, alt → ält). Order matters: "au" is tried after "u".
const UMLAUT_SHIFTS: &[(&str, &str)] = &[("a", "ä"), ("o", "ö"), ("u", "ü"), ("au", "äu")];

/// Part of speech, as far as the heuristics can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pos {
    Noun,
    Adjective,
    Verb,
    Adverb,
}

/// Suffixes suggesting the query word is an adjective.
const ADJECTIVE_WORD_SUFFIXES: &[&str] = &["lich", "ig", "bar", "sam", "haft", "los"];
/// Suffixes suggesting a noun.
const NOUN_WORD_SUFFIXES: &[&str] = &["heit", "keit", "ung", "schaft", "tum", "nis"];
/// Suffixes suggesting a verb.
const VERB_WORD_SUFFIXES: &[&str] = &["en", "eln", "ern", "igen", "ieren"];

/// Computes the confidence score for one candidate.
///
/// Never fails: empty strings and missing grammar fall through to the
/// lowest-confidence branches. Same inputs always produce the same output.
pub fn confidence(
    german_word: &str,
    meaning: &str,
    evidence: &str,
    grammar: Option<&str>,
) -> f64 {
    let word = german_word.trim().to_lowercase();
    let meaning = meaning.trim().to_lowercase();

    let mut score = relationship_score(&word, &meaning);

    if let Some(grammar) = grammar {
        score += grammar_adjustment(&word, grammar);
    }
    score += evidence_quality_adjustment(evidence);

    score.clamp(0.0, 1.0)
}

/// Base score from the lexical relationship between query and meaning.
/// The guards are mutually exclusive and evaluated strictly in order.
fn relationship_score(word: &str, meaning: &str) -> f64 {
    if word.is_empty() || meaning.is_empty() {
        return SCORE_UNRELATED;
    }

    // 1. Meaning is exactly the word.
    if meaning == word {
        return SCORE_EXACT;
    }

    // 2. Meaning begins with the word ("groß, stattlich").
    if let Some(score) = leading_definition_score(word, meaning) {
        return score;
    }

    // 3. Antonym ("freundlich" → "unfreundlich").
    if is_antonym(word, meaning) {
        return SCORE_ANTONYM;
    }

    // 4. Derived noun ("freundlich" → "Freundlichkeit").
    for suffix in DERIVATIONAL_SUFFIXES {
        let derived = format!("{word}{suffix}");
        if meaning.contains(&derived) && is_clean_word_match(&derived, meaning) {
            return SCORE_DERIVED_NOUN;
        }
    }

    // 5. Inflected adjective near the front ("freundliches Wesen").
    for ending in ADJECTIVE_ENDINGS {
        let inflected = format!("{word}{ending}");
        if meaning.contains(&inflected)
            && meaning.split_whitespace().take(5).any(|t| t == inflected)
        {
            return SCORE_INFLECTED_ADJ;
        }
    }

    // 6. Comparative/superlative with umlaut shift ("groß" → "größer").
    let stems = umlaut_variants(word);
    for suffix in COMPARATIVE_SUFFIXES.iter().chain(SUPERLATIVE_SUFFIXES) {
        for stem in &stems {
            if meaning.contains(&format!("{stem}{suffix}")) {
                return SCORE_COMPARATIVE;
            }
        }
    }

    // 7. Word appears somewhere in the meaning.
    if meaning.contains(word) {
        let tokens: Vec<&str> = meaning.split_whitespace().collect();
        // Substring-only hits (compounds) count as a late position.
        let position = tokens.iter().position(|t| *t == word).unwrap_or(usize::MAX);

        if position == 0 {
            return SCORE_FIRST_TOKEN;
        }
        if position <= 2 {
            if let Some(next) = tokens.get(position + 1) {
                if CONTEXT_ACTION_VERBS.iter().any(|v| next.contains(v)) {
                    return SCORE_ACTION_CONTEXT;
                }
            }
            return SCORE_EARLY_TOKEN;
        }
        return SCORE_LATE_TOKEN;
    }

    // 8. Any long-enough constituent of a multi-word query.
    let constituents: Vec<&str> = word.split_whitespace().collect();
    if constituents.len() > 1 {
        for part in constituents {
            if part.chars().count() > 2 && meaning.contains(part) {
                return SCORE_PARTIAL;
            }
        }
    }

    // 9. No detectable relationship.
    SCORE_UNRELATED
}

/// Scores meanings that open with the query word followed by a comma,
/// semicolon, or space. Returns `None` when the guard does not apply.
fn leading_definition_score(word: &str, meaning: &str) -> Option<f64> {
    let leads = meaning.starts_with(&format!("{word},"))
        || meaning.starts_with(&format!("{word};"))
        || meaning.starts_with(&format!("{word} "));
    if !leads {
        return None;
    }

    let after = meaning[word.len()..].trim();

    // Immediately followed by an action verb: this is about doing something
    // to/with the word, not the word itself.
    for verb in LEADING_ACTION_VERBS {
        if after.starts_with(verb) || after.starts_with(&format!(", {verb}")) {
            return Some(SCORE_ACTION_CONTEXT);
        }
    }

    // Qualifiers before the word's first occurrence shift the meaning.
    let preceding = meaning
        .split(word)
        .next()
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if !preceding.is_empty() && MODIFIERS.iter().any(|m| preceding.contains(m)) {
        return Some(SCORE_MODIFIED);
    }

    Some(SCORE_EXACT)
}

/// True when the meaning contains a negated form of the word.
fn is_antonym(word: &str, meaning: &str) -> bool {
    for prefix in ANTONYM_PREFIXES {
        if meaning.contains(&format!("{prefix}{word}")) {
            return true;
        }
    }
    meaning.contains(&format!("nicht {word}"))
}

/// True when `word` occurs in `text` at a clean boundary (followed by
/// punctuation, space, or end of string) rather than inside a longer word.
fn is_clean_word_match(word: &str, text: &str) -> bool {
    match text.find(word) {
        None => false,
        Some(index) => match text[index + word.len()..].chars().next() {
            None => true,
            Some(c) => matches!(c, ' ' | ',' | ';' | '.' | '!' | '?' | ')'),
        },
    }
}

/// Umlaut stem variants of the word, original first. The shift is applied
/// to the last occurrence of each plain vowel (typically the stem vowel).
fn umlaut_variants(word: &str) -> Vec<String> {
    let mut variants = vec![word.to_string()];
    for (plain, umlaut) in UMLAUT_SHIFTS {
        if let Some(pos) = word.rfind(plain) {
            let mut shifted = String::with_capacity(word.len() + 1);
            shifted.push_str(&word[..pos]);
            shifted.push_str(umlaut);
            shifted.push_str(&word[pos + plain.len()..]);
            variants.push(shifted);
        }
    }
    variants
}

/// +0.05 when the grammar tag and the query word agree on part of speech.
/// Disagreement is not penalized; derivational relationships are already
/// scored by the base classification.
fn grammar_adjustment(word: &str, grammar: &str) -> f64 {
    let grammar = grammar.to_lowercase();

    // Keyword order is deliberate: "adverb" also contains "verb".
    let tagged = if grammar.contains("substantiv") || grammar.contains("nomen") {
        Some(Pos::Noun)
    } else if grammar.contains("adjektiv") {
        Some(Pos::Adjective)
    } else if grammar.contains("verb") {
        Some(Pos::Verb)
    } else if grammar.contains("adverb") {
        Some(Pos::Adverb)
    } else {
        None
    };

    match (guess_pos(word), tagged) {
        (Some(guessed), Some(tagged)) if guessed == tagged => 0.05,
        _ => 0.0,
    }
}

/// Heuristic part-of-speech guess from the query word's suffix.
fn guess_pos(word: &str) -> Option<Pos> {
    if ADJECTIVE_WORD_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(Pos::Adjective);
    }
    if NOUN_WORD_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(Pos::Noun);
    }
    if VERB_WORD_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(Pos::Verb);
    }
    None
}

/// Adjustment from the evidence text's word count: a single word is the
/// cleanest attestation, a long sentence is likely an example.
fn evidence_quality_adjustment(evidence: &str) -> f64 {
    let word_count = evidence.split_whitespace().count();
    if word_count == 1 {
        0.05
    } else if word_count <= 4 {
        0.02
    } else if word_count <= 10 {
        0.0
    } else {
        -0.08
    }
}
