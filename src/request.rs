//! Request validation at the CLI and tool-server boundary.
//!
//! Raw input is held as plain strings and only crosses into the typed
//! [`SearchRequest`] once every field has been checked. All limits are in
//! UTF-8 bytes, not characters.

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::scope::SearchScope;

/// Longest accepted search word, in bytes.
pub const MAX_WORD_BYTES: usize = 100;
/// Longest accepted town name, in bytes.
pub const MAX_TOWN_BYTES: usize = 50;

/// Unvalidated request exactly as it arrived from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchRequest {
    pub word: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub exact: bool,
}

/// Validated request; every downstream stage can rely on its fields.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub word: String,
    pub scope: SearchScope,
    pub town: Option<String>,
    pub exact: bool,
}

impl RawSearchRequest {
    pub fn validate(self) -> Result<SearchRequest> {
        let word = self.word.trim().to_string();
        if word.is_empty() {
            bail!("search word must not be empty");
        }
        if word.len() > MAX_WORD_BYTES {
            bail!("search word exceeds {} bytes", MAX_WORD_BYTES);
        }
        if !is_clean_text(&word) {
            bail!("search word contains characters outside letters, spaces and hyphens");
        }

        let scope = match self.scope.as_deref().map(str::trim) {
            None | Some("") => SearchScope::default(),
            Some(raw) => raw.parse::<SearchScope>()?,
        };

        let town = match self.town.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                if raw.len() > MAX_TOWN_BYTES {
                    bail!("town name exceeds {} bytes", MAX_TOWN_BYTES);
                }
                if !is_clean_text(raw) {
                    bail!("town name contains characters outside letters, spaces and hyphens");
                }
                Some(raw.to_string())
            }
        };

        if matches!(scope, SearchScope::CustomTown) && town.is_none() {
            bail!("scope 'custom_town' requires a town name");
        }

        Ok(SearchRequest {
            word,
            scope,
            town,
            exact: self.exact,
        })
    }
}

fn is_clean_text(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
}
