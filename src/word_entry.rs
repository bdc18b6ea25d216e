//! `word_entry`: validation and ordering of the (word, clue) pairs fed to the generator.
//!
//! Entries arrive from worksheet forms, JSON payloads, or word-list files, so the
//! words are messy: mixed case, spaces, hyphens, digits. This module turns them
//! into the strict form the placement engine relies on:
//!
//! - the word is uppercased and every character outside A-Z is stripped;
//! - the cleaned word must be 3-15 letters long;
//! - the clue (trimmed) must be non-empty.
//!
//! Entries that fail validation are skipped silently; only the aggregate case
//! (fewer than three usable words) is reported, as
//! [`GenerationError::InsufficientWords`].
//!
//! Word-list files use one `word;clue` pair per line. Parsing from a string is
//! available everywhere (including WASM); reading from a path is native-only.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::letters::{average_letter_frequency_score, normalize_word};

/// Shortest word accepted into a puzzle.
pub const MIN_WORD_LEN: usize = 3;
/// Longest word accepted into a puzzle.
pub const MAX_WORD_LEN: usize = 15;
/// A crossword with fewer words than this is not worth generating.
pub const MIN_WORDS: usize = 3;

/// One answer and the clue shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, clue: impl Into<String>) -> Self {
        Self { word: word.into(), clue: clue.into() }
    }

    /// Normalize and check this entry.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidWord`] if the cleaned word is not 3-15
    /// letters long or the clue is blank.
    pub fn validate(&self) -> Result<WordEntry, GenerationError> {
        let word = normalize_word(&self.word);
        let clue = self.clue.trim();

        let reason = if word.len() < MIN_WORD_LEN {
            Some(format!("fewer than {MIN_WORD_LEN} letters after cleaning"))
        } else if word.len() > MAX_WORD_LEN {
            Some(format!("more than {MAX_WORD_LEN} letters after cleaning"))
        } else if clue.is_empty() {
            Some("clue is empty".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GenerationError::InvalidWord { word: self.word.clone(), reason }),
            None => Ok(WordEntry { word, clue: clue.to_string() }),
        }
    }

    /// Placement priority: length plus the average letter-frequency weight.
    ///
    /// Longer words made of common letters offer the most crossing
    /// opportunities, so they are placed first.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.word.len() as f64 + average_letter_frequency_score(&self.word)
    }
}

/// Clean, filter and order raw entries for placement.
///
/// Invalid entries and repeated words are dropped (with a debug log line);
/// the survivors are sorted by descending [`WordEntry::score`], ties keeping
/// their input order.
///
/// # Errors
///
/// Returns [`GenerationError::InsufficientWords`] if fewer than [`MIN_WORDS`]
/// usable entries remain.
pub fn preprocess_words(entries: &[WordEntry]) -> Result<Vec<WordEntry>, GenerationError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());

    let mut cleaned: Vec<WordEntry> = entries
        .iter()
        .filter_map(|entry| match entry.validate() {
            Ok(valid) if seen.insert(valid.word.clone()) => Some(valid),
            Ok(valid) => {
                debug!("skipping duplicate word {}", valid.word);
                None
            }
            Err(e) => {
                debug!("skipping entry: {e}");
                None
            }
        })
        .collect();

    if cleaned.len() < MIN_WORDS {
        return Err(GenerationError::InsufficientWords { found: cleaned.len(), required: MIN_WORDS });
    }

    // `sort_by` is stable, so equal scores keep input order.
    cleaned.sort_by(|a, b| b.score().total_cmp(&a.score()));

    debug_assert!(
        cleaned.windows(2).all(|w| w[0].score() >= w[1].score()),
        "entries must be sorted by descending score"
    );

    Ok(cleaned)
}

/// Parse `word;clue` lines.
///
/// Blank lines, `#` comments and lines without a `;` are skipped. Entries are
/// returned raw; validation happens in [`preprocess_words`].
#[must_use]
pub fn parse_entries_from_str(contents: &str) -> Vec<WordEntry> {
    contents
        .lines()
        .filter_map(|raw_line| {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            // split on the first ';' so clues may contain semicolons
            let (word, clue) = line.split_once(';')?;
            Some(WordEntry::new(word.trim(), clue.trim()))
        })
        .collect()
}

/// Native-only convenience method: read a word-list file and parse it.
///
/// # Errors
///
/// Returns [`GenerationError::EntryListIo`] if the file cannot be read.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_entries_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<WordEntry>, GenerationError> {
    let path_ref = path.as_ref();
    let data = std::fs::read_to_string(path_ref).map_err(|e| GenerationError::EntryListIo {
        path: path_ref.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(parse_entries_from_str(&data))
}
