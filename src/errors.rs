//! Error types for crossword generation with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (G001-G005) for documentation lookup:
//!
//! - G001: `InvalidWord` (Word fails length/character/clue constraints)
//! - G002: `InsufficientWords` (Fewer than 3 usable words after cleaning)
//! - G003: `PlacementExhausted` (One placement attempt could not place enough words)
//! - G004: `InvalidOptions` (Generation options are inconsistent)
//! - G005: `EntryListIo` (Word-list file could not be read)
//!
//! Only `InsufficientWords` and `InvalidOptions` ever reach callers of
//! [`crate::generator::generate_crossword_layout`]. Search failure is not an
//! error: it is reported as `Ok(None)`.
//!
//! # Examples
//!
//! ```
//! use lexigrid::errors::GenerationError;
//!
//! let err = GenerationError::InsufficientWords { found: 1, required: 3 };
//! assert_eq!(err.code(), "G002");
//! println!("{}", err.display_detailed());
//! ```

use std::io;

/// Everything that can go wrong between receiving word/clue pairs and
/// handing back a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid word \"{word}\": {reason}")]
    InvalidWord { word: String, reason: String },

    #[error("Not enough usable words: found {found}, need at least {required}")]
    InsufficientWords { found: usize, required: usize },

    #[error("Placement exhausted after placing {placed} of the {required} required words")]
    PlacementExhausted { placed: usize, required: usize },

    #[error("Invalid generation options: {reason}")]
    InvalidOptions { reason: String },

    #[error("failed to read word list from '{path}': {message}")]
    EntryListIo { path: String, message: String },
}

impl From<GenerationError> for io::Error {
    fn from(ge: GenerationError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, ge.to_string())
    }
}

impl GenerationError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::InvalidWord { .. } => "G001",
            GenerationError::InsufficientWords { .. } => "G002",
            GenerationError::PlacementExhausted { .. } => "G003",
            GenerationError::InvalidOptions { .. } => "G004",
            GenerationError::EntryListIo { .. } => "G005",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerationError::InvalidWord { .. } => "Word fails length, character or clue constraints",
            GenerationError::InsufficientWords { .. } => "Fewer than 3 usable words after cleaning",
            GenerationError::PlacementExhausted { .. } => "A single placement attempt could not place enough words",
            GenerationError::InvalidOptions { .. } => "Generation options are inconsistent",
            GenerationError::EntryListIo { .. } => "Word-list file could not be read",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerationError::InvalidWord { .. } => "After uppercasing and stripping non-letters, a word must be 3 to 15 letters long and must come with a non-empty clue. Invalid words are skipped silently during preprocessing; this error is only returned when validating a single entry.",
            GenerationError::InsufficientWords { .. } => "A crossword needs at least three usable words. Every entry that failed validation was dropped, and too few were left to build a puzzle.",
            GenerationError::PlacementExhausted { .. } => "One placement attempt stalled before placing three words. The generator retries with a different word order and finally with relaxed constraints, so this error is never surfaced by the public generation entry point.",
            GenerationError::InvalidOptions { .. } => "max_grid_size must be between 3 and 64, and max_words_to_place must be at least 3. A min_grid_size above max_grid_size is capped, not rejected.",
            GenerationError::EntryListIo { .. } => "The word-list file could not be opened or was not valid UTF-8.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerationError::InvalidWord { .. } => Some("Use 3-15 letters per word (e.g., 'CASA') and give every word a clue"),
            GenerationError::InsufficientWords { .. } => Some("Provide at least 3 words of 3-15 letters, each with a clue"),
            GenerationError::InvalidOptions { .. } => Some("Example: max_grid_size = 21, max_words_to_place = 15"),
            GenerationError::EntryListIo { .. } => Some("Check the path; each line should look like 'casa;house'"),
            GenerationError::PlacementExhausted { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
