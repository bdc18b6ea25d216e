//! Crossword layout generation for vocabulary worksheets.
//!
//! Given (word, clue) pairs, [`generate_crossword_layout`] places as many words
//! as it can into a connected grid and returns the finished, numbered puzzle.

pub mod errors;
pub mod generator;
pub(crate) mod grid;
pub mod layout;
mod letters;
pub mod log;
pub mod placement;
pub mod word_entry;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use errors::GenerationError;
pub use generator::{generate_crossword_layout, GenerationOptions};
pub use grid::{Direction, MAX_GRID_SIZE};
pub use layout::{CrosswordClue, CrosswordResult, GridCell, GridSize, LayoutStats};
pub use placement::PlacedWord;
pub use word_entry::WordEntry;
