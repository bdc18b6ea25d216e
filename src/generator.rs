//! The generation entry point: preprocessing, retries, relaxation, finalizing.
//!
//! # Retry policy
//!
//! The placement engine is deterministic for a given word order, so re-running
//! it on the same list can only reproduce the same failure. The first attempt
//! uses the score-sorted order; each later attempt reshuffles the list with a
//! `StdRng` seeded from [`GenerationOptions::seed`], so retries explore new
//! orders while a given seed always yields the same puzzle.
//!
//! If all `max_attempts` strict attempts fail, one relaxed attempt runs on the
//! eight highest-scored words with disconnected placement allowed and
//! intersection priority switched off. If that fails as well the result is
//! `Ok(None)`: search failure is an expected outcome, not an error.
//!
//! # Examples
//!
//! ```
//! use lexigrid::generator::{generate_crossword_layout, GenerationOptions};
//! use lexigrid::word_entry::WordEntry;
//!
//! let words = vec![
//!     WordEntry::new("hola", "hello"),
//!     WordEntry::new("casa", "house"),
//!     WordEntry::new("agua", "water"),
//!     WordEntry::new("gato", "cat"),
//! ];
//! let result = generate_crossword_layout(&words, &GenerationOptions::default())?
//!     .expect("these words share letters");
//! assert!(result.stats.placed_words >= 3);
//! println!("{result}");
//! # Ok::<(), lexigrid::errors::GenerationError>(())
//! ```

use std::fmt::Display;

use instant::Instant;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::grid::MAX_GRID_SIZE;
use crate::layout::{finalize, CrosswordResult};
use crate::placement::{PlacementConfig, PlacementEngine, MAX_PLACED_WORDS};
use crate::word_entry::{preprocess_words, WordEntry, MIN_WORDS, MIN_WORD_LEN};

/// Strict attempts before falling back to relaxed constraints.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;
/// Words kept for the relaxed attempt.
pub const RELAXED_WORD_LIMIT: usize = 8;

/// Caller-facing generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Side length of the working grid.
    pub max_grid_size: usize,
    /// Smallest side length of the finished grid; values above `max_grid_size` act as `max_grid_size`.
    pub min_grid_size: usize,
    pub max_attempts: usize,
    pub allow_disconnected: bool,
    pub prioritize_intersections: bool,
    pub max_words_to_place: usize,
    /// Seed for the word-order shuffles of retry attempts.
    pub seed: u64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_grid_size: 21,
            min_grid_size: 15,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            allow_disconnected: false,
            prioritize_intersections: true,
            max_words_to_place: MAX_PLACED_WORDS,
            seed: 0,
        }
    }
}

impl GenerationOptions {
    /// Reject settings no layout could satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidOptions`] describing the first problem found.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let reason = if !(MIN_WORD_LEN..=MAX_GRID_SIZE).contains(&self.max_grid_size) {
            Some(format!(
                "max_grid_size must be between {MIN_WORD_LEN} and {MAX_GRID_SIZE}, got {}",
                self.max_grid_size
            ))
        } else if self.max_words_to_place < MIN_WORDS {
            Some(format!("max_words_to_place must be at least {MIN_WORDS}, got {}", self.max_words_to_place))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GenerationError::InvalidOptions { reason }),
            None => Ok(()),
        }
    }

    fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            grid_size: self.max_grid_size,
            max_words_to_place: self.max_words_to_place,
            allow_disconnected: self.allow_disconnected,
            prioritize_intersections: self.prioritize_intersections,
        }
    }

    fn relaxed_config(&self) -> PlacementConfig {
        PlacementConfig {
            allow_disconnected: true,
            prioritize_intersections: false,
            ..self.placement_config()
        }
    }
}

/// Call `attempt` with 0, 1, ... until it succeeds or `max_attempts` calls fail.
pub(crate) fn first_success<T, E: Display>(
    max_attempts: usize,
    mut attempt: impl FnMut(usize) -> Result<T, E>,
) -> Option<T> {
    (0..max_attempts).find_map(|i| match attempt(i) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("attempt {}/{max_attempts} failed: {e}", i + 1);
            None
        }
    })
}

/// Generate a crossword layout from word/clue pairs.
///
/// # Returns
///
/// `Ok(Some(result))` on success, `Ok(None)` if neither strict nor relaxed
/// placement could place three words.
///
/// # Errors
///
/// - [`GenerationError::InvalidOptions`] if `options` fail validation;
/// - [`GenerationError::InsufficientWords`] if fewer than three entries
///   survive cleaning.
pub fn generate_crossword_layout(
    words: &[WordEntry],
    options: &GenerationOptions,
) -> Result<Option<CrosswordResult>, GenerationError> {
    let started = Instant::now();

    options.validate()?;
    let sorted = preprocess_words(words)?;
    let total_words = sorted.len();

    debug!("generating crossword from {total_words} of {} entries", words.len());

    let engine = PlacementEngine::new(options.placement_config());
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut order = sorted.clone();

    let strict = first_success(options.max_attempts, |attempt| {
        if attempt > 0 {
            order.shuffle(&mut rng);
        }
        engine.run(&order)
    });

    let state = strict.or_else(|| {
        warn!(
            "strict placement failed after {} attempts; retrying with relaxed constraints",
            options.max_attempts
        );
        let relaxed_words = &sorted[..total_words.min(RELAXED_WORD_LIMIT)];
        let relaxed = PlacementEngine::new(options.relaxed_config());
        first_success(1, |_| relaxed.run(relaxed_words))
    });

    let min_grid_size = options.min_grid_size.min(options.max_grid_size);
    let result = state.map(|state| finalize(&state, total_words, min_grid_size));

    match &result {
        Some(layout) => info!(
            "placed {}/{} words with {} intersections on a {}x{} grid in {:.3}s",
            layout.stats.placed_words,
            total_words,
            layout.stats.intersections,
            layout.grid_size.rows,
            layout.grid_size.cols,
            started.elapsed().as_secs_f64()
        ),
        None => info!(
            "could not generate a crossword from {total_words} words in {:.3}s",
            started.elapsed().as_secs_f64()
        ),
    }

    Ok(result)
}
