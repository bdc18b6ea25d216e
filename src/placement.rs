//! The placement engine: builds one crossword layout, best placement first.
//!
//! One call to [`PlacementEngine::run`] is one *attempt*. The attempt owns a
//! fresh [`GenerationState`] and either hands it back (at least three words
//! placed) or fails with [`GenerationError::PlacementExhausted`], in which case
//! the state is dropped.
//!
//! # Algorithm
//!
//! 1. The first word goes Across, centered on the grid's notional center.
//! 2. Each pass looks at every (remaining word, placed word, shared letter)
//!    triple. The new word is laid through the shared letter *perpendicular*
//!    to the placed word; valid candidates are scored and the best one is
//!    committed. Ties go to the first candidate found.
//! 3. When no perpendicular placement exists the pass either stops or, with
//!    `allow_disconnected`, drops the next word that fits anywhere on a coarse
//!    stride without touching existing letters.
//!
//! # Validity
//!
//! A placement must stay on the grid, agree with every letter it crosses, never
//! run through letters already used by a word in the same direction, keep the
//! cells before and after the word empty, and never sit flush alongside
//! existing letters except where it crosses them.

use log::{debug, trace};
use serde::Serialize;

use crate::errors::GenerationError;
use crate::grid::{cell_at, Bounds, Direction, WorkingGrid};
use crate::word_entry::{WordEntry, MIN_WORDS};

/// Default cap on the number of words in one puzzle.
pub const MAX_PLACED_WORDS: usize = 15;

// Scoring weights
const LENGTH_WEIGHT: i64 = 2;
const INTERSECTION_WEIGHT: i64 = 10;
const CENTER_DISTANCE_WEIGHT: i64 = 1;

// Row/column step of the disconnected-fallback scan.
const DISCONNECTED_STRIDE: usize = 2;

/// Knobs for a single placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Side length of the square working grid.
    pub grid_size: usize,
    /// Stop once this many words are placed.
    pub max_words_to_place: usize,
    /// Fall back to isolated placements when no crossing is possible.
    pub allow_disconnected: bool,
    /// Reward candidates for every letter they share with the grid.
    pub prioritize_intersections: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_size: 21,
            max_words_to_place: MAX_PLACED_WORDS,
            allow_disconnected: false,
            prioritize_intersections: true,
        }
    }
}

/// A word committed to the grid.
///
/// `number` holds the placement order while the attempt runs; the layout
/// finalizer replaces it with the crossword number, and re-maps the start
/// cell into the trimmed grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub number: usize,
    pub length: usize,
    /// `false` if this word came from the disconnected fallback.
    pub connected: bool,
}

impl PlacedWord {
    /// `(row, col)` of every letter, in order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.step();
        (0..self.length).map(move |i| {
            (
                self.start_row + dr as usize * i,
                self.start_col + dc as usize * i,
            )
        })
    }
}

/// Mutable state of one placement attempt.
#[derive(Debug, Clone)]
pub struct GenerationState {
    pub(crate) grid: WorkingGrid,
    pub(crate) placed: Vec<PlacedWord>,
    pub(crate) remaining: Vec<WordEntry>,
    pub(crate) bounds: Option<Bounds>,
    next_number: usize,
}

impl GenerationState {
    pub(crate) fn new(grid_size: usize, remaining: Vec<WordEntry>) -> Option<Self> {
        Some(Self {
            grid: WorkingGrid::new(grid_size)?,
            placed: Vec::new(),
            remaining,
            bounds: None,
            next_number: 1,
        })
    }

    /// Words placed so far, in placement order.
    #[must_use]
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Words that found no place in this attempt.
    #[must_use]
    pub fn remaining_words(&self) -> &[WordEntry] {
        &self.remaining
    }

    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// Write a validated candidate into the grid and record it.
    fn commit(&mut self, entry: WordEntry, candidate: &Candidate, connected: bool) {
        debug_assert!(
            is_valid_placement(&self.grid, &entry.word, candidate.row, candidate.col, candidate.direction),
            "commit called with an invalid placement for {}",
            entry.word
        );

        let length = entry.word.len();
        self.grid.write_word(&entry.word, candidate.row, candidate.col, candidate.direction);

        // validity guarantees both ends are on the grid
        let (start_row, start_col) = (candidate.row as usize, candidate.col as usize);
        let (end_row, end_col) = cell_at(candidate.row, candidate.col, candidate.direction, length - 1);
        let bounds = self.bounds.get_or_insert(Bounds::of_cell(start_row, start_col));
        bounds.include(start_row, start_col);
        bounds.include(end_row as usize, end_col as usize);

        debug!(
            "placed {} {} at ({start_row}, {start_col}) score={} connected={connected}",
            entry.word, candidate.direction, candidate.score
        );

        self.placed.push(PlacedWord {
            word: entry.word,
            clue: entry.clue,
            start_row,
            start_col,
            direction: candidate.direction,
            number: self.next_number,
            length,
            connected,
        });
        self.next_number += 1;
    }
}

/// A scored position for one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    row: isize,
    col: isize,
    direction: Direction,
    score: i64,
}

/// Check whether `word` may be written at `(row, col)` running in `direction`.
pub(crate) fn is_valid_placement(grid: &WorkingGrid, word: &str, row: isize, col: isize, direction: Direction) -> bool {
    let len = word.len();
    if len == 0 {
        return false;
    }

    let (dr, dc) = direction.step();
    let (end_row, end_col) = cell_at(row, col, direction, len - 1);
    if !grid.in_bounds(row, col) || !grid.in_bounds(end_row, end_col) {
        return false;
    }

    // no concatenation with a neighbouring word
    if !grid.is_empty(row - dr, col - dc) || !grid.is_empty(end_row + dr, end_col + dc) {
        return false;
    }

    let (pr, pc) = direction.perpendicular().step();
    let mut empty_cells = 0;
    for (i, letter) in word.chars().enumerate() {
        let (r, c) = cell_at(row, col, direction, i);
        match grid.letter(r, c) {
            Some(existing) => {
                if existing != letter || grid.is_claimed(r, c, direction) {
                    return false;
                }
            }
            None => {
                if !grid.is_empty(r - pr, c - pc) || !grid.is_empty(r + pr, c + pc) {
                    return false;
                }
                empty_cells += 1;
            }
        }
    }

    empty_cells > 0
}

/// Number of cells of the placement that already hold a letter.
pub(crate) fn count_overlaps(grid: &WorkingGrid, word: &str, row: isize, col: isize, direction: Direction) -> usize {
    (0..word.len())
        .filter(|&i| {
            let (r, c) = cell_at(row, col, direction, i);
            !grid.is_empty(r, c)
        })
        .count()
}

/// Rank a valid placement: long words, many crossings, close to the center.
///
/// Distance is measured from the word's middle letter (index `len / 2`), the
/// same cell the seed word puts on the center.
pub(crate) fn score_placement(
    grid: &WorkingGrid,
    word: &str,
    row: isize,
    col: isize,
    direction: Direction,
    prioritize_intersections: bool,
) -> i64 {
    let len = word.len();
    let intersection_score = if prioritize_intersections {
        INTERSECTION_WEIGHT * count_overlaps(grid, word, row, col, direction) as i64
    } else {
        0
    };

    let (center_row, center_col) = grid.center();
    let (mid_row, mid_col) = cell_at(row, col, direction, len / 2);
    let distance = ((mid_row - center_row).abs() + (mid_col - center_col).abs()) as i64;

    LENGTH_WEIGHT * len as i64 + intersection_score - CENTER_DISTANCE_WEIGHT * distance
}

/// Start cells for `word` crossing `placed` at each shared letter.
///
/// The new word always runs perpendicular to `placed`.
fn intersection_starts<'a>(word: &'a str, placed: &'a PlacedWord) -> impl Iterator<Item = (isize, isize, Direction)> + 'a {
    let direction = placed.direction.perpendicular();
    let (dr, dc) = direction.step();

    placed.word.bytes().enumerate().flat_map(move |(i, placed_letter)| {
        let (cross_row, cross_col) = cell_at(placed.start_row as isize, placed.start_col as isize, placed.direction, i);
        word.bytes()
            .enumerate()
            .filter(move |&(_, letter)| letter == placed_letter)
            .map(move |(j, _)| (cross_row - dr * j as isize, cross_col - dc * j as isize, direction))
    })
}

/// Runs placement attempts with a fixed configuration.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Build one layout from `words`, which are tried in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::PlacementExhausted`] if fewer than three
    /// words could be placed (including when the first word does not fit).
    pub fn run(&self, words: &[WordEntry]) -> Result<GenerationState, GenerationError> {
        let exhausted = |placed: usize| GenerationError::PlacementExhausted { placed, required: MIN_WORDS };

        let Some((first, rest)) = words.split_first() else {
            return Err(exhausted(0));
        };

        let Some(mut state) = GenerationState::new(self.config.grid_size, rest.to_vec()) else {
            debug!("a {0}x{0} grid cannot be allocated", self.config.grid_size);
            return Err(exhausted(0));
        };
        if !self.seed(&mut state, first.clone()) {
            return Err(exhausted(0));
        }

        while !state.remaining.is_empty() && state.placed.len() < self.config.max_words_to_place {
            let next = match self.best_connected_candidate(&state) {
                Some(found) => Some((found, true)),
                None if self.config.allow_disconnected => {
                    self.disconnected_candidate(&state).map(|found| (found, false))
                }
                None => None,
            };

            let Some(((idx, candidate), connected)) = next else {
                trace!("no placement for {} remaining words", state.remaining.len());
                break;
            };

            let entry = state.remaining.remove(idx);
            state.commit(entry, &candidate, connected);
        }

        if state.placed.len() < MIN_WORDS {
            return Err(exhausted(state.placed.len()));
        }

        Ok(state)
    }

    /// Place the first word Across with its middle letter on the center.
    fn seed(&self, state: &mut GenerationState, entry: WordEntry) -> bool {
        let (center_row, center_col) = state.grid.center();
        let row = center_row;
        let col = center_col - (entry.word.len() / 2) as isize;

        if !is_valid_placement(&state.grid, &entry.word, row, col, Direction::Across) {
            debug!("seed word {} does not fit a {}x{} grid", entry.word, state.grid.size(), state.grid.size());
            return false;
        }

        let score = score_placement(&state.grid, &entry.word, row, col, Direction::Across, self.config.prioritize_intersections);
        state.commit(entry, &Candidate { row, col, direction: Direction::Across, score }, true);
        true
    }

    /// Best perpendicular crossing over all remaining words, with the index of
    /// the word in `state.remaining`.
    fn best_connected_candidate(&self, state: &GenerationState) -> Option<(usize, Candidate)> {
        let mut best: Option<(usize, Candidate)> = None;

        for (idx, entry) in state.remaining.iter().enumerate() {
            for placed in &state.placed {
                for (row, col, direction) in intersection_starts(&entry.word, placed) {
                    if !is_valid_placement(&state.grid, &entry.word, row, col, direction) {
                        continue;
                    }
                    let score = score_placement(
                        &state.grid,
                        &entry.word,
                        row,
                        col,
                        direction,
                        self.config.prioritize_intersections,
                    );
                    let better = match &best {
                        Some((_, current)) => score > current.score,
                        None => true,
                    };
                    if better {
                        best = Some((idx, Candidate { row, col, direction, score }));
                    }
                }
            }
        }

        best
    }

    /// First isolated spot on a coarse stride where a remaining word fits
    /// without touching any existing letter.
    fn disconnected_candidate(&self, state: &GenerationState) -> Option<(usize, Candidate)> {
        let size = state.grid.size();

        for (idx, entry) in state.remaining.iter().enumerate() {
            for direction in [Direction::Across, Direction::Down] {
                for row in (0..size).step_by(DISCONNECTED_STRIDE) {
                    for col in (0..size).step_by(DISCONNECTED_STRIDE) {
                        let (row, col) = (row as isize, col as isize);
                        if is_valid_placement(&state.grid, &entry.word, row, col, direction)
                            && count_overlaps(&state.grid, &entry.word, row, col, direction) == 0
                        {
                            let score = score_placement(
                                &state.grid,
                                &entry.word,
                                row,
                                col,
                                direction,
                                self.config.prioritize_intersections,
                            );
                            return Some((idx, Candidate { row, col, direction, score }));
                        }
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<WordEntry> {
        list.iter().map(|w| WordEntry::new(*w, format!("clue for {w}"))).collect()
    }

    fn grid_with(size: usize, placements: &[(&str, isize, isize, Direction)]) -> WorkingGrid {
        let mut grid = WorkingGrid::new(size).unwrap();
        for &(word, row, col, direction) in placements {
            grid.write_word(word, row, col, direction);
        }
        grid
    }

    #[test]
    fn test_valid_placement_on_empty_grid() {
        let grid = WorkingGrid::new(7).unwrap();
        assert!(is_valid_placement(&grid, "CAT", 0, 0, Direction::Across));
        assert!(is_valid_placement(&grid, "CAT", 0, 4, Direction::Across));
        assert!(!is_valid_placement(&grid, "CAT", 0, 5, Direction::Across));
        assert!(!is_valid_placement(&grid, "CAT", -1, 0, Direction::Down));
        assert!(!is_valid_placement(&grid, "", 0, 0, Direction::Down));
    }

    #[test]
    fn test_valid_crossing() {
        let grid = grid_with(9, &[("CAT", 4, 3, Direction::Across)]);
        // ART down through the A of CAT
        assert!(is_valid_placement(&grid, "ART", 4, 4, Direction::Down));
        assert!(is_valid_placement(&grid, "BAT", 3, 4, Direction::Down));
    }

    #[test]
    fn test_letter_mismatch_rejected() {
        let grid = grid_with(9, &[("CAT", 4, 3, Direction::Across)]);
        assert!(!is_valid_placement(&grid, "DOG", 3, 4, Direction::Down));
    }

    #[test]
    fn test_concatenation_rejected() {
        let grid = grid_with(9, &[("CAT", 4, 1, Direction::Across)]);
        // SUP directly after CAT would read CATSUP
        assert!(!is_valid_placement(&grid, "SUP", 4, 4, Direction::Across));
        // a word ending right above the C
        assert!(!is_valid_placement(&grid, "ZOO", 1, 1, Direction::Down));
    }

    #[test]
    fn test_flush_parallel_rejected() {
        let grid = grid_with(9, &[("CAT", 4, 3, Direction::Across)]);
        // DOG directly under CAT without crossing it
        assert!(!is_valid_placement(&grid, "DOG", 5, 3, Direction::Across));
        // a down word alongside the T
        assert!(!is_valid_placement(&grid, "OWL", 3, 6, Direction::Down));
    }

    #[test]
    fn test_collinear_extension_rejected() {
        let grid = grid_with(11, &[("CAT", 5, 4, Direction::Across)]);
        // SCATS would swallow CAT
        assert!(!is_valid_placement(&grid, "SCATS", 5, 3, Direction::Across));
        // CAT laid over itself
        let grid = grid_with(11, &[("CAT", 5, 4, Direction::Across), ("ART", 5, 5, Direction::Down)]);
        assert!(!is_valid_placement(&grid, "CAT", 5, 4, Direction::Across));
    }

    #[test]
    fn test_score_placement() {
        let grid = grid_with(21, &[("CASA", 10, 8, Direction::Across)]);
        // HOLA down through the first A: middle letter L at (9, 9)
        assert_eq!(score_placement(&grid, "HOLA", 7, 9, Direction::Down, true), 8 + 10 - 2);
        assert_eq!(score_placement(&grid, "HOLA", 7, 9, Direction::Down, false), 8 - 2);
        // seed position sits on the center
        let empty = WorkingGrid::new(21).unwrap();
        assert_eq!(score_placement(&empty, "CASA", 10, 8, Direction::Across, true), 8);
    }

    #[test]
    fn test_count_overlaps() {
        let grid = grid_with(9, &[("CAT", 4, 3, Direction::Across)]);
        assert_eq!(count_overlaps(&grid, "ART", 4, 4, Direction::Down), 1);
        assert_eq!(count_overlaps(&grid, "ART", 0, 0, Direction::Down), 0);
    }

    #[test]
    fn test_intersection_starts_are_perpendicular() {
        let placed = PlacedWord {
            word: "CASA".to_string(),
            clue: String::new(),
            start_row: 10,
            start_col: 8,
            direction: Direction::Across,
            number: 1,
            length: 4,
            connected: true,
        };
        let starts: Vec<_> = intersection_starts("HOLA", &placed).collect();
        assert_eq!(starts, vec![(7, 9, Direction::Down), (7, 11, Direction::Down)]);
        assert_eq!(intersection_starts("XYZ", &placed).count(), 0);
    }

    #[test]
    fn test_placed_word_cells() {
        let placed = PlacedWord {
            word: "ART".to_string(),
            clue: String::new(),
            start_row: 2,
            start_col: 5,
            direction: Direction::Down,
            number: 1,
            length: 3,
            connected: true,
        };
        assert_eq!(placed.cells().collect::<Vec<_>>(), vec![(2, 5), (3, 5), (4, 5)]);
    }

    #[test]
    fn test_seed_is_centered() {
        let engine = PlacementEngine::new(PlacementConfig::default());
        let state = engine.run(&words(&["CASA", "HOLA", "GATO", "AGUA"])).unwrap();
        let seed = &state.placed_words()[0];
        assert_eq!(seed.word, "CASA");
        assert_eq!((seed.start_row, seed.start_col, seed.direction), (10, 8, Direction::Across));
    }

    #[test]
    fn test_run_spanish_vocabulary() {
        let engine = PlacementEngine::new(PlacementConfig::default());
        let state = engine.run(&words(&["CASA", "HOLA", "GATO", "AGUA"])).unwrap();
        let placed: Vec<(&str, usize, usize, Direction)> = state
            .placed_words()
            .iter()
            .map(|p| (p.word.as_str(), p.start_row, p.start_col, p.direction))
            .collect();
        assert_eq!(
            placed,
            vec![
                ("CASA", 10, 8, Direction::Across),
                ("HOLA", 7, 9, Direction::Down),
                ("GATO", 9, 11, Direction::Down),
            ]
        );
        assert_eq!(state.remaining_words().len(), 1);
        assert_eq!(state.bounds, Some(Bounds { min_row: 7, max_row: 12, min_col: 8, max_col: 11 }));
        // placement order numbers
        assert_eq!(state.placed_words().iter().map(|p| p.number).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_run_without_shared_letters_fails() {
        let engine = PlacementEngine::new(PlacementConfig::default());
        let res = engine.run(&words(&["ABC", "DEF", "GHI"]));
        assert_eq!(res.unwrap_err(), GenerationError::PlacementExhausted { placed: 1, required: 3 });
    }

    #[test]
    fn test_disconnected_fallback_places_isolated_words() {
        let engine = PlacementEngine::new(PlacementConfig { allow_disconnected: true, ..PlacementConfig::default() });
        let state = engine.run(&words(&["ABC", "DEF", "GHI"])).unwrap();
        assert_eq!(state.placed_words().len(), 3);
        assert!(state.placed_words()[0].connected);
        assert!(!state.placed_words()[1].connected);
        // first stride position that fits
        assert_eq!((state.placed_words()[1].start_row, state.placed_words()[1].start_col), (0, 0));
    }

    #[test]
    fn test_seed_too_long_for_grid() {
        let engine = PlacementEngine::new(PlacementConfig { grid_size: 5, ..PlacementConfig::default() });
        let res = engine.run(&words(&["ELEPHANT", "ANT", "TEA"]));
        assert_eq!(res.unwrap_err(), GenerationError::PlacementExhausted { placed: 0, required: 3 });
    }

    #[test]
    fn test_unallocatable_grid_fails_attempt() {
        let engine = PlacementEngine::new(PlacementConfig { grid_size: 1 << (usize::BITS / 2 + 1), ..PlacementConfig::default() });
        let res = engine.run(&words(&["CASA", "HOLA", "GATO"]));
        assert_eq!(res.unwrap_err(), GenerationError::PlacementExhausted { placed: 0, required: 3 });
    }

    #[test]
    fn test_empty_word_list() {
        let engine = PlacementEngine::new(PlacementConfig::default());
        assert!(matches!(engine.run(&[]), Err(GenerationError::PlacementExhausted { placed: 0, .. })));
    }

    #[test]
    fn test_max_words_cap() {
        let engine = PlacementEngine::new(PlacementConfig { max_words_to_place: 3, ..PlacementConfig::default() });
        let state = engine.run(&words(&["TEA", "EAT", "ATE", "TAT", "EAR", "ART"])).unwrap();
        assert_eq!(state.placed_words().len(), 3);
        assert_eq!(state.remaining_words().len(), 3);
    }
}
