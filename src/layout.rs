//! Turning a finished placement attempt into the public crossword layout.
//!
//! The finalizer trims the working grid to the placed words plus a margin,
//! numbers the word starts in reading order, and builds the clue lists and
//! statistics. It is a pure function of the [`GenerationState`]: finalizing the
//! same state twice gives identical output.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::grid::{Bounds, Direction};
use crate::placement::{GenerationState, PlacedWord};

/// Empty cells kept around the placed words on every side.
pub const GRID_PADDING: usize = 3;

/// One cell of the finished grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub letter: Option<char>,
    pub is_black: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    pub is_start: bool,
    /// Number of every word covering this cell; two entries mark a crossing.
    pub belongs_to_words: Vec<usize>,
}

impl GridCell {
    fn black() -> Self {
        Self {
            letter: None,
            is_black: true,
            number: None,
            is_start: false,
            belongs_to_words: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordClue {
    pub number: usize,
    pub clue: String,
    pub answer: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    /// Usable words handed to the generator.
    pub total_words: usize,
    pub placed_words: usize,
    /// Cells shared by more than one word.
    pub intersections: usize,
}

/// A finished crossword: grid, words, clues and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordResult {
    pub grid: Vec<Vec<GridCell>>,
    pub placed_words: Vec<PlacedWord>,
    pub across_clues: Vec<CrosswordClue>,
    pub down_clues: Vec<CrosswordClue>,
    pub grid_size: GridSize,
    pub stats: LayoutStats,
}

impl CrosswordResult {
    /// Letter at `(row, col)` of the finished grid, if the cell is white.
    #[must_use]
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.grid.get(row)?.get(col)?.letter
    }
}

/// Plain-text dump: one row per line, `#` for black cells, then the clues.
impl fmt::Display for CrosswordResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.letter.map_or_else(|| "#".to_string(), |c| c.to_string()))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        for (heading, clues) in [("Across", &self.across_clues), ("Down", &self.down_clues)] {
            if clues.is_empty() {
                continue;
            }
            writeln!(f, "\n{heading}:")?;
            for clue in clues {
                writeln!(f, "{:>3}. {} ({})", clue.number, clue.clue, clue.answer.len())?;
            }
        }

        Ok(())
    }
}

/// Pad `[lo, hi]` by [`GRID_PADDING`], then widen it to `min_len` cells,
/// alternating after and before; never leaves `0..limit`.
fn trimmed_span(lo: usize, hi: usize, limit: usize, min_len: usize) -> (usize, usize) {
    debug_assert!(lo <= hi && hi < limit, "span [{lo}, {hi}] must lie inside 0..{limit}");

    let mut lo = lo.saturating_sub(GRID_PADDING);
    let mut hi = (hi + GRID_PADDING).min(limit - 1);
    let target = min_len.min(limit);

    let mut grow_after = true;
    while hi - lo + 1 < target {
        if grow_after && hi + 1 < limit {
            hi += 1;
        } else if lo > 0 {
            lo -= 1;
        } else {
            hi += 1;
        }
        grow_after = !grow_after;
    }

    (lo, hi)
}

/// Assign crossword numbers: distinct start cells in reading order get 1, 2, ...
fn number_starts(words: &[PlacedWord]) -> HashMap<(usize, usize), usize> {
    let mut starts: Vec<(usize, usize)> = words.iter().map(|w| (w.start_row, w.start_col)).collect();
    starts.sort_unstable();
    starts.dedup();

    starts
        .into_iter()
        .enumerate()
        .map(|(i, start)| (start, i + 1))
        .collect()
}

fn clues_for(words: &[PlacedWord], direction: Direction) -> Vec<CrosswordClue> {
    let mut clues: Vec<CrosswordClue> = words
        .iter()
        .filter(|w| w.direction == direction)
        .map(|w| CrosswordClue {
            number: w.number,
            clue: w.clue.clone(),
            answer: w.word.clone(),
            direction,
        })
        .collect();
    clues.sort_by_key(|c| c.number);
    clues
}

/// Build the public layout from a successful attempt.
///
/// `total_words` is reported in the statistics; `min_grid_size` widens small
/// layouts (within the working grid).
#[must_use]
pub fn finalize(state: &GenerationState, total_words: usize, min_grid_size: usize) -> CrosswordResult {
    let size = state.grid_size();
    let bounds = state.bounds.unwrap_or_else(|| {
        let center = size / 2;
        Bounds::of_cell(center, center)
    });

    let (top, bottom) = trimmed_span(bounds.min_row, bounds.max_row, size, min_grid_size);
    let (left, right) = trimmed_span(bounds.min_col, bounds.max_col, size, min_grid_size);
    let grid_size = GridSize { rows: bottom - top + 1, cols: right - left + 1 };

    let mut placed_words: Vec<PlacedWord> = state
        .placed_words()
        .iter()
        .map(|w| PlacedWord {
            start_row: w.start_row - top,
            start_col: w.start_col - left,
            ..w.clone()
        })
        .collect();

    let numbers = number_starts(&placed_words);
    for word in &mut placed_words {
        word.number = numbers[&(word.start_row, word.start_col)];
    }

    let mut grid = vec![vec![GridCell::black(); grid_size.cols]; grid_size.rows];
    for word in &placed_words {
        for (i, ((row, col), letter)) in word.cells().zip(word.word.chars()).enumerate() {
            let cell = &mut grid[row][col];
            debug_assert!(
                !matches!(cell.letter, Some(existing) if existing != letter),
                "conflicting letters at ({row}, {col})"
            );
            cell.letter = Some(letter);
            cell.is_black = false;
            cell.belongs_to_words.push(word.number);
            if i == 0 {
                cell.number = Some(word.number);
                cell.is_start = true;
            }
        }
    }

    let intersections = grid
        .iter()
        .flatten()
        .filter(|cell| cell.belongs_to_words.len() > 1)
        .count();

    CrosswordResult {
        across_clues: clues_for(&placed_words, Direction::Across),
        down_clues: clues_for(&placed_words, Direction::Down),
        stats: LayoutStats {
            total_words,
            placed_words: placed_words.len(),
            intersections,
        },
        grid,
        placed_words,
        grid_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PlacementConfig, PlacementEngine};
    use crate::word_entry::WordEntry;

    fn run(list: &[&str]) -> GenerationState {
        let words: Vec<WordEntry> = list.iter().map(|w| WordEntry::new(*w, format!("clue for {w}"))).collect();
        PlacementEngine::new(PlacementConfig::default()).run(&words).unwrap()
    }

    #[test]
    fn test_trimmed_span_padding_and_clipping() {
        assert_eq!(trimmed_span(7, 12, 21, 0), (4, 15));
        assert_eq!(trimmed_span(1, 19, 21, 0), (0, 20));
        assert_eq!(trimmed_span(8, 11, 21, 15), (3, 17));
        // cannot grow past the working grid
        assert_eq!(trimmed_span(2, 3, 9, 30), (0, 8));
        // widening runs into the top edge and continues downward
        assert_eq!(trimmed_span(0, 1, 21, 10), (0, 9));
    }

    #[test]
    fn test_finalize_spanish_vocabulary() {
        let state = run(&["CASA", "HOLA", "GATO", "AGUA"]);
        let result = finalize(&state, 4, 0);

        assert_eq!(result.grid_size, GridSize { rows: 12, cols: 10 });

        let summary: Vec<(&str, usize, usize, usize, Direction)> = result
            .placed_words
            .iter()
            .map(|w| (w.word.as_str(), w.number, w.start_row, w.start_col, w.direction))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CASA", 3, 6, 3, Direction::Across),
                ("HOLA", 1, 3, 4, Direction::Down),
                ("GATO", 2, 5, 6, Direction::Down),
            ]
        );

        assert_eq!(result.across_clues.iter().map(|c| c.number).collect::<Vec<_>>(), vec![3]);
        assert_eq!(result.down_clues.iter().map(|c| c.answer.as_str()).collect::<Vec<_>>(), vec!["HOLA", "GATO"]);

        assert_eq!(result.stats, LayoutStats { total_words: 4, placed_words: 3, intersections: 2 });

        // HOLA and CASA cross on the A
        let crossing = &result.grid[6][4];
        assert_eq!(crossing.letter, Some('A'));
        assert_eq!(crossing.belongs_to_words, vec![3, 1]);

        let start = &result.grid[3][4];
        assert_eq!((start.letter, start.number, start.is_start), (Some('H'), Some(1), true));
        assert!(result.grid[0][0].is_black);
    }

    #[test]
    fn test_every_white_cell_belongs_to_a_word() {
        let result = finalize(&run(&["TEA", "EAT", "ATE", "TAT", "EAR", "ART"]), 6, 15);
        for cell in result.grid.iter().flatten() {
            assert_eq!(cell.is_black, cell.belongs_to_words.is_empty());
            assert_eq!(cell.is_black, cell.letter.is_none());
        }
        let white = result.grid.iter().flatten().filter(|c| !c.is_black).count();
        let letters: usize = result.placed_words.iter().map(|w| w.length).sum();
        assert_eq!(white + result.stats.intersections, letters);
    }

    #[test]
    fn test_shared_start_shares_number() {
        let result = finalize(&run(&["TEA", "EAT", "ATE", "TAT", "EAR", "ART"]), 6, 0);
        let number_of = |word: &str| result.placed_words.iter().find(|w| w.word == word).map(|w| w.number);

        // ATE (across) and ART (down) start in the same cell
        assert_eq!(number_of("ATE"), number_of("ART"));
        let n = number_of("ATE").unwrap();
        assert!(result.across_clues.iter().any(|c| c.number == n && c.answer == "ATE"));
        assert!(result.down_clues.iter().any(|c| c.number == n && c.answer == "ART"));
    }

    #[test]
    fn test_numbers_follow_reading_order() {
        let result = finalize(&run(&["TEA", "EAT", "ATE", "TAT", "EAR", "ART"]), 6, 0);
        let mut seen = 0;
        for cell in result.grid.iter().flatten() {
            if let Some(n) = cell.number {
                assert!(n == seen + 1, "number {n} out of reading order");
                seen = n;
            }
        }
        assert!(result.across_clues.windows(2).all(|w| w[0].number < w[1].number));
        assert!(result.down_clues.windows(2).all(|w| w[0].number < w[1].number));
    }

    #[test]
    fn test_finalize_is_deterministic() {
        let state = run(&["CASA", "HOLA", "GATO", "AGUA"]);
        assert_eq!(finalize(&state, 4, 15), finalize(&state, 4, 15));
    }

    #[test]
    fn test_display_dump() {
        let result = finalize(&run(&["CASA", "HOLA", "GATO", "AGUA"]), 4, 0);
        let text = result.to_string();
        assert!(text.contains("# # # C A S A # # #"));
        assert!(text.contains("Across:\n  3. clue for CASA (4)"));
        assert!(text.contains("Down:"));
        assert_eq!(result.letter(6, 4), Some('A'));
        assert_eq!(result.letter(0, 0), None);
        assert_eq!(result.letter(99, 0), None);
    }
}
