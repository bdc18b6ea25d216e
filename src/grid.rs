//! The working grid the placement engine writes into.
//!
//! Coordinates are signed (`isize`) at the API edge because candidate start
//! cells are computed by subtracting an intersection offset and may land off
//! the grid; every accessor treats off-grid cells as empty.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orientation of a placed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[must_use]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// `(row, col)` delta from one letter of a word to the next.
    #[must_use]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    fn claim_bit(self) -> u8 {
        match self {
            Direction::Across => 0b01,
            Direction::Down => 0b10,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Cell `i` of a word starting at `(row, col)` running in `direction`.
#[inline]
pub(crate) fn cell_at(row: isize, col: isize, direction: Direction, i: usize) -> (isize, isize) {
    let (dr, dc) = direction.step();
    (row + dr * i as isize, col + dc * i as isize)
}

/// Largest working grid accepted from callers.
pub const MAX_GRID_SIZE: usize = 64;

/// Square letter grid with a record of which directions use each cell.
///
/// A cell is `None` (empty) or one letter. Alongside the letter we keep the
/// directions whose words cover it, so a word can never be laid collinearly
/// over letters of an existing word in the same direction.
#[derive(Debug, Clone)]
pub(crate) struct WorkingGrid {
    size: usize,
    letters: Vec<Option<char>>,
    claims: Vec<u8>,
}

impl WorkingGrid {
    /// `None` if `size * size` overflows.
    pub(crate) fn new(size: usize) -> Option<Self> {
        let cells = size.checked_mul(size)?;
        Some(Self {
            size,
            letters: vec![None; cells],
            claims: vec![0; cells],
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// The notional center used to seed and score placements.
    pub(crate) fn center(&self) -> (isize, isize) {
        let c = (self.size / 2) as isize;
        (c, c)
    }

    pub(crate) fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    fn index(&self, row: isize, col: isize) -> Option<usize> {
        self.in_bounds(row, col)
            .then(|| row as usize * self.size + col as usize)
    }

    /// Letter at `(row, col)`; `None` if empty or off-grid.
    pub(crate) fn letter(&self, row: isize, col: isize) -> Option<char> {
        self.index(row, col).and_then(|i| self.letters[i])
    }

    pub(crate) fn is_empty(&self, row: isize, col: isize) -> bool {
        self.letter(row, col).is_none()
    }

    /// Whether a word running in `direction` already covers `(row, col)`.
    pub(crate) fn is_claimed(&self, row: isize, col: isize, direction: Direction) -> bool {
        self.index(row, col)
            .is_some_and(|i| self.claims[i] & direction.claim_bit() != 0)
    }

    /// Write `word` into the grid. The caller has already validated the placement.
    pub(crate) fn write_word(&mut self, word: &str, row: isize, col: isize, direction: Direction) {
        for (i, letter) in word.chars().enumerate() {
            let (r, c) = cell_at(row, col, direction, i);
            let Some(idx) = self.index(r, c) else {
                debug_assert!(false, "write_word called with off-grid cell ({r}, {c})");
                continue;
            };
            debug_assert!(
                !matches!(self.letters[idx], Some(existing) if existing != letter),
                "write_word would overwrite a different letter at ({r}, {c})"
            );
            self.letters[idx] = Some(letter);
            self.claims[idx] |= direction.claim_bit();
        }
    }

    /// Number of filled cells.
    #[cfg(test)]
    pub(crate) fn filled_count(&self) -> usize {
        self.letters.iter().filter(|c| c.is_some()).count()
    }
}

/// Smallest rectangle enclosing every placed letter (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) min_row: usize,
    pub(crate) max_row: usize,
    pub(crate) min_col: usize,
    pub(crate) max_col: usize,
}

impl Bounds {
    pub(crate) fn of_cell(row: usize, col: usize) -> Self {
        Self { min_row: row, max_row: row, min_col: col, max_col: col }
    }

    pub(crate) fn include(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Across.perpendicular(), Direction::Down);
        assert_eq!(Direction::Down.perpendicular(), Direction::Across);
        assert_eq!(cell_at(2, 3, Direction::Across, 4), (2, 7));
        assert_eq!(cell_at(2, 3, Direction::Down, 4), (6, 3));
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn test_off_grid_cells_are_empty() {
        let grid = WorkingGrid::new(5).unwrap();
        assert!(grid.is_empty(-1, 0));
        assert!(grid.is_empty(0, 5));
        assert!(!grid.in_bounds(5, 0));
        assert_eq!(grid.center(), (2, 2));
    }

    #[test]
    fn test_oversized_grid_is_refused() {
        assert!(WorkingGrid::new(usize::MAX).is_none());
        assert_eq!(WorkingGrid::new(MAX_GRID_SIZE).map(|g| g.size()), Some(MAX_GRID_SIZE));
    }

    #[test]
    fn test_write_word_sets_letters_and_claims() {
        let mut grid = WorkingGrid::new(7).unwrap();
        grid.write_word("CAT", 1, 2, Direction::Across);
        grid.write_word("ART", 0, 3, Direction::Down);
        assert_eq!(grid.letter(1, 2), Some('C'));
        assert_eq!(grid.letter(1, 3), Some('A'));
        assert_eq!(grid.letter(2, 3), Some('R'));
        assert!(grid.is_claimed(1, 3, Direction::Across));
        assert!(grid.is_claimed(1, 3, Direction::Down));
        assert!(!grid.is_claimed(1, 2, Direction::Down));
        assert_eq!(grid.filled_count(), 5);
    }

    #[test]
    fn test_bounds_include() {
        let mut b = Bounds::of_cell(5, 5);
        b.include(3, 9);
        b.include(7, 4);
        assert_eq!(b, Bounds { min_row: 3, max_row: 7, min_col: 4, max_col: 9 });
    }
}
