//! Letter handling: the grid alphabet, frequency ranks and word normalization.

pub(crate) const ALPHABET_SIZE: usize = 26;

/// English letters from most to least common.
pub(crate) const FREQUENCY_ORDER: &str = "ETAOINSHRDLCUMWFGYPBVKJXQZ";

// Indexed by `letter - 'A'`; value is the letter's position in FREQUENCY_ORDER.
const FREQUENCY_RANK: [u8; ALPHABET_SIZE] = {
    let order = FREQUENCY_ORDER.as_bytes();
    let mut ranks = [0u8; ALPHABET_SIZE];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        ranks[(order[i] - b'A') as usize] = i as u8;
        i += 1;
    }
    ranks
};

pub(crate) trait CrosswordChar {
    fn is_grid_letter(&self) -> bool;
    /// 0 for the most common letter, 25 for the rarest; `None` outside A-Z.
    fn frequency_rank(&self) -> Option<usize>;
}

impl CrosswordChar for char {
    fn is_grid_letter(&self) -> bool {
        self.is_ascii_uppercase()
    }

    fn frequency_rank(&self) -> Option<usize> {
        if self.is_grid_letter() {
            Some(FREQUENCY_RANK[(*self as u8 - b'A') as usize] as usize)
        } else {
            None
        }
    }
}

// 26 for E down to 1 for Z; 0 outside A-Z.
fn frequency_points(c: char) -> usize {
    c.frequency_rank().map_or(0, |rank| ALPHABET_SIZE - rank)
}

/// Mean letter weight of `word`, each letter weighing `(26 - rank) / 26`.
///
/// Summed as integers first so anagrams score exactly alike.
pub(crate) fn average_letter_frequency_score(word: &str) -> f64 {
    let count = word.chars().count();
    if count == 0 {
        return 0.0;
    }
    let points: usize = word.chars().map(frequency_points).sum();
    points as f64 / (ALPHABET_SIZE * count) as f64
}

/// Uppercase `raw` and keep only A-Z.
pub(crate) fn normalize_word(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_grid_letter())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPPERCASE_ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

    #[test]
    fn test_frequency_order_is_a_permutation() {
        let mut letters: Vec<char> = FREQUENCY_ORDER.chars().collect();
        letters.sort_unstable();
        assert_eq!(letters, UPPERCASE_ALPHABET.collect::<Vec<_>>());
    }

    #[test]
    fn test_frequency_rank() {
        assert_eq!('E'.frequency_rank(), Some(0));
        assert_eq!('T'.frequency_rank(), Some(1));
        assert_eq!('Z'.frequency_rank(), Some(25));
        assert_eq!('e'.frequency_rank(), None);
        assert_eq!('1'.frequency_rank(), None);
    }

    #[test]
    fn test_frequency_points_bounds() {
        assert_eq!(frequency_points('E'), 26);
        assert_eq!(frequency_points('Z'), 1);
        assert!(UPPERCASE_ALPHABET.all(|c| (1..=26).contains(&frequency_points(c))));
        assert_eq!(frequency_points('?'), 0);
    }

    #[test]
    fn test_anagrams_score_alike() {
        assert_eq!(average_letter_frequency_score("TEA"), average_letter_frequency_score("ATE"));
        assert!((average_letter_frequency_score("E") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_common_letters_score_higher() {
        assert!(average_letter_frequency_score("TEA") > average_letter_frequency_score("JAZZ"));
        assert_eq!(average_letter_frequency_score(""), 0.0);
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("casa"), "CASA");
        assert_eq!(normalize_word("ice-cream 2"), "ICECREAM");
        // accented letters do not survive
        assert_eq!(normalize_word("árbol"), "RBOL");
        assert_eq!(normalize_word("!!"), "");
    }
}
