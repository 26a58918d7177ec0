//! Fixed symbol alphabet for bigram modeling.
//!
//! Maps between characters and symbol indices. The canonical alphabet has
//! 27 symbols: the lowercase letters a-z at indices 0-25 and the boundary
//! symbol `.` at index 26. The boundary symbol marks both the start and
//! the end of a name and always occupies the last index.

use std::collections::HashMap;

/// Canonical alphabet characters in index order: a-z, then the boundary.
const LOWERCASE_CHARS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    '.',
];

/// Character-to-index alphabet with a reserved boundary symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Ordered list of characters; the boundary symbol is last.
    chars: Vec<char>,
    /// Reverse mapping from character to index.
    char_to_idx: HashMap<char, usize>,
}

impl Alphabet {
    /// Create the canonical 27-symbol alphabet (a-z plus `.`).
    #[must_use]
    pub fn lowercase() -> Self {
        let chars: Vec<char> = LOWERCASE_CHARS.to_vec();
        let char_to_idx: HashMap<char, usize> =
            chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { chars, char_to_idx }
    }

    /// Build an alphabet from an explicit character list.
    ///
    /// The last character is taken as the boundary symbol. Used when
    /// reloading a persisted model, where the alphabet travels with the
    /// count matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the list has fewer than two characters (at
    /// least one letter plus the boundary) or contains duplicates.
    pub fn from_chars(chars: Vec<char>) -> Result<Self, String> {
        if chars.len() < 2 {
            return Err(format!(
                "alphabet needs at least one letter and a boundary symbol, got {} chars",
                chars.len()
            ));
        }

        let mut char_to_idx = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if char_to_idx.insert(c, i).is_some() {
                return Err(format!("duplicate character {c:?} in alphabet"));
            }
        }

        Ok(Self { chars, char_to_idx })
    }

    /// Number of symbols in the alphabet (letters plus boundary).
    #[must_use]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Index of the boundary symbol (always the last index).
    #[must_use]
    pub fn boundary(&self) -> usize {
        self.chars.len() - 1
    }

    /// The boundary character itself.
    #[must_use]
    pub fn boundary_char(&self) -> char {
        self.chars[self.boundary()]
    }

    /// Get the index for a character, or `None` if not in the alphabet.
    #[must_use]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.char_to_idx.get(&c).copied()
    }

    /// Get the character for an index, or `None` if out of bounds.
    #[must_use]
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// The ordered character list, boundary last.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase()
    }
}
