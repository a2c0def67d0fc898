//! Vocabulary table and grammatical categories.
//!
//! A `Vocabulary` maps each category to an ordered word list. Lookups are
//! bounds-checked against the selected category's own list; list lengths are
//! not assumed equal across categories. The crate ships exactly one
//! reference table; custom tables exist so tests can exercise uneven lists.

use crate::poem::error::PoemError;
use crate::poem::layout;

/// Grammatical role tag selecting a vocabulary list.
///
/// Wire values are `0x01..=0x03`; `0x00` is the end-of-poem sentinel and is
/// never a valid in-record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Verb,
    Noun,
    Adjective,
}

impl Category {
    /// Decode a wire category byte, rejecting the sentinel and unknown values.
    pub fn from_wire(value: u8) -> Result<Self, PoemError> {
        match value {
            layout::CATEGORY_VERB => Ok(Category::Verb),
            layout::CATEGORY_NOUN => Ok(Category::Noun),
            layout::CATEGORY_ADJECTIVE => Ok(Category::Adjective),
            _ => Err(PoemError::InvalidCategory { value }),
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Category::Verb => layout::CATEGORY_VERB,
            Category::Noun => layout::CATEGORY_NOUN,
            Category::Adjective => layout::CATEGORY_ADJECTIVE,
        }
    }

    /// Lowercase category name as used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Category::Verb => "verb",
            Category::Noun => "noun",
            Category::Adjective => "adjective",
        }
    }
}

/// Fixed word table keyed by [`Category`].
///
/// # Examples
/// ```
/// use bitpoetry_core::{Category, Vocabulary};
///
/// let vocabulary = Vocabulary::reference();
/// assert_eq!(vocabulary.word(Category::Noun, 1).unwrap(), "bear");
/// ```
#[derive(Debug, Clone)]
pub struct Vocabulary {
    verbs: &'static [&'static str],
    nouns: &'static [&'static str],
    adjectives: &'static [&'static str],
}

const VERBS: &[&str] = &["jump", "dance", "scream"];
const NOUNS: &[&str] = &["fish", "bear", "taco"];
const ADJECTIVES: &[&str] = &["blue", "tasty", "smelly"];

impl Vocabulary {
    /// The reference table from the protocol documentation.
    pub fn reference() -> Self {
        Self::new(VERBS, NOUNS, ADJECTIVES)
    }

    pub fn new(
        verbs: &'static [&'static str],
        nouns: &'static [&'static str],
        adjectives: &'static [&'static str],
    ) -> Self {
        Self {
            verbs,
            nouns,
            adjectives,
        }
    }

    /// Ordered word list for a category.
    pub fn words(&self, category: Category) -> &'static [&'static str] {
        match category {
            Category::Verb => self.verbs,
            Category::Noun => self.nouns,
            Category::Adjective => self.adjectives,
        }
    }

    /// Bounds-checked word lookup against the category's own list length.
    pub fn word(&self, category: Category, index: u8) -> Result<&'static str, PoemError> {
        let words = self.words(category);
        words
            .get(usize::from(index))
            .copied()
            .ok_or(PoemError::IndexOutOfRange {
                index,
                len: words.len(),
            })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Vocabulary};
    use crate::poem::error::PoemError;

    #[test]
    fn wire_round_trip() {
        for category in [Category::Verb, Category::Noun, Category::Adjective] {
            assert_eq!(Category::from_wire(category.to_wire()).unwrap(), category);
        }
    }

    #[test]
    fn sentinel_is_not_a_category() {
        let err = Category::from_wire(0x00).unwrap_err();
        assert!(matches!(err, PoemError::InvalidCategory { value: 0x00 }));
    }

    #[test]
    fn lookup_respects_per_category_length() {
        let vocabulary = Vocabulary::new(&["one"], &["fish", "bear", "taco"], &[]);
        assert_eq!(vocabulary.word(Category::Verb, 0).unwrap(), "one");
        assert!(matches!(
            vocabulary.word(Category::Verb, 1),
            Err(PoemError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(vocabulary.word(Category::Noun, 2).unwrap(), "taco");
        assert!(matches!(
            vocabulary.word(Category::Adjective, 0),
            Err(PoemError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
