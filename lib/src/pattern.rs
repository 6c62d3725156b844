use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an unrevealed slot is rendered.
pub const PLACEHOLDER: char = '-';

/// The reveal state of each letter position in a word.
///
/// A slot holds the letter at that position once it has been guessed, or `None` while it is still
/// hidden. Patterns render as one token per slot separated by single spaces, e.g. `- a -`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    slots: Vec<Option<char>>,
}

impl Pattern {
    /// Constructs a pattern of the given length with nothing revealed.
    ///
    /// ```
    /// use evil_hangman::Pattern;
    ///
    /// assert_eq!(Pattern::blank(3).to_string(), "- - -");
    /// ```
    pub fn blank(length: usize) -> Pattern {
        Pattern {
            slots: vec![None; length],
        }
    }

    /// Computes the pattern that the given word shows once the given letters have been guessed.
    ///
    /// Two words induce the same pattern iff no guess so far can tell them apart.
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use evil_hangman::Pattern;
    ///
    /// let guessed = BTreeSet::from(['a', 't']);
    /// assert_eq!(Pattern::induced_by("cat", &guessed).to_string(), "- a t");
    /// assert_eq!(Pattern::induced_by("car", &guessed).to_string(), "- a -");
    /// ```
    pub fn induced_by(word: &str, guessed: &BTreeSet<char>) -> Pattern {
        Pattern {
            slots: word
                .chars()
                .map(|letter| {
                    if guessed.contains(&letter) {
                        Some(letter)
                    } else {
                        None
                    }
                })
                .collect(),
        }
    }

    /// The number of letter positions in this pattern.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` iff the pattern has no positions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The reveal state of each position, in order.
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// Counts the positions where `letter` has been revealed.
    pub fn occurrences_of(&self, letter: char) -> usize {
        self.slots
            .iter()
            .filter(|slot| **slot == Some(letter))
            .count()
    }

    /// Returns `true` iff every position has been revealed.
    pub fn is_fully_revealed(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    fn token(slot: &Option<char>) -> char {
        slot.unwrap_or(PLACEHOLDER)
    }
}

/// Patterns are ordered the same way as their rendered strings. A revealed `-` is kept distinct
/// from a placeholder by sorting the placeholder first.
impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |slot: &Option<char>| (Pattern::token(slot), slot.is_some());
        self.slots
            .iter()
            .map(key)
            .cmp(other.slots.iter().map(key))
    }
}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", Pattern::token(slot))?;
        }
        Ok(())
    }
}
