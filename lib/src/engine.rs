use crate::pattern::Pattern;
use crate::results::HangmanError;
#[cfg(feature = "serde")]
use crate::results::InvalidSnapshot;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::result::Result;
use std::sync::Arc;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Candidate sets with at least this many words are partitioned in parallel.
pub const PARALLEL_PARTITION_THRESHOLD: usize = 4096;

/// Tracks the state of a game of adversarial hangman.
///
/// Instead of committing to a secret word up front, the manager keeps every dictionary word that is
/// still consistent with the guesses so far. On each guess it splits those words by the pattern
/// they would reveal, and keeps whichever group is largest. The secret word is only pinned down
/// once no other choice remains.
///
/// ```
/// use evil_hangman::HangmanManager;
///
/// let mut manager = HangmanManager::new(["cat", "car", "can"], 3, 5).unwrap();
///
/// assert_eq!(manager.record_guess('a'), Ok(1));
/// assert_eq!(manager.current_pattern().unwrap(), "- a -");
///
/// assert_eq!(manager.record_guess('t'), Ok(0));
/// assert_eq!(manager.remaining_guesses(), 4);
/// assert_eq!(manager.candidate_words().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "HangmanSnapshot"))]
pub struct HangmanManager {
    word_length: usize,
    candidates: BTreeSet<Arc<str>>,
    pattern: Pattern,
    guessed_letters: BTreeSet<char>,
    remaining_guesses: u32,
}

impl HangmanManager {
    /// Starts a new game using the words from `dictionary` that are exactly `length` characters
    /// long, with `max_guesses` incorrect guesses allowed.
    ///
    /// Duplicate words are only counted once. It is not an error for no words to match the length,
    /// but such a game cannot be played: [`current_pattern`](Self::current_pattern) and
    /// [`record_guess`](Self::record_guess) will both fail.
    ///
    /// Returns [`HangmanError::InvalidConfiguration`] if `length` is zero or `max_guesses` is
    /// negative.
    pub fn new<I, S>(
        dictionary: I,
        length: usize,
        max_guesses: i32,
    ) -> Result<HangmanManager, HangmanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if length < 1 || max_guesses < 0 {
            return Err(HangmanError::InvalidConfiguration {
                length,
                max_guesses,
            });
        }
        let candidates: BTreeSet<Arc<str>> = dictionary
            .into_iter()
            .filter(|word| word.as_ref().chars().count() == length)
            .map(|word| Arc::from(word.as_ref()))
            .collect();
        debug!(
            word_length = length,
            num_candidates = candidates.len(),
            max_guesses,
            "starting new game"
        );
        Ok(HangmanManager {
            word_length: length,
            candidates,
            pattern: Pattern::blank(length),
            guessed_letters: BTreeSet::new(),
            remaining_guesses: max_guesses as u32,
        })
    }

    /// The words that are still consistent with every guess so far, in lexicographic order.
    pub fn candidate_words(&self) -> &BTreeSet<Arc<str>> {
        &self.candidates
    }

    /// The number of incorrect guesses the player can still make.
    pub fn remaining_guesses(&self) -> u32 {
        self.remaining_guesses
    }

    /// The letters guessed so far, in order.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    /// The length of the words in this game.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// The pattern shared by every candidate word.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Renders the current pattern for display, e.g. `- a -`.
    ///
    /// Returns [`HangmanError::EmptyCandidateSet`] if no word in the dictionary had the requested
    /// length.
    pub fn current_pattern(&self) -> Result<String, HangmanError> {
        if self.candidates.is_empty() {
            return Err(HangmanError::EmptyCandidateSet);
        }
        Ok(self.pattern.to_string())
    }

    /// Records a guess of `letter`, and returns how many times it appears in the new pattern.
    ///
    /// The candidates are grouped by the pattern each one shows once `letter` is revealed, and the
    /// largest group is kept. If several groups are equally large, the one whose pattern renders
    /// first in lexicographic order wins. A guess that reveals nothing costs one of the remaining
    /// guesses.
    ///
    /// Returns [`HangmanError::GameOver`] if there are no candidates or no guesses left, and
    /// [`HangmanError::DuplicateGuess`] if `letter` was already guessed. A repeated letter is
    /// accepted when exactly one guess remains. The state is unchanged whenever an error is
    /// returned.
    pub fn record_guess(&mut self, letter: char) -> Result<usize, HangmanError> {
        if self.candidates.is_empty() || self.remaining_guesses < 1 {
            return Err(HangmanError::GameOver);
        }
        if self.remaining_guesses > 1 && self.guessed_letters.contains(&letter) {
            return Err(HangmanError::DuplicateGuess(letter));
        }

        let mut guessed_letters = self.guessed_letters.clone();
        guessed_letters.insert(letter);
        let groups = partition_by_pattern(&self.candidates, &guessed_letters);
        let num_groups = groups.len();
        let (pattern, candidates) =
            select_largest_group(groups).ok_or(HangmanError::EmptyCandidateSet)?;

        let occurrences = pattern.occurrences_of(letter);
        if occurrences == 0 {
            self.remaining_guesses -= 1;
        }
        debug!(
            %letter,
            num_groups,
            pattern = %pattern,
            num_candidates = candidates.len(),
            occurrences,
            remaining_guesses = self.remaining_guesses,
            "recorded guess"
        );
        self.guessed_letters = guessed_letters;
        self.pattern = pattern;
        self.candidates = candidates;
        Ok(occurrences)
    }
}

/// The serialized form of a [`HangmanManager`], checked before a game is resumed from it.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HangmanSnapshot {
    word_length: usize,
    candidates: BTreeSet<Arc<str>>,
    pattern: Pattern,
    guessed_letters: BTreeSet<char>,
    remaining_guesses: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<HangmanSnapshot> for HangmanManager {
    type Error = InvalidSnapshot;

    fn try_from(snapshot: HangmanSnapshot) -> Result<Self, Self::Error> {
        if snapshot.word_length < 1 {
            return Err(InvalidSnapshot::new("word length must be at least 1"));
        }
        if snapshot.pattern.len() != snapshot.word_length {
            return Err(InvalidSnapshot::new(format!(
                "pattern has {} positions but words have {} letters",
                snapshot.pattern.len(),
                snapshot.word_length
            )));
        }
        for word in &snapshot.candidates {
            if word.chars().count() != snapshot.word_length {
                return Err(InvalidSnapshot::new(format!(
                    "candidate {} does not have {} letters",
                    word, snapshot.word_length
                )));
            }
            if Pattern::induced_by(word, &snapshot.guessed_letters) != snapshot.pattern {
                return Err(InvalidSnapshot::new(format!(
                    "candidate {} does not match the pattern {}",
                    word, snapshot.pattern
                )));
            }
        }
        Ok(HangmanManager {
            word_length: snapshot.word_length,
            candidates: snapshot.candidates,
            pattern: snapshot.pattern,
            guessed_letters: snapshot.guessed_letters,
            remaining_guesses: snapshot.remaining_guesses,
        })
    }
}

/// Groups `words` by the pattern each one induces once the `guessed` letters are revealed.
pub fn partition_by_pattern(
    words: &BTreeSet<Arc<str>>,
    guessed: &BTreeSet<char>,
) -> BTreeMap<Pattern, BTreeSet<Arc<str>>> {
    if words.len() >= PARALLEL_PARTITION_THRESHOLD {
        trace!(num_words = words.len(), "partitioning in parallel");
        return words
            .par_iter()
            .fold(BTreeMap::new, |mut groups, word| {
                add_to_group(&mut groups, word, guessed);
                groups
            })
            .reduce(BTreeMap::new, merge_groups);
    }
    let mut groups = BTreeMap::new();
    for word in words {
        add_to_group(&mut groups, word, guessed);
    }
    groups
}

/// Picks the group with the most words. Ties go to the group with the smallest pattern.
///
/// Returns `None` iff `groups` is empty.
pub fn select_largest_group(
    groups: BTreeMap<Pattern, BTreeSet<Arc<str>>>,
) -> Option<(Pattern, BTreeSet<Arc<str>>)> {
    let mut best: Option<(Pattern, BTreeSet<Arc<str>>)> = None;
    for (pattern, words) in groups {
        // Only a strictly larger group replaces the current best, so the first of a tie is kept.
        if best
            .as_ref()
            .map_or(true, |(_, best_words)| words.len() > best_words.len())
        {
            best = Some((pattern, words));
        }
    }
    best
}

fn add_to_group(
    groups: &mut BTreeMap<Pattern, BTreeSet<Arc<str>>>,
    word: &Arc<str>,
    guessed: &BTreeSet<char>,
) {
    groups
        .entry(Pattern::induced_by(word, guessed))
        .or_default()
        .insert(Arc::clone(word));
}

fn merge_groups(
    mut groups: BTreeMap<Pattern, BTreeSet<Arc<str>>>,
    other: BTreeMap<Pattern, BTreeSet<Arc<str>>>,
) -> BTreeMap<Pattern, BTreeSet<Arc<str>>> {
    for (pattern, mut words) in other {
        groups.entry(pattern).or_default().append(&mut words);
    }
    groups
}
