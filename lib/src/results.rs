use thiserror::Error;

/// Indicates that an operation on a [`HangmanManager`](crate::HangmanManager) could not be
/// performed.
///
/// None of these are internal faults: each one is triggered by how the caller is driving the game,
/// and the manager's state is left untouched whenever one is returned.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HangmanError {
    /// The manager was constructed with a word length of zero or a negative guess budget.
    #[error("invalid configuration: word length {length} must be at least 1 and max guesses {max_guesses} must not be negative")]
    InvalidConfiguration { length: usize, max_guesses: i32 },
    /// The pattern was requested while there are no candidate words.
    #[error("there are no candidate words left")]
    EmptyCandidateSet,
    /// A guess was made after the game ended, either because there are no candidate words or no
    /// guesses left.
    #[error("the game is over")]
    GameOver,
    /// The given letter has already been guessed.
    #[error("the letter '{0}' has already been guessed")]
    DuplicateGuess(char),
}

/// Indicates that a serialized game could not be resumed because its state is inconsistent.
#[cfg(feature = "serde")]
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("invalid game snapshot: {reason}")]
pub struct InvalidSnapshot {
    reason: String,
}

#[cfg(feature = "serde")]
impl InvalidSnapshot {
    pub(crate) fn new(reason: impl Into<String>) -> InvalidSnapshot {
        InvalidSnapshot {
            reason: reason.into(),
        }
    }
}
