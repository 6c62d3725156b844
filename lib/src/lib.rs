#![cfg_attr(feature = "unstable", feature(test))]

//! An engine for adversarial ("evil") hangman.
//!
//! The [`HangmanManager`] never commits to a secret word. It keeps every dictionary word that is
//! consistent with the guesses so far, and answers each guess in whichever way keeps the most of
//! those words in play.

mod engine;
mod pattern;
mod results;

pub use engine::HangmanManager;
pub use pattern::*;
pub use results::*;

/// The building blocks used by [`HangmanManager::record_guess`].
pub mod details {
    pub use crate::engine::partition_by_pattern;
    pub use crate::engine::select_largest_group;
    pub use crate::engine::PARALLEL_PARTITION_THRESHOLD;
}
