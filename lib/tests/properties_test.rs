use evil_hangman::*;
use proptest::prelude::*;

fn dictionary() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-e]{2,4}", 0..40)
}

fn guesses() -> impl Strategy<Value = Vec<char>> {
    proptest::collection::vec(proptest::char::range('a', 'f'), 0..12)
}

fn play(manager: &mut HangmanManager, guesses: &[char]) -> Vec<Result<usize, HangmanError>> {
    guesses
        .iter()
        .map(|letter| manager.record_guess(*letter))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 300, .. ProptestConfig::default() })]

    #[test]
    fn candidates_always_match_pattern(
        words in dictionary(),
        length in 2usize..5,
        max_guesses in 0i32..8,
        guesses in guesses(),
    ) {
        let mut manager = HangmanManager::new(&words, length, max_guesses).unwrap();
        for letter in guesses {
            if manager.record_guess(letter).is_err() {
                continue;
            }
            for word in manager.candidate_words() {
                prop_assert_eq!(word.chars().count(), length);
                prop_assert_eq!(
                    &Pattern::induced_by(word, manager.guessed_letters()),
                    manager.pattern()
                );
            }
        }
    }

    #[test]
    fn candidates_shrink_but_never_empty(
        words in dictionary(),
        length in 2usize..5,
        guesses in guesses(),
    ) {
        let mut manager = HangmanManager::new(&words, length, 6).unwrap();
        let started_empty = manager.candidate_words().is_empty();
        for letter in guesses {
            let before = manager.candidate_words().len();
            let _ = manager.record_guess(letter);
            prop_assert!(manager.candidate_words().len() <= before);
            prop_assert_eq!(manager.candidate_words().is_empty(), started_empty);
        }
    }

    #[test]
    fn guesses_only_spent_on_misses(
        words in dictionary(),
        length in 2usize..5,
        max_guesses in 0i32..8,
        guesses in guesses(),
    ) {
        let mut manager = HangmanManager::new(&words, length, max_guesses).unwrap();
        for letter in guesses {
            let before = manager.remaining_guesses();
            match manager.record_guess(letter) {
                Ok(0) => {
                    prop_assert_eq!(manager.remaining_guesses(), before - 1);
                }
                Ok(occurrences) => {
                    prop_assert_eq!(manager.remaining_guesses(), before);
                    prop_assert_eq!(manager.pattern().occurrences_of(letter), occurrences);
                }
                Err(_) => {
                    prop_assert_eq!(manager.remaining_guesses(), before);
                }
            }
        }
    }

    #[test]
    fn errors_leave_state_unchanged(
        words in dictionary(),
        length in 2usize..5,
        max_guesses in 0i32..8,
        guesses in guesses(),
    ) {
        let mut manager = HangmanManager::new(&words, length, max_guesses).unwrap();
        for letter in guesses {
            let before = manager.clone();
            match manager.record_guess(letter) {
                Err(HangmanError::GameOver) => {
                    prop_assert!(before.candidate_words().is_empty() || before.remaining_guesses() == 0);
                    prop_assert_eq!(&manager, &before);
                }
                Err(HangmanError::DuplicateGuess(repeated)) => {
                    prop_assert_eq!(repeated, letter);
                    prop_assert!(before.remaining_guesses() > 1);
                    prop_assert!(before.guessed_letters().contains(&letter));
                    prop_assert_eq!(&manager, &before);
                }
                Err(other) => {
                    prop_assert!(false, "unexpected error {:?}", other);
                }
                Ok(_) => {
                    prop_assert!(manager.guessed_letters().contains(&letter));
                }
            }
        }
    }

    #[test]
    fn games_are_deterministic(
        words in dictionary(),
        length in 2usize..5,
        max_guesses in 0i32..8,
        guesses in guesses(),
    ) {
        let mut first = HangmanManager::new(&words, length, max_guesses).unwrap();
        let mut reversed_words = words.clone();
        reversed_words.reverse();
        let mut second = HangmanManager::new(&reversed_words, length, max_guesses).unwrap();

        prop_assert_eq!(play(&mut first, &guesses), play(&mut second, &guesses));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.current_pattern(), second.current_pattern());
    }
}
