use clap::{Parser, Subcommand};
use evil_hangman::*;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::result::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Plays a game of hangman against a computer that cheats: it never picks a word until it has to.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// The length of the word to guess. Picked at random from the dictionary if not given.
    #[clap(short, long)]
    length: Option<usize>,

    /// How many incorrect guesses are allowed.
    #[clap(short = 'g', long, default_value_t = 10)]
    max_guesses: i32,

    /// If true, prints how many words are still possible after each guess.
    #[clap(long)]
    show_candidates: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game, reading one guess per line from stdin.
    Interactive,
    /// Play a game with the given guesses, in order.
    Replay { guesses: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    info!(words_file = %args.words_file, "loading dictionary");

    let dictionary = read_dictionary(&args.words_file)?;
    let length = match args.length {
        Some(length) => length,
        None => choose_length(&dictionary).ok_or("the words file has no words")?,
    };
    debug!(length, "chose word length");

    let mut manager = start_game(&dictionary, length, args.max_guesses)?;
    println!(
        "I'm thinking of a word with {} letters. You have {} guesses.",
        manager.word_length(),
        manager.remaining_guesses()
    );

    match args.command {
        Command::Interactive => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            play(&mut manager, args.show_candidates, || {
                lines.next().transpose()
            })?
        }
        Command::Replay { guesses } => {
            let mut guesses = guesses.chars().filter(|letter| !letter.is_whitespace());
            play(&mut manager, args.show_candidates, || {
                Ok(guesses.next().map(String::from))
            })?
        }
    }
    Ok(())
}

/// Creates the game, failing if no word in the dictionary has the requested length.
fn start_game(
    dictionary: &[String],
    length: usize,
    max_guesses: i32,
) -> Result<HangmanManager, HangmanError> {
    let manager = HangmanManager::new(dictionary, length, max_guesses)?;
    if manager.candidate_words().is_empty() {
        return Err(HangmanError::EmptyCandidateSet);
    }
    Ok(manager)
}

/// Reads one word per line, ignoring blank lines. Words are trimmed and converted to lower case.
fn read_dictionary(path: &str) -> io::Result<Vec<String>> {
    let reader = io::BufReader::new(File::open(path)?);
    reader
        .lines()
        .filter_map(|maybe_line| match maybe_line {
            Ok(line) => {
                let word = line.trim();
                if word.is_empty() {
                    None
                } else {
                    Some(Ok(lowercase_word(word)))
                }
            }
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Lowercases each character on its own, so that a word keeps its length.
fn lowercase_word(word: &str) -> String {
    word.chars()
        .map(|letter| letter.to_lowercase().next().unwrap_or(letter))
        .collect()
}

fn choose_length(dictionary: &[String]) -> Option<usize> {
    let lengths: Vec<usize> = dictionary
        .iter()
        .map(|word| word.chars().count())
        .collect::<BTreeSet<usize>>()
        .into_iter()
        .collect();
    lengths.choose(&mut rand::thread_rng()).copied()
}

/// Drives the game until it is won, lost, or `next_guess` runs out of input.
fn play<F>(
    manager: &mut HangmanManager,
    show_candidates: bool,
    mut next_guess: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    while manager.remaining_guesses() > 0 && !manager.pattern().is_fully_revealed() {
        println!();
        println!("Guesses left: {}", manager.remaining_guesses());
        println!(
            "Guessed: {}",
            manager
                .guessed_letters()
                .iter()
                .map(char::to_string)
                .collect::<Vec<String>>()
                .join(" ")
        );
        println!("Pattern: {}", manager.current_pattern()?);
        if show_candidates {
            println!("Possible words: {}", manager.candidate_words().len());
        }
        println!("Your guess?");

        let input = match next_guess()? {
            Some(input) => input,
            None => {
                println!("Out of guesses to make. Goodbye!");
                return Ok(());
            }
        };
        let mut letters = input.trim().chars();
        let letter = match (letters.next(), letters.next()) {
            (Some(letter), None) => letter.to_lowercase().next().unwrap_or(letter),
            _ => {
                println!("Please enter exactly one letter.");
                continue;
            }
        };

        match manager.record_guess(letter) {
            Ok(0) => println!("Sorry, there are no {}'s.", letter),
            Ok(1) => println!("Yes, there is one {}.", letter),
            Ok(count) => println!("Yes, there are {} {}'s.", count, letter),
            Err(HangmanError::DuplicateGuess(_)) => {
                println!("You already guessed {}.", letter);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let word = manager
        .candidate_words()
        .iter()
        .next()
        .ok_or(HangmanError::EmptyCandidateSet)?;
    if manager.pattern().is_fully_revealed() {
        println!("The word was {}. You beat me!", word);
    } else {
        println!("Sorry, you lose. The word was {}.", word);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn start_game_no_words_of_length_fails() {
        let result = start_game(&dictionary(&["cat", "dog"]), 9, 10);

        assert_eq!(result, Err(HangmanError::EmptyCandidateSet));
        assert_eq!(
            result.unwrap_err().to_string(),
            "there are no candidate words left"
        );
    }

    #[test]
    fn start_game_invalid_configuration_fails() {
        let result = start_game(&dictionary(&["cat"]), 3, -1);

        assert_eq!(
            result,
            Err(HangmanError::InvalidConfiguration {
                length: 3,
                max_guesses: -1
            })
        );
    }

    #[test]
    fn start_game_succeeds() -> Result<(), HangmanError> {
        let manager = start_game(&dictionary(&["cat", "dog", "horse"]), 3, 4)?;

        assert_eq!(manager.candidate_words().len(), 2);
        assert_eq!(manager.remaining_guesses(), 4);
        Ok(())
    }

    #[test]
    fn lowercase_word_keeps_length() {
        let word = lowercase_word("İSTANBUL");

        assert_eq!(word.chars().count(), 8);
        assert_eq!(word, "istanbul");
    }

    #[test]
    fn lowercase_word_plain_ascii() {
        assert_eq!(lowercase_word("Hello"), "hello");
    }

    #[test]
    fn choose_length_empty_dictionary() {
        assert_eq!(choose_length(&[]), None);
    }

    #[test]
    fn choose_length_picks_a_present_length() {
        let words = dictionary(&["ab", "abcd"]);

        let length = choose_length(&words);

        assert!(matches!(length, Some(2) | Some(4)));
    }
}
