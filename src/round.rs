//! Single-round state machine: secret word, mask, mistakes and status.
//!
//! A [`Round`] is created from one secret word and dropped when the round
//! ends. Input is validated into a [`Letter`] before it can touch the state,
//! so malformed guesses never consume a turn.

use crate::gallows;
use crate::{debug_log, info_log};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Number of wrong letters that loses the round.
pub const MAX_ERRORS: usize = 6;

/// Symbol shown for an unrevealed position.
pub const PLACEHOLDER: char = '_';

const SPECIAL_LETTER: char = 'ё';

/// True for the lowercase letters of the game alphabet (`а`..=`я` and `ё`).
#[must_use]
pub fn is_alphabet_letter(c: char) -> bool {
    ('а'..='я').contains(&c) || c == SPECIAL_LETTER
}

/// Checks raw guess input without normalizing it.
#[must_use]
pub fn validate_guess(input: &str) -> bool {
    Letter::parse(input).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("no letter entered")]
    Empty,
    #[error("expected a single letter, got {0} characters")]
    TooLong(usize),
    #[error("'{0}' is not a lowercase letter of the alphabet")]
    OutsideAlphabet(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidWord {
    #[error("secret word is empty")]
    Empty,
    #[error("secret word {word:?} contains '{letter}' outside the alphabet")]
    OutsideAlphabet { word: String, letter: char },
}

/// A validated single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(char);

impl Letter {
    pub fn parse(input: &str) -> Result<Self, InvalidGuess> {
        let mut chars = input.chars();
        let Some(c) = chars.next() else {
            return Err(InvalidGuess::Empty);
        };
        if chars.next().is_some() {
            return Err(InvalidGuess::TooLong(input.chars().count()));
        }
        if is_alphabet_letter(c) {
            Ok(Self(c))
        } else {
            Err(InvalidGuess::OutsideAlphabet(c))
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Win,
    Lose,
}

impl RoundStatus {
    /// Heading used when announcing the result.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "ИГРА НЕ ЗАКОНЧЕНА",
            Self::Win => "ПОБЕДА",
            Self::Lose => "ПОРАЖЕНИЕ",
        }
    }
}

/// What a single [`Round::apply_guess`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the word; this many positions were opened.
    Revealed(usize),
    /// The letter is not in the word and was recorded as a mistake.
    Miss,
    /// The letter was already tried this round.
    Repeated,
    /// The round had already finished; nothing changed.
    RoundOver,
}

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub mask: String,
    pub error_count: usize,
    pub wrong_letters: String,
    pub gallows: &'static str,
    pub status: RoundStatus,
}

#[derive(Debug, Clone)]
pub struct Round {
    secret: Vec<char>,
    mask: Vec<Option<char>>,
    wrong_letters: Vec<char>,
    attempted: HashSet<char>,
    guessed_count: usize,
}

impl Round {
    pub fn new(word: &str) -> Result<Self, InvalidWord> {
        if word.is_empty() {
            return Err(InvalidWord::Empty);
        }
        if let Some(letter) = word.chars().find(|&c| !is_alphabet_letter(c)) {
            return Err(InvalidWord::OutsideAlphabet {
                word: word.to_string(),
                letter,
            });
        }

        let secret: Vec<char> = word.chars().collect();
        info_log!("Round::new() - {} letter word", secret.len());
        Ok(Self {
            mask: vec![None; secret.len()],
            secret,
            wrong_letters: Vec::new(),
            attempted: HashSet::new(),
            guessed_count: 0,
        })
    }

    #[must_use]
    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.wrong_letters.len()
    }

    #[must_use]
    pub fn guessed_count(&self) -> usize {
        self.guessed_count
    }

    #[must_use]
    pub fn wrong_letters(&self) -> &[char] {
        &self.wrong_letters
    }

    /// Revealed letters by position, `None` where still hidden.
    #[must_use]
    pub fn mask(&self) -> &[Option<char>] {
        &self.mask
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.error_count() >= MAX_ERRORS {
            RoundStatus::Lose
        } else if self.guessed_count == self.secret.len() {
            RoundStatus::Win
        } else {
            RoundStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status() != RoundStatus::InProgress
    }

    pub fn apply_guess(&mut self, letter: Letter) -> GuessOutcome {
        if self.is_over() {
            return GuessOutcome::RoundOver;
        }

        let c = letter.as_char();
        if !self.attempted.insert(c) {
            debug_log!("apply_guess() - '{}' already tried", c);
            return GuessOutcome::Repeated;
        }

        if self.secret.contains(&c) {
            let mut opened = 0;
            for (slot, &secret) in self.mask.iter_mut().zip(&self.secret) {
                if secret == c && slot.is_none() {
                    *slot = Some(c);
                    opened += 1;
                }
            }
            self.guessed_count += opened;
            debug_log!("apply_guess() - '{}' opened {} positions", c, opened);
            GuessOutcome::Revealed(opened)
        } else {
            self.wrong_letters.push(c);
            debug_log!(
                "apply_guess() - '{}' missed, {} errors",
                c,
                self.error_count()
            );
            GuessOutcome::Miss
        }
    }

    /// Mask in uppercase with placeholders for hidden positions.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.mask
            .iter()
            .flat_map(|slot| match slot {
                Some(c) => c.to_uppercase().collect::<Vec<_>>(),
                None => vec![PLACEHOLDER],
            })
            .collect()
    }

    #[must_use]
    pub fn render(&self) -> RoundView {
        let wrong_letters = self
            .wrong_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        RoundView {
            mask: self.masked_word(),
            error_count: self.error_count(),
            wrong_letters,
            gallows: gallows::stage(self.error_count()),
            status: self.status(),
        }
    }
}
