// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod gallows;
pub mod game_state;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{GameInterface, SessionStats, UserAction, game_loop, play_round};
pub use round::{GuessOutcome, Letter, MAX_ERRORS, Round, RoundStatus, RoundView, validate_guess};
pub use wordbank::{WordBank, WordBankError, load_wordbank_from_file, load_wordbank_from_str};
