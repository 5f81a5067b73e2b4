use crate::debug_log;
use crate::game_state::{GameInterface, UserAction, parse_menu_choice};
use crate::round::{GuessOutcome, InvalidGuess, Letter, RoundStatus, RoundView};
use crate::wordbank::DEFAULT_WORDBANK_PATH;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input", default_value = DEFAULT_WORDBANK_PATH)]
    pub wordbank_path: PathBuf,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const MENU: &str = "\
ГЛАВНОЕ МЕНЮ
-----------------------------------
Начать новую игру - введите Н или н
Выход - введите В или в
-----------------------------------";

pub const INVALID_GUESS_MESSAGE: &str = "Введите одну букву русского алфавита!";

// UI Input/Output functions

pub fn display_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{MENU}")?;
    write!(out, "Ваш выбор: ")?;
    out.flush()
}

pub fn display_round<W: Write>(out: &mut W, view: &RoundView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Слово: {}", view.mask)?;
    writeln!(out, "Ошибки ({}): {}", view.error_count, view.wrong_letters)?;
    writeln!(out, "{}", view.gallows)
}

pub fn display_letter_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "Буква: ")?;
    out.flush()
}

pub fn display_invalid_guess<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{INVALID_GUESS_MESSAGE}")
}

pub fn display_result<W: Write>(out: &mut W, status: RoundStatus, secret: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}! Было загадано слово: {}.",
        status.label(),
        secret.to_uppercase()
    )
}

pub fn display_exit_message<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "До встречи!")
}

/// Reads one line without its line ending; `None` at end of input.
///
/// Bytes that are not UTF-8 become replacement characters, so a line typed
/// in another encoding is rejected as a guess rather than ending input.
pub fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => {
            let input = String::from_utf8_lossy(&buf);
            Some(input.trim_end_matches(['\n', '\r']).to_string())
        }
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

/// CLI implementation of the `GameInterface` trait.
/// Reads answers from `reader` and writes the transcript to `writer`.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            debug_log!("CliInterface - write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_menu_choice(&mut self) -> Option<UserAction> {
        Self::report(display_menu(&mut self.writer));
        match read_line(&mut self.reader) {
            Some(line) => parse_menu_choice(&line),
            None => Some(UserAction::Quit),
        }
    }

    fn display_round(&mut self, view: &RoundView) {
        Self::report(display_round(&mut self.writer, view));
    }

    fn read_letter(&mut self) -> Option<String> {
        Self::report(display_letter_prompt(&mut self.writer));
        read_line(&mut self.reader)
    }

    fn display_invalid_guess(&mut self, _error: &InvalidGuess) {
        Self::report(display_invalid_guess(&mut self.writer));
    }

    fn display_guess_outcome(&mut self, _letter: Letter, _outcome: GuessOutcome) {}

    fn display_result(&mut self, status: RoundStatus, secret: &str) {
        Self::report(display_result(&mut self.writer, status, secret));
    }

    fn display_exit_message(&mut self) {
        Self::report(display_exit_message(&mut self.writer));
    }
}
