use crate::info_log;
use crate::round::is_alphabet_letter;
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_WORDBANK_PATH: &str = "resources/words";

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("word list '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("word list '{}' contains no words", path.display())]
    Empty { path: PathBuf },
    #[error("word list '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WordBankError {
    /// Message shown to the player before the program stops.
    #[must_use]
    pub fn user_message(&self) -> String {
        let reason = match self {
            Self::NotFound { .. } => "Не найден файл со словами!".to_string(),
            Self::Empty { .. } => "Файл не содержит слов!".to_string(),
            Self::Unreadable { source, .. } => {
                format!("Не удалось прочитать файл со словами ({source})!")
            }
        };
        format!("ОШИБКА! {reason} Продолжение игры невозможно.")
    }
}

/// Non-empty list of playable secret words: lowercase, alphabet letters only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Normalizes every entry and drops the ones that cannot be played.
    /// Returns `None` when nothing is left.
    #[must_use]
    pub fn new(words: Vec<String>) -> Option<Self> {
        let words: Vec<String> = words.iter().filter_map(|w| normalize_word(w)).collect();
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Uniform pick over the whole list.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.random_range(0..self.words.len());
        &self.words[index]
    }
}

fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }
    if word.chars().all(is_alphabet_letter) {
        Some(word)
    } else {
        log::warn!("Skipping word list entry {word:?}: not made of alphabet letters");
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank, WordBankError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            WordBankError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            WordBankError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let words = load_wordbank_from_str(&data);
    info_log!("Loaded {} words from {}", words.len(), path.display());
    WordBank::new(words).ok_or_else(|| WordBankError::Empty {
        path: path.to_path_buf(),
    })
}
