// Conditional logging macros - only active in debug builds

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "hangman.log";

/// Location of the log file, `<cache dir>/hangman/hangman.log`.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hangman").join(LOG_FILE_NAME))
}

/// Sends log records to the log file so they never land on the game screen.
///
/// Filtering follows `RUST_LOG` (default `info`). Logging stays disabled if
/// the file cannot be created.
pub fn init_logging() -> Option<PathBuf> {
    let path = log_file_path()?;
    init_logging_to(&path).then_some(path)
}

/// Installs the file logger at `path`, creating parent directories.
/// Returns `false` if the file cannot be opened or a logger is already set.
pub fn init_logging_to(path: &Path) -> bool {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return false;
    }
    let Ok(file) = File::options().create(true).append(true).open(path) else {
        return false;
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok()
}
