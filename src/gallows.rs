//! Gallows artwork, one stage per mistake.

use crate::round::MAX_ERRORS;

/// Drawing stages indexed by error count. The last entry is the losing state.
pub const STAGES: [&str; MAX_ERRORS + 1] = [
    "╔═══╕\n║\n║\n║\n║\n╩",
    "╔═══╕\n║   0\n║\n║\n║\n╩",
    "╔═══╕\n║   0\n║   │\n║\n║\n╩",
    "╔═══╕\n║   0\n║  /│\n║\n║\n╩",
    "╔═══╕\n║   0\n║  /│\\\n║\n║\n╩",
    "╔═══╕\n║   0\n║  /│\\\n║  /\n║\n╩",
    "╔═══╕\n║   0\n║  /│\\\n║  / \\\n║\n╩",
];

/// Returns the drawing for `errors` mistakes, saturating at the full figure.
#[must_use]
pub fn stage(errors: usize) -> &'static str {
    STAGES[errors.min(MAX_ERRORS)]
}
