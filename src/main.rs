use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{game_loop, load_wordbank_from_file};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Some(path) = init_logging() {
        log::info!("Logging to {}", path.display());
    }

    let wordbank = match load_wordbank_from_file(&cli.wordbank_path) {
        Ok(words) => words,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let mut rng = rand::rng();
    let stats = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&wordbank, &mut interface, &mut rng),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&wordbank, &mut interface, &mut rng)
    };

    log::info!(
        "Exiting after {} rounds ({} won, {} lost, {} abandoned)",
        stats.rounds(),
        stats.wins,
        stats.losses,
        stats.abandoned
    );
    ExitCode::SUCCESS
}
