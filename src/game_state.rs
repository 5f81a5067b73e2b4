use crate::round::{GuessOutcome, InvalidGuess, InvalidWord, Letter, Round, RoundStatus, RoundView};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::Rng;

/// Choice made at the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    NewRound,
    Quit,
}

/// Tally of one session, returned when the player quits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub wins: usize,
    pub losses: usize,
    pub abandoned: usize,
}

impl SessionStats {
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.wins + self.losses + self.abandoned
    }
}

/// Front end seam shared by the console and the terminal UI.
pub trait GameInterface {
    /// Shows the menu and reads one choice. `None` means the input was not
    /// recognized and the menu should be shown again. Closed input is `Quit`.
    fn read_menu_choice(&mut self) -> Option<UserAction>;
    fn display_round(&mut self, view: &RoundView);
    /// Prompts for a letter and returns the raw line, `None` once input is closed.
    fn read_letter(&mut self) -> Option<String>;
    fn display_invalid_guess(&mut self, error: &InvalidGuess);
    fn display_guess_outcome(&mut self, letter: Letter, outcome: GuessOutcome);
    fn display_result(&mut self, status: RoundStatus, secret: &str);
    fn display_exit_message(&mut self);
}

/// Menu selectors: `н` starts a round, `в` quits. Case-insensitive, nothing
/// else around the letter.
#[must_use]
pub fn parse_menu_choice(input: &str) -> Option<UserAction> {
    match input.to_lowercase().as_str() {
        "н" => Some(UserAction::NewRound),
        "в" => Some(UserAction::Quit),
        _ => None,
    }
}

/// Only the case is normalized; surrounding whitespace still makes the guess invalid.
#[must_use]
pub fn normalize_guess(input: &str) -> String {
    input.to_lowercase()
}

/// Plays one round of `word` to completion.
///
/// Returns `InProgress` if the input closed before the round finished.
pub fn play_round<I: GameInterface + ?Sized>(
    word: &str,
    interface: &mut I,
) -> Result<RoundStatus, InvalidWord> {
    let mut round = Round::new(word)?;

    loop {
        interface.display_round(&round.render());
        if round.is_over() {
            break;
        }

        let Some(line) = interface.read_letter() else {
            info_log!("play_round() - input closed, abandoning round");
            return Ok(RoundStatus::InProgress);
        };

        match Letter::parse(&normalize_guess(&line)) {
            Ok(letter) => {
                let outcome = round.apply_guess(letter);
                debug_log!("play_round() - '{}' -> {:?}", letter, outcome);
                interface.display_guess_outcome(letter, outcome);
            }
            Err(error) => {
                debug_log!("play_round() - rejected {:?}: {}", line, error);
                interface.display_invalid_guess(&error);
            }
        }
    }

    let status = round.status();
    info_log!(
        "Round finished: {:?} after {} errors",
        status,
        round.error_count()
    );
    interface.display_result(status, &round.secret());
    Ok(status)
}

/// Menu loop: one round per `NewRound`, until the player quits.
pub fn game_loop<I, R>(wordbank: &WordBank, interface: &mut I, rng: &mut R) -> SessionStats
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = SessionStats::default();

    loop {
        match interface.read_menu_choice() {
            Some(UserAction::NewRound) => {
                let word = wordbank.pick_random(rng);
                match play_round(word, interface) {
                    Ok(RoundStatus::Win) => stats.wins += 1,
                    Ok(RoundStatus::Lose) => stats.losses += 1,
                    Ok(RoundStatus::InProgress) => stats.abandoned += 1,
                    Err(e) => log::error!("Skipping unusable word: {e}"),
                }
            }
            Some(UserAction::Quit) => {
                interface.display_exit_message();
                break;
            }
            None => {
                debug_log!("game_loop() - unrecognized menu input");
            }
        }
    }

    info_log!(
        "Session over: {} rounds, {} won, {} lost",
        stats.rounds(),
        stats.wins,
        stats.losses
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallows;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq)]
    enum Event {
        Round(String, usize),
        Invalid,
        Outcome(char, GuessOutcome),
        Result(RoundStatus, String),
        Exit,
    }

    /// Feeds scripted menu choices and letters, records what is displayed.
    #[derive(Default)]
    struct ScriptedInterface {
        menu: VecDeque<Option<UserAction>>,
        letters: VecDeque<&'static str>,
        events: Vec<Event>,
        last_view: Option<RoundView>,
    }

    impl ScriptedInterface {
        fn new(menu: &[Option<UserAction>], letters: &[&'static str]) -> Self {
            Self {
                menu: menu.iter().copied().collect(),
                letters: letters.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn read_menu_choice(&mut self) -> Option<UserAction> {
            self.menu.pop_front().unwrap_or(Some(UserAction::Quit))
        }

        fn display_round(&mut self, view: &RoundView) {
            self.events
                .push(Event::Round(view.mask.clone(), view.error_count));
            self.last_view = Some(view.clone());
        }

        fn read_letter(&mut self) -> Option<String> {
            self.letters.pop_front().map(str::to_string)
        }

        fn display_invalid_guess(&mut self, _error: &InvalidGuess) {
            self.events.push(Event::Invalid);
        }

        fn display_guess_outcome(&mut self, letter: Letter, outcome: GuessOutcome) {
            self.events.push(Event::Outcome(letter.as_char(), outcome));
        }

        fn display_result(&mut self, status: RoundStatus, secret: &str) {
            self.events.push(Event::Result(status, secret.to_string()));
        }

        fn display_exit_message(&mut self) {
            self.events.push(Event::Exit);
        }
    }

    fn bank(words: &[&str]) -> WordBank {
        WordBank::new(words.iter().map(|w| (*w).to_string()).collect()).unwrap()
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("н"), Some(UserAction::NewRound));
        assert_eq!(parse_menu_choice("Н"), Some(UserAction::NewRound));
        assert_eq!(parse_menu_choice(" н"), None);
        assert_eq!(parse_menu_choice("н "), None);
        assert_eq!(parse_menu_choice("в"), Some(UserAction::Quit));
        assert_eq!(parse_menu_choice("В"), Some(UserAction::Quit));
        assert_eq!(parse_menu_choice(""), None);
        assert_eq!(parse_menu_choice("нв"), None);
        assert_eq!(parse_menu_choice("q"), None);
    }

    #[test]
    fn test_normalize_guess() {
        assert_eq!(normalize_guess("К"), "к");
        assert_eq!(normalize_guess("Ё"), "ё");
        assert_eq!(normalize_guess(" к"), " к");
        assert_eq!(normalize_guess("AB"), "ab");
    }

    #[test]
    fn test_play_round_win() {
        let mut ui = ScriptedInterface::new(&[], &["к", "О", "т"]);
        let status = play_round("кот", &mut ui).unwrap();

        assert_eq!(status, RoundStatus::Win);
        assert_eq!(
            ui.events,
            vec![
                Event::Round("___".into(), 0),
                Event::Outcome('к', GuessOutcome::Revealed(1)),
                Event::Round("К__".into(), 0),
                Event::Outcome('о', GuessOutcome::Revealed(1)),
                Event::Round("КО_".into(), 0),
                Event::Outcome('т', GuessOutcome::Revealed(1)),
                Event::Round("КОТ".into(), 0),
                Event::Result(RoundStatus::Win, "кот".into()),
            ]
        );
    }

    #[test]
    fn test_play_round_lose_shows_full_gallows() {
        let mut ui = ScriptedInterface::new(&[], &["а", "б", "в", "г", "д", "е"]);
        let status = play_round("кот", &mut ui).unwrap();

        assert_eq!(status, RoundStatus::Lose);
        let view = ui.last_view.unwrap();
        assert_eq!(view.error_count, 6);
        assert_eq!(view.wrong_letters, "а, б, в, г, д, е");
        assert_eq!(view.gallows, gallows::STAGES[6]);
        assert_eq!(
            ui.events.last(),
            Some(&Event::Result(RoundStatus::Lose, "кот".into()))
        );
    }

    #[test]
    fn test_play_round_invalid_input_changes_nothing() {
        let mut ui = ScriptedInterface::new(&[], &["ab", "1", "", "кк", "к", "о", "т"]);
        let status = play_round("кот", &mut ui).unwrap();

        assert_eq!(status, RoundStatus::Win);
        let invalid = ui.events.iter().filter(|e| **e == Event::Invalid).count();
        assert_eq!(invalid, 4);
        // Four re-renders of the untouched state before the first real guess.
        let untouched = ui
            .events
            .iter()
            .filter(|e| **e == Event::Round("___".into(), 0))
            .count();
        assert_eq!(untouched, 5);
    }

    #[test]
    fn test_play_round_padded_guess_is_invalid() {
        let mut ui = ScriptedInterface::new(&[], &[" к", "к ", "к", "о", "т"]);
        let status = play_round("кот", &mut ui).unwrap();

        assert_eq!(status, RoundStatus::Win);
        let invalid = ui.events.iter().filter(|e| **e == Event::Invalid).count();
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_play_round_repeated_guesses() {
        let mut ui = ScriptedInterface::new(&[], &["ж", "ж", "к", "к", "о", "т"]);
        play_round("кот", &mut ui).unwrap();

        assert!(ui.events.contains(&Event::Outcome('ж', GuessOutcome::Miss)));
        assert!(ui.events.contains(&Event::Outcome('ж', GuessOutcome::Repeated)));
        assert!(ui.events.contains(&Event::Outcome('к', GuessOutcome::Repeated)));
        assert_eq!(ui.last_view.unwrap().error_count, 1);
    }

    #[test]
    fn test_play_round_input_closed() {
        let mut ui = ScriptedInterface::new(&[], &["к"]);
        let status = play_round("кот", &mut ui).unwrap();

        assert_eq!(status, RoundStatus::InProgress);
        assert!(!ui.events.iter().any(|e| matches!(e, Event::Result(..))));
    }

    #[test]
    fn test_play_round_rejects_bad_word() {
        let mut ui = ScriptedInterface::new(&[], &[]);
        assert!(play_round("", &mut ui).is_err());
        assert!(ui.events.is_empty());
    }

    #[test]
    fn test_game_loop_immediate_quit() {
        let mut ui = ScriptedInterface::new(&[Some(UserAction::Quit)], &[]);
        let mut rng = StdRng::seed_from_u64(0);
        let stats = game_loop(&bank(&["кот"]), &mut ui, &mut rng);

        assert_eq!(stats, SessionStats::default());
        assert_eq!(ui.events, vec![Event::Exit]);
    }

    #[test]
    fn test_game_loop_ignores_unknown_choice() {
        let mut ui = ScriptedInterface::new(&[None, None, Some(UserAction::Quit)], &[]);
        let mut rng = StdRng::seed_from_u64(0);
        let stats = game_loop(&bank(&["кот"]), &mut ui, &mut rng);

        assert_eq!(stats.rounds(), 0);
        assert_eq!(ui.events, vec![Event::Exit]);
    }

    #[test]
    fn test_game_loop_plays_several_rounds() {
        let menu = [
            Some(UserAction::NewRound),
            Some(UserAction::NewRound),
            Some(UserAction::Quit),
        ];
        let letters = ["к", "о", "т", "а", "б", "в", "г", "д", "е"];
        let mut ui = ScriptedInterface::new(&menu, &letters);
        let mut rng = StdRng::seed_from_u64(3);
        let stats = game_loop(&bank(&["кот"]), &mut ui, &mut rng);

        assert_eq!(
            stats,
            SessionStats {
                wins: 1,
                losses: 1,
                abandoned: 0
            }
        );
        assert_eq!(ui.events.last(), Some(&Event::Exit));
    }

    #[test]
    fn test_game_loop_plays_mixed_case_words() {
        let words = vec!["Кот".to_string(), "dog".to_string()];
        let wordbank = WordBank::new(words).unwrap();
        let menu = [Some(UserAction::NewRound), Some(UserAction::Quit)];
        let mut ui = ScriptedInterface::new(&menu, &["к", "о", "т"]);
        let mut rng = StdRng::seed_from_u64(11);
        let stats = game_loop(&wordbank, &mut ui, &mut rng);

        assert_eq!(stats.wins, 1);
        assert!(ui.events.contains(&Event::Result(RoundStatus::Win, "кот".into())));
    }

    #[test]
    fn test_game_loop_state_is_fresh_each_round() {
        let menu = [Some(UserAction::NewRound), Some(UserAction::NewRound)];
        let letters = ["ж", "к", "о", "т", "к"];
        let mut ui = ScriptedInterface::new(&menu, &letters);
        let mut rng = StdRng::seed_from_u64(9);
        let stats = game_loop(&bank(&["кот"]), &mut ui, &mut rng);

        // The second round starts masked with no errors and 'к' counts again.
        let second_start = ui
            .events
            .iter()
            .position(|e| matches!(e, Event::Result(..)))
            .unwrap()
            + 1;
        assert_eq!(ui.events[second_start], Event::Round("___".into(), 0));
        assert_eq!(
            ui.events[second_start + 1],
            Event::Outcome('к', GuessOutcome::Revealed(1))
        );
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.abandoned, 1);
    }
}
