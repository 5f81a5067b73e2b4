//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! `TuiInterface` owns the terminal, keeps the last [`RoundView`] it was given
//! and implements [`GameInterface`], so the same game loop drives it as the
//! line-oriented console.
//!
//! # State Machine
//! - `Menu`: `Н` starts a round, `В` or `Esc` quits
//! - `Guessing`: every letter key is one guess, `Esc` leaves the round
//!
//! After a round ends the interface returns to `Menu` with the result shown.

use crate::cli::INVALID_GUESS_MESSAGE;
use crate::game_state::{GameInterface, UserAction, parse_menu_choice};
use crate::round::{GuessOutcome, InvalidGuess, Letter, MAX_ERRORS, RoundStatus, RoundView};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Menu,
    Guessing,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a RoundView>,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<RoundView>,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            view: None,
            state: TuiState::Menu,
            message: "Добро пожаловать!".to_string(),
            error_message: String::new(),
            status: "Главное меню".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Word and gallows
                Constraint::Length(5), // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_word(f, board[0], ctx.view);
        Self::render_gallows(f, board[1], ctx.view);
        Self::render_info(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("ВИСЕЛИЦА")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_word(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let mut lines = Vec::new();

        if let Some(view) = view {
            let spaced: Vec<String> = view.mask.chars().map(String::from).collect();
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(spaced.join(" "), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Ошибки ({}/{MAX_ERRORS}): ", view.error_count),
                    HEADER_STYLE,
                ),
                Span::styled(view.wrong_letters.clone(), ERROR_STYLE),
            ]));
        } else {
            lines.push(Line::from("Нажмите Н, чтобы начать новую игру."));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Слово").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let (drawing, style) = match view {
            Some(view) => {
                let style = match view.status {
                    RoundStatus::Lose => ERROR_STYLE,
                    RoundStatus::Win => SUCCESS_STYLE,
                    RoundStatus::InProgress => Style::default(),
                };
                (view.gallows, style)
            }
            None => (crate::gallows::stage(0), Style::default()),
        };

        let paragraph = Paragraph::new(drawing)
            .style(style)
            .block(Block::default().title("Виселица").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Сообщения").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Статус"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Menu => "Н: Новая игра | В или ESC: Выход",
            TuiState::Guessing => "Введите букву | ESC: Выйти из раунда",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Waits briefly for a key press; `Ok(None)` when nothing usable arrived.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring control character {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event {:?}", other);
                Ok(None)
            }
        }
    }

    /// Blocks until a usable key press, redrawing between polls.
    /// `None` when drawing or reading the terminal fails.
    fn wait_for_key(&mut self) -> Option<KeyEvent> {
        loop {
            if self.draw().is_err() {
                info_log!("wait_for_key() - Draw failed");
                return None;
            }
            match Self::next_key() {
                Ok(Some(key)) if !Self::has_modifier_keys(&key) => return Some(key),
                Ok(_) => {}
                Err(e) => {
                    info_log!("wait_for_key() - Input error: {}", e);
                    return None;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_menu_choice(&mut self) -> Option<UserAction> {
        self.state = TuiState::Menu;
        let Some(key) = self.wait_for_key() else {
            return Some(UserAction::Quit);
        };
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => Some(UserAction::Quit),
            KeyCode::Char(c) => {
                let choice = parse_menu_choice(&c.to_string());
                if choice.is_none() {
                    self.error_message = format!("Неизвестная команда: '{c}'");
                }
                choice
            }
            _ => None,
        }
    }

    fn display_round(&mut self, view: &RoundView) {
        if self.state == TuiState::Menu {
            self.message.clear();
            self.status = "Новая игра".to_string();
        }
        self.state = TuiState::Guessing;
        self.view = Some(view.clone());
        self.draw_or_log();
    }

    fn read_letter(&mut self) -> Option<String> {
        self.state = TuiState::Guessing;
        loop {
            let key = self.wait_for_key()?;
            self.error_message.clear();
            match key.code {
                KeyCode::Esc => {
                    info_log!("read_letter() - ESC pressed, leaving round");
                    self.status = "Раунд прерван".to_string();
                    self.state = TuiState::Menu;
                    return None;
                }
                KeyCode::Char(c) => return Some(c.to_string()),
                _ => {
                    debug_log!("read_letter() - Ignoring key: {:?}", key.code);
                }
            }
        }
    }

    fn display_invalid_guess(&mut self, error: &InvalidGuess) {
        self.error_message = format!("{INVALID_GUESS_MESSAGE} ({error})");
        self.draw_or_log();
    }

    fn display_guess_outcome(&mut self, letter: Letter, outcome: GuessOutcome) {
        let upper = letter.as_char().to_uppercase();
        self.message = match outcome {
            GuessOutcome::Revealed(1) => format!("Есть буква {upper}!"),
            GuessOutcome::Revealed(n) => format!("Есть буква {upper}! Открыто позиций: {n}"),
            GuessOutcome::Miss => format!("Буквы {upper} нет в слове."),
            GuessOutcome::Repeated => format!("Буква {upper} уже была."),
            GuessOutcome::RoundOver => "Раунд уже окончен.".to_string(),
        };
        self.draw_or_log();
    }

    fn display_result(&mut self, status: RoundStatus, secret: &str) {
        self.state = TuiState::Menu;
        self.message = format!(
            "{}! Было загадано слово: {}.",
            status.label(),
            secret.to_uppercase()
        );
        self.status = "Главное меню".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "До встречи!".to_string();
        self.status = "Выход...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
