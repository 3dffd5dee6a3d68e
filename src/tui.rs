//! TUI (Terminal User Interface) module for the guessing game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the grid snapshot taken from the engine and turns
//!   key presses into `UserAction`s for the game loop.
//!
//! # Key mapping
//! - Letters type into the cursor cell, BACKSPACE erases, ENTER submits
//! - After a round ends: `N` starts a new game
//! - ESC or Ctrl-C quits

use crate::engine::{Feedback, GuessEngine, WORD_LENGTH};
use crate::game_state::{GameInterface, Rejection, Stats, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
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

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Exact,   // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Exact => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Absent => (Color::Gray, Color::White),
        }
    }
}

impl From<Feedback> for LetterState {
    fn from(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Exact => Self::Exact,
            Feedback::Present => Self::Present,
            Feedback::Absent => Self::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn new() -> Self {
        Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        }
    }

    /// Snapshot one engine row, coloured if it has been committed.
    fn from_engine(engine: &GuessEngine, row: usize) -> Self {
        let mut guess = Self::new();
        let feedback = engine.evaluate_row(row);
        for col in 0..WORD_LENGTH {
            if let Some(letter) = engine.get_cell(row as isize, col as isize) {
                guess.letters[col] = letter;
                guess.states[col] = feedback.map_or(LetterState::Entered, |f| f[col].into());
            }
        }
        guess
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    cursor: (usize, usize),
    round_over: bool,
    stats: &'a Stats,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    cursor: (usize, usize),
    round_over: bool,
    stats: Stats,
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
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            cursor: (0, 0),
            round_over: false,
            stats: Stats::default(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
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
            rows: &self.rows,
            cursor: self.cursor,
            round_over: self.round_over,
            stats: &self.stats,
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

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_height = ctx.rows.len() as u16 * ROW_SPACING + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Game board
                Constraint::Min(4),               // Info panel
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.stats);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx.message, ctx.error_message, ctx.round_over);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.round_over);
    }

    fn render_title(f: &mut Frame, area: Rect, stats: &Stats) {
        let title = Paragraph::new(format!(
            "WORDLIKE    Games: {}  Wins: {}",
            stats.played, stats.won
        ))
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        for (row_index, row) in ctx.rows.iter().enumerate() {
            let active = !ctx.round_over && row_index == ctx.cursor.0;
            Self::render_guess_row(f, row, row_index, inner, active.then_some(ctx.cursor.1));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        guess: &GuessRow,
        row_index: usize,
        area: Rect,
        cursor_col: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..WORD_LENGTH {
            let (bg_color, fg_color) = guess.states[i].colors();
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if cursor_col == Some(i) {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!(" {} ", guess.letters[i]), style));
            spans.push(Span::raw(" "));
        }

        let line = Line::from(spans);
        f.render_widget(
            Paragraph::new(line),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, message: &str, error_message: &str, round_over: bool) {
        let mut lines = Vec::new();

        if !message.is_empty() {
            let style = if round_over { SUCCESS_STYLE } else { MESSAGE_STYLE };
            lines.push(Line::from(vec![Span::styled(message, style)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, round_over: bool) {
        let text = if round_over {
            "N: New Game | ESC: Quit"
        } else {
            "Type letters | BACKSPACE: Erase | ENTER: Submit | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        Ok(key_to_action(key, self.round_over))
    }
}

/// Map a key press to a game action.
///
/// Escape-sequence garbage from terminal focus changes and keys combined with
/// Alt/Ctrl are dropped, except Ctrl-C which quits.
fn key_to_action(key: KeyEvent, round_over: bool) -> Option<UserAction> {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char('c') if has_ctrl => Some(UserAction::Exit),
        _ if has_ctrl || has_alt => None,
        KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => {
            debug_log!("key_to_action() - Ignoring invalid character {:?}", c);
            None
        }
        KeyCode::Char('n' | 'N') if round_over => Some(UserAction::NewGame),
        KeyCode::Char(c) => Some(UserAction::Letter(c)),
        KeyCode::Backspace => Some(UserAction::Erase),
        KeyCode::Enter => Some(UserAction::Enter),
        _ => None,
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    self.error_message.clear();
                    debug_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input ({}), returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_board(&mut self, engine: &GuessEngine) {
        self.rows = (0..engine.rows())
            .map(|row| GuessRow::from_engine(engine, row))
            .collect();
        let cursor = engine.cursor();
        self.cursor = (cursor.row, cursor.col);
        self.round_over = engine.is_terminal();
        if !self.round_over {
            self.status = format!("Guess {} of {}", cursor.row + 1, engine.rows());
        }
        self.draw_or_log();
    }

    fn display_row_result(&mut self, row: usize, feedback: &[Feedback]) {
        let exact = feedback.iter().filter(|f| **f == Feedback::Exact).count();
        self.message = format!("Row {}: {exact} of {WORD_LENGTH} letters in place", row + 1);
    }

    fn display_rejected(&mut self, rejection: Rejection) {
        self.error_message = rejection.message().to_string();
    }

    fn display_win(&mut self, secret: &str, stats: &Stats) {
        self.stats = *stats;
        self.message = format!("Congratulations! You won! The word was {secret}.");
        self.status = "Game Over - You won".to_string();
    }

    fn display_loss(&mut self, secret: &str, stats: &Stats) {
        self.stats = *stats;
        self.message = format!("You lost! The word was {secret}.");
        self.status = "Game Over - Out of guesses".to_string();
    }

    fn display_new_round(&mut self, stats: &Stats) {
        self.stats = *stats;
        self.round_over = false;
        self.message = "New round - guess the five-letter word".to_string();
        self.error_message.clear();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
