//! Guess engine for a single round.
//!
//! The engine owns a fixed grid of `rows` x [`WORD_LENGTH`] cells, the cursor
//! pointing at the next writable cell, the secret word and the terminal flag.
//! Every invalid request is reported through a `bool` or `Option` return;
//! nothing here panics or performs I/O.

use crate::debug_log;
use std::fmt;

pub const WORD_LENGTH: usize = 5;
pub const DEFAULT_ROWS: usize = 7;

/// A grid cell. `None` is the empty marker.
pub type Cell = Option<char>;

/// Per-letter evaluation of a committed row against the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter sits at the same position in the secret word.
    Exact,
    /// Letter occurs somewhere else in the secret word.
    Present,
    /// Letter does not occur in the secret word.
    Absent,
}

impl Feedback {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    Length(usize),
    NonAlphabetic(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(len) => write!(f, "expected {WORD_LENGTH} letters, got {len}"),
            Self::NonAlphabetic(c) => write!(f, "'{c}' is not a letter"),
        }
    }
}

impl std::error::Error for WordError {}

/// The word a round is played against: exactly [`WORD_LENGTH`] uppercase ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretWord([char; WORD_LENGTH]);

impl SecretWord {
    /// Parse and normalise a secret word.
    ///
    /// # Errors
    ///
    /// Returns [`WordError`] if the word is not exactly five ASCII letters.
    pub fn parse(word: &str) -> Result<Self, WordError> {
        let word = word.trim();
        let len = word.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::Length(len));
        }
        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(word.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::NonAlphabetic(c));
            }
            *slot = c.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    /// Build a word from letters already known to be uppercase ASCII.
    pub(crate) const fn from_letters(letters: [char; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    #[must_use]
    pub const fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Next writable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    Won,
    Lost,
}

/// Result of [`GuessEngine::submit_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub row: usize,
    pub feedback: [Feedback; WORD_LENGTH],
    pub status: RoundStatus,
}

#[derive(Debug, Clone)]
pub struct GuessEngine {
    grid: Vec<[Cell; WORD_LENGTH]>,
    cursor: Cursor,
    secret: Option<SecretWord>,
    terminal: bool,
}

impl Default for GuessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS)
    }
}

impl GuessEngine {
    /// Create an engine with `rows` attempts. At least one row is always allocated.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            grid: vec![[None; WORD_LENGTH]; rows.max(1)],
            cursor: Cursor::default(),
            secret: None,
            terminal: false,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Clear the grid, home the cursor and drop the secret word.
    pub fn reset(&mut self) {
        for row in &mut self.grid {
            *row = [None; WORD_LENGTH];
        }
        self.cursor = Cursor::default();
        self.secret = None;
        self.terminal = false;
        debug_log!("engine reset ({} rows)", self.grid.len());
    }

    pub fn set_secret_word(&mut self, word: SecretWord) {
        self.secret = Some(word);
    }

    #[must_use]
    pub fn secret_word(&self) -> Option<SecretWord> {
        self.secret
    }

    /// Write `ch` into the cursor cell.
    ///
    /// Returns `false` when the round is over, the character is not a letter, or
    /// the cursor cell already holds a letter (a full row waiting for commit).
    pub fn place_letter(&mut self, ch: char) -> bool {
        if self.terminal || !ch.is_ascii_alphabetic() {
            return false;
        }
        let Cursor { row, col } = self.cursor;
        let Some(cells) = self.grid.get_mut(row) else {
            return false;
        };
        if cells[col].is_some() {
            return false;
        }
        cells[col] = Some(ch.to_ascii_uppercase());
        if col < WORD_LENGTH - 1 {
            self.cursor.col += 1;
        }
        true
    }

    /// Remove the letter under the cursor, stepping back first if that cell is empty.
    pub fn erase_letter(&mut self) {
        if self.terminal {
            return;
        }
        let Some(cells) = self.grid.get_mut(self.cursor.row) else {
            return;
        };
        if cells[self.cursor.col].is_none() && self.cursor.col > 0 {
            self.cursor.col -= 1;
        }
        cells[self.cursor.col] = None;
    }

    /// Lock in the current row if it is complete.
    ///
    /// Committing the last available row makes the round terminal. The caller
    /// must still run [`Self::check_win`] to tell a win from a loss.
    pub fn commit_row(&mut self) -> bool {
        if self.terminal || self.cursor.col != WORD_LENGTH - 1 {
            return false;
        }
        let Some(cells) = self.grid.get(self.cursor.row) else {
            return false;
        };
        if cells.iter().any(Option::is_none) {
            return false;
        }
        self.cursor = Cursor {
            row: self.cursor.row + 1,
            col: 0,
        };
        if self.cursor.row == self.grid.len() {
            self.terminal = true;
        }
        debug_log!("row {} committed", self.cursor.row - 1);
        true
    }

    /// Evaluate a single letter of a committed row.
    ///
    /// `None` for rows that are not committed yet, columns out of range, or when
    /// no secret word is set. A letter repeated in the guess is reported
    /// `Present` at every position where it is not exact.
    #[must_use]
    pub fn evaluate_cell(&self, row: usize, col: usize) -> Option<Feedback> {
        if row >= self.cursor.row || col >= WORD_LENGTH {
            return None;
        }
        let secret = self.secret.as_ref()?;
        let letter = self.grid.get(row)?[col]?;
        let feedback = if secret.letters()[col] == letter {
            Feedback::Exact
        } else if secret.contains(letter) {
            Feedback::Present
        } else {
            Feedback::Absent
        };
        Some(feedback)
    }

    #[must_use]
    pub fn evaluate_row(&self, row: usize) -> Option<[Feedback; WORD_LENGTH]> {
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for (col, slot) in feedback.iter_mut().enumerate() {
            *slot = self.evaluate_cell(row, col)?;
        }
        Some(feedback)
    }

    /// Scan the committed rows for the secret word; a match ends the round.
    pub fn check_win(&mut self) -> bool {
        if self.has_winning_row() {
            self.terminal = true;
            true
        } else {
            false
        }
    }

    fn has_winning_row(&self) -> bool {
        let Some(secret) = self.secret else {
            return false;
        };
        self.grid
            .iter()
            .take(self.cursor.row)
            .any(|cells| cells.iter().zip(secret.letters()).all(|(c, s)| *c == Some(*s)))
    }

    /// Commit the current row, evaluate it and check for a win, in that order.
    ///
    /// `None` leaves the engine untouched: the row is incomplete, the round is
    /// over, or no secret word is set.
    pub fn submit_row(&mut self) -> Option<Submission> {
        if self.secret.is_none() || !self.commit_row() {
            return None;
        }
        let row = self.cursor.row - 1;
        let feedback = self.evaluate_row(row)?;
        self.check_win();
        Some(Submission {
            row,
            feedback,
            status: self.status(),
        })
    }

    /// Letter at `(row, col)`, or the empty marker for any out-of-range position.
    #[must_use]
    pub fn get_cell(&self, row: isize, col: isize) -> Cell {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return None;
        };
        self.grid.get(row).and_then(|cells| cells.get(col).copied().flatten())
    }

    /// Letters of a row as a string, with spaces for empty cells.
    #[must_use]
    pub fn row_word(&self, row: usize) -> Option<String> {
        self.grid
            .get(row)
            .map(|cells| cells.iter().map(|c| c.unwrap_or(' ')).collect())
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        match (self.terminal, self.has_winning_row()) {
            (false, _) => RoundStatus::Playing,
            (true, true) => RoundStatus::Won,
            (true, false) => RoundStatus::Lost,
        }
    }
}
