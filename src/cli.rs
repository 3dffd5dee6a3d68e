use crate::engine::{Feedback, GuessEngine, WORD_LENGTH};
use crate::game_state::{GameInterface, Rejection, Stats, UserAction};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;

/// Wordle-style guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list to draw secret words from
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Number of guesses per round
    #[arg(short = 'r', long = "rows", default_value_t = crate::engine::DEFAULT_ROWS)]
    pub rows: usize,

    /// Play every round against this word instead of a random one
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Line-oriented play on stdin/stdout instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Write debug output to the log file
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Translate one input line into engine actions.
///
/// `exit` and `next` are commands; otherwise every character is typed, `-`
/// erases, and the line ends with ENTER.
pub fn parse_line(line: &str) -> Vec<UserAction> {
    let input = line.trim().to_uppercase();
    match input.as_str() {
        "EXIT" => vec![UserAction::Exit],
        "NEXT" => vec![UserAction::NewGame],
        _ => input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '-' => UserAction::Erase,
                c => UserAction::Letter(c),
            })
            .chain(std::iter::once(UserAction::Enter))
            .collect(),
    }
}

#[must_use]
pub fn format_feedback(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.as_char()).collect()
}

/// Render the grid as text: committed rows carry their G/Y/X feedback.
#[must_use]
pub fn format_board(engine: &GuessEngine) -> String {
    let mut lines = Vec::with_capacity(engine.rows());
    for row in 0..engine.rows() {
        let letters: String = (0..WORD_LENGTH)
            .map(|col| engine.get_cell(row as isize, col as isize).unwrap_or('_'))
            .collect();
        match engine.evaluate_row(row) {
            Some(feedback) => {
                lines.push(format!("{letters}  {}", format_feedback(&feedback)));
            }
            None => lines.push(letters),
        }
    }
    lines.join("\n")
}

/// Line-based implementation of the `GameInterface` trait.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self) -> Option<UserAction> {
        while self.pending.is_empty() {
            println!(
                "\nEnter your guess (5 letters, '-' to erase, 'next' for a new game, 'exit' to quit):"
            );
            let mut input = String::new();
            match self.reader.read_line(&mut input) {
                Ok(0) | Err(_) => return None,
                Ok(_) => self.pending.extend(parse_line(&input)),
            }
        }
        self.pending.pop_front()
    }

    fn display_board(&mut self, engine: &GuessEngine) {
        // One board per input line is enough.
        if self.pending.is_empty() {
            println!("{}", format_board(engine));
        }
    }

    fn display_row_result(&mut self, row: usize, feedback: &[Feedback]) {
        println!("Row {}: {}", row + 1, format_feedback(feedback));
    }

    fn display_rejected(&mut self, rejection: Rejection) {
        println!("{}", rejection.message());
    }

    fn display_win(&mut self, secret: &str, stats: &Stats) {
        println!("Congratulations! You won! The word was {secret}.");
        println!("Games: {} | Wins: {}", stats.played, stats.won);
    }

    fn display_loss(&mut self, secret: &str, stats: &Stats) {
        println!("You lost! The word was {secret}.");
        println!("Games: {} | Wins: {}", stats.played, stats.won);
    }

    fn display_new_round(&mut self, stats: &Stats) {
        println!("New round. Games: {} | Wins: {}", stats.played, stats.won);
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SecretWord;
    use std::io::Cursor;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wordlike"]);
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.rows, 7);
        assert_eq!(cli.word, None);
        assert!(!cli.plain);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_options() {
        let cli = Cli::parse_from([
            "wordlike", "-i", "words.txt", "--rows", "6", "--word", "crane", "--plain", "-v",
        ]);
        assert_eq!(cli.wordbank_path.as_deref(), Some("words.txt"));
        assert_eq!(cli.rows, 6);
        assert_eq!(cli.word.as_deref(), Some("crane"));
        assert!(cli.plain);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(parse_line("exit\n"), vec![UserAction::Exit]);
        assert_eq!(parse_line("  Next "), vec![UserAction::NewGame]);
    }

    #[test]
    fn test_parse_line_word() {
        assert_eq!(
            parse_line("cr-a\n"),
            vec![
                UserAction::Letter('C'),
                UserAction::Letter('R'),
                UserAction::Erase,
                UserAction::Letter('A'),
                UserAction::Enter,
            ]
        );
    }

    #[test]
    fn test_parse_empty_line_is_enter() {
        assert_eq!(parse_line("\n"), vec![UserAction::Enter]);
    }

    #[test]
    fn test_read_action_drains_line_then_stops() {
        let mut interface = CliInterface::new(Cursor::new("ab\n"));
        assert_eq!(interface.read_action(), Some(UserAction::Letter('A')));
        assert_eq!(interface.read_action(), Some(UserAction::Letter('B')));
        assert_eq!(interface.read_action(), Some(UserAction::Enter));
        assert_eq!(interface.read_action(), None);
    }

    #[test]
    fn test_format_board() {
        let mut engine = GuessEngine::new(3);
        engine.set_secret_word(SecretWord::parse("CRANE").unwrap());
        for c in "CRATE".chars() {
            engine.place_letter(c);
        }
        engine.commit_row();
        engine.place_letter('S');
        assert_eq!(format_board(&engine), "CRATE  GGGXG\nS____\n_____");
    }
}
