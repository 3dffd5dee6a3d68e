//! Round driver sitting between the engine and a user interface.
//!
//! Each round follows the same sequence: reset the engine, draw a word from the
//! supply, hand it to the engine, then accept input. After every successful
//! commit the row is evaluated and checked for a win before row exhaustion is
//! considered. Games/wins counters live here, never in the engine.

use crate::engine::{Feedback, GuessEngine, RoundStatus};
use crate::wordbank::WordSupply;
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Letter(char),
    Erase,
    Enter,
    NewGame,
    Exit,
}

/// Why an action had no effect on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    RowFull,
    NotALetter,
    IncompleteRow,
    RoundOver,
}

impl Rejection {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RowFull => "Row is full - press ENTER to submit",
            Self::NotALetter => "Only letters are allowed!",
            Self::IncompleteRow => "Guess must be exactly 5 letters!",
            Self::RoundOver => "Round is over - start a new game",
        }
    }
}

/// Finished-round counters for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub played: u32,
    pub won: u32,
}

impl Stats {
    fn record(&mut self, status: RoundStatus) {
        match status {
            RoundStatus::Won => {
                self.played += 1;
                self.won += 1;
            }
            RoundStatus::Lost => self.played += 1,
            RoundStatus::Playing => {}
        }
    }
}

/// Presentation collaborator driven by [`game_loop`].
pub trait GameInterface {
    /// Next user action, or `None` when input is exhausted.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_board(&mut self, engine: &GuessEngine);
    fn display_row_result(&mut self, row: usize, feedback: &[Feedback]);
    fn display_rejected(&mut self, rejection: Rejection);
    /// `stats` already include the round that just ended.
    fn display_win(&mut self, secret: &str, stats: &Stats);
    fn display_loss(&mut self, secret: &str, stats: &Stats);
    fn display_new_round(&mut self, stats: &Stats);
    fn display_exit_message(&mut self);
}

/// Settings for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: crate::engine::DEFAULT_ROWS,
        }
    }
}

fn start_round(engine: &mut GuessEngine, supply: &WordSupply) {
    engine.reset();
    engine.set_secret_word(supply.next_word());
    info_log!("new round started");
}

/// Play rounds until the user exits or input runs out; returns the session stats.
pub fn game_loop<I: GameInterface>(
    config: GameConfig,
    supply: &WordSupply,
    interface: &mut I,
) -> Stats {
    let mut engine = GuessEngine::new(config.rows);
    let mut stats = Stats::default();

    start_round(&mut engine, supply);
    interface.display_new_round(&stats);
    interface.display_board(&engine);

    while let Some(action) = interface.read_action() {
        debug_log!("game_loop() - action {:?}", action);
        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                start_round(&mut engine, supply);
                interface.display_new_round(&stats);
            }
            UserAction::Letter(c) => {
                if let Err(rejection) = place_letter(&mut engine, c) {
                    interface.display_rejected(rejection);
                }
            }
            UserAction::Erase => {
                if engine.is_terminal() {
                    interface.display_rejected(Rejection::RoundOver);
                } else {
                    engine.erase_letter();
                }
            }
            UserAction::Enter => submit(&mut engine, &mut stats, interface),
        }
        interface.display_board(&engine);
    }

    stats
}

fn place_letter(engine: &mut GuessEngine, c: char) -> Result<(), Rejection> {
    if engine.is_terminal() {
        Err(Rejection::RoundOver)
    } else if !c.is_ascii_alphabetic() {
        Err(Rejection::NotALetter)
    } else if engine.place_letter(c) {
        Ok(())
    } else {
        Err(Rejection::RowFull)
    }
}

fn submit<I: GameInterface>(engine: &mut GuessEngine, stats: &mut Stats, interface: &mut I) {
    if engine.is_terminal() {
        interface.display_rejected(Rejection::RoundOver);
        return;
    }
    let Some(submission) = engine.submit_row() else {
        interface.display_rejected(Rejection::IncompleteRow);
        return;
    };
    interface.display_row_result(submission.row, &submission.feedback);

    let secret = engine
        .secret_word()
        .map(|w| w.to_string())
        .unwrap_or_default();
    stats.record(submission.status);
    match submission.status {
        RoundStatus::Won => {
            info_log!("round won on row {}", submission.row);
            interface.display_win(&secret, stats);
        }
        RoundStatus::Lost => {
            info_log!("round lost, word was {}", secret);
            interface.display_loss(&secret, stats);
        }
        RoundStatus::Playing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SecretWord;

    /// Scripted interface that records what the loop reported.
    #[derive(Default)]
    struct Recorder {
        actions: Vec<UserAction>,
        results: Vec<(usize, Vec<Feedback>)>,
        rejections: Vec<Rejection>,
        wins: Vec<String>,
        losses: Vec<String>,
        round_end_stats: Vec<Stats>,
        new_rounds: Vec<Stats>,
        exited: bool,
    }

    impl Recorder {
        fn typing(words: &[&str]) -> Self {
            let mut actions = Vec::new();
            for word in words {
                match *word {
                    "<" => actions.push(UserAction::Erase),
                    "!" => actions.push(UserAction::NewGame),
                    "^" => actions.push(UserAction::Exit),
                    _ => {
                        actions.extend(word.chars().map(UserAction::Letter));
                        actions.push(UserAction::Enter);
                    }
                }
            }
            actions.reverse();
            Self {
                actions,
                ..Self::default()
            }
        }
    }

    impl GameInterface for Recorder {
        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop()
        }
        fn display_board(&mut self, _engine: &GuessEngine) {}
        fn display_row_result(&mut self, row: usize, feedback: &[Feedback]) {
            self.results.push((row, feedback.to_vec()));
        }
        fn display_rejected(&mut self, rejection: Rejection) {
            self.rejections.push(rejection);
        }
        fn display_win(&mut self, secret: &str, stats: &Stats) {
            self.wins.push(secret.to_string());
            self.round_end_stats.push(*stats);
        }
        fn display_loss(&mut self, secret: &str, stats: &Stats) {
            self.losses.push(secret.to_string());
            self.round_end_stats.push(*stats);
        }
        fn display_new_round(&mut self, stats: &Stats) {
            self.new_rounds.push(*stats);
        }
        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn supply(word: &str) -> WordSupply {
        WordSupply::fixed(SecretWord::parse(word).unwrap())
    }

    #[test]
    fn test_immediate_exit() {
        let mut ui = Recorder::typing(&["^"]);
        let stats = game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert!(ui.exited);
        assert_eq!(stats, Stats::default());
        assert_eq!(ui.new_rounds.len(), 1);
    }

    #[test]
    fn test_win_on_second_row() {
        let mut ui = Recorder::typing(&["CRATE", "CRANE"]);
        let stats = game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(stats, Stats { played: 1, won: 1 });
        assert_eq!(ui.wins, vec!["CRANE"]);
        assert!(ui.losses.is_empty());
        assert_eq!(ui.results.len(), 2);
        assert_eq!(ui.results[0].0, 0);
        assert_eq!(ui.results[0].1[3], Feedback::Absent);
        assert_eq!(ui.results[1].1, vec![Feedback::Exact; 5]);
    }

    #[test]
    fn test_loss_after_row_exhaustion() {
        let mut ui = Recorder::typing(&["CRATE", "SLATE"]);
        let stats = game_loop(GameConfig { rows: 2 }, &supply("CRANE"), &mut ui);
        assert_eq!(stats, Stats { played: 1, won: 0 });
        assert_eq!(ui.losses, vec!["CRANE"]);
        assert!(ui.wins.is_empty());
    }

    #[test]
    fn test_input_rejected_after_round_over_until_new_game() {
        let mut ui = Recorder::typing(&["CRANE", "SLATE", "<", "!", "CRANE"]);
        let stats = game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(stats, Stats { played: 2, won: 2 });
        // five letters + enter + erase rejected while the round is over
        assert_eq!(ui.rejections, vec![Rejection::RoundOver; 7]);
        assert_eq!(ui.new_rounds, vec![Stats::default(), Stats { played: 1, won: 1 }]);
    }

    #[test]
    fn test_round_end_reports_updated_stats() {
        let mut ui = Recorder::typing(&["CRANE", "!", "CRATE", "CRATE"]);
        game_loop(GameConfig { rows: 2 }, &supply("CRANE"), &mut ui);
        assert_eq!(
            ui.round_end_stats,
            vec![Stats { played: 1, won: 1 }, Stats { played: 2, won: 1 }]
        );
    }

    #[test]
    fn test_incomplete_row_rejected() {
        let mut ui = Recorder::typing(&["CRA"]);
        game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(ui.rejections, vec![Rejection::IncompleteRow]);
        assert!(ui.results.is_empty());
    }

    #[test]
    fn test_sixth_letter_rejected_as_row_full() {
        let mut ui = Recorder::typing(&["CRANES"]);
        let stats = game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(ui.rejections, vec![Rejection::RowFull]);
        assert_eq!(stats.won, 1);
    }

    #[test]
    fn test_non_letter_rejected() {
        let mut ui = Recorder::typing(&["CR4NE"]);
        game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(ui.rejections[0], Rejection::NotALetter);
    }

    #[test]
    fn test_erase_then_retype() {
        let mut ui = Recorder {
            actions: vec![
                UserAction::Letter('C'),
                UserAction::Letter('R'),
                UserAction::Letter('X'),
                UserAction::Erase,
                UserAction::Letter('A'),
                UserAction::Letter('N'),
                UserAction::Letter('E'),
                UserAction::Enter,
            ]
            .into_iter()
            .rev()
            .collect(),
            ..Recorder::default()
        };
        let stats = game_loop(GameConfig::default(), &supply("CRANE"), &mut ui);
        assert_eq!(stats.won, 1);
    }

    #[test]
    fn test_rejection_messages() {
        assert!(Rejection::IncompleteRow.message().contains('5'));
        assert!(Rejection::RoundOver.message().contains("new game"));
    }
}
