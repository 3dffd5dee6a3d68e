// Library interface for wordlike
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{
    Cursor, DEFAULT_ROWS, Feedback, GuessEngine, RoundStatus, SecretWord, Submission, WORD_LENGTH,
    WordError,
};
pub use game_state::{GameConfig, GameInterface, Rejection, Stats, UserAction, game_loop};
pub use wordbank::{FALLBACK_WORD, WordSupply, load_wordbank_from_file, load_wordbank_from_str};
