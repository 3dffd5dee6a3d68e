use std::io;
use std::process::ExitCode;

use wordlike::cli::{CliInterface, parse_cli};
use wordlike::tui::TuiInterface;
use wordlike::{GameConfig, SecretWord, WordSupply, game_loop, load_wordbank_from_file, logging};

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to set up logging: {e}");
    }

    let supply = match (&cli.word, &cli.wordbank_path) {
        (Some(word), _) => match SecretWord::parse(word) {
            Ok(word) => WordSupply::fixed(word),
            Err(e) => {
                eprintln!("Invalid word '{word}': {e}");
                return ExitCode::FAILURE;
            }
        },
        (None, Some(path)) => WordSupply::from_result(load_wordbank_from_file(path)),
        (None, None) => WordSupply::embedded(),
    };
    let config = GameConfig { rows: cli.rows };
    log::info!(
        "starting with {} rows and {} candidate words",
        config.rows,
        supply.len()
    );

    let stats = if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(config, &supply, &mut interface)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(config, &supply, &mut interface)
    };

    println!("Games: {} | Wins: {}", stats.played, stats.won);
    ExitCode::SUCCESS
}
