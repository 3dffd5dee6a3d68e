use crate::engine::{SecretWord, WORD_LENGTH};
use crate::info_log;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Played whenever the word source is empty or failed to load.
pub const FALLBACK_WORD: SecretWord = SecretWord::from_letters(['A', 'P', 'P', 'L', 'E']);

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|word| is_valid_word(word))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_uppercase();
        if is_valid_word(&word) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Source of secret words, one per round.
#[derive(Debug, Clone)]
pub struct WordSupply {
    words: Vec<SecretWord>,
}

impl WordSupply {
    /// Keep every word of `words` that is a valid secret word.
    #[must_use]
    pub fn new(words: &[String]) -> Self {
        let words: Vec<SecretWord> = words
            .iter()
            .filter_map(|w| SecretWord::parse(w).ok())
            .collect();
        if words.is_empty() {
            log::warn!("word supply is empty, every round will use {FALLBACK_WORD}");
        }
        Self { words }
    }

    /// Always hands out the same word.
    #[must_use]
    pub fn fixed(word: SecretWord) -> Self {
        Self { words: vec![word] }
    }

    /// Supply built from a load attempt; a failed load leaves only the fallback word.
    #[must_use]
    pub fn from_result(result: io::Result<Vec<String>>) -> Self {
        match result {
            Ok(words) => Self::new(&words),
            Err(e) => {
                log::warn!("failed to load words ({e}), falling back to {FALLBACK_WORD}");
                Self { words: Vec::new() }
            }
        }
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::new(&load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draw a random word for the next round.
    #[must_use]
    pub fn next_word(&self) -> SecretWord {
        let word = self
            .words
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(FALLBACK_WORD);
        info_log!("next secret word drawn from {} words", self.words.len());
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_wordbank_from_str_filters_and_uppercases() {
        let words = load_wordbank_from_str("crane\n  Slate \nabc\ntoolong\nCR4NE\n\nirate");
        assert_eq!(words, vec!["CRANE", "SLATE", "IRATE"]);
    }

    #[test]
    fn test_embedded_wordbank_is_valid() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(!words.is_empty());
        assert_eq!(words.len(), EMBEDDED_WORDBANK.lines().count());
        assert!(words.contains(&"APPLE".to_string()));
    }

    #[test]
    fn test_load_wordbank_from_file() {
        let path = std::env::temp_dir().join("wordlike_wordbank_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "lemon").unwrap();
            writeln!(file, "melon").unwrap();
            writeln!(file, "kiwi").unwrap();
        }
        let words = load_wordbank_from_file(&path).unwrap();
        assert_eq!(words, vec!["LEMON", "MELON"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_wordbank_missing_file_errors() {
        let path = std::env::temp_dir().join("wordlike_definitely_missing.txt");
        assert!(load_wordbank_from_file(path).is_err());
    }

    #[test]
    fn test_fallback_word_is_apple() {
        assert_eq!(FALLBACK_WORD.to_string(), "APPLE");
        assert_eq!(SecretWord::parse("APPLE").unwrap(), FALLBACK_WORD);
    }

    #[test]
    fn test_empty_supply_falls_back() {
        let supply = WordSupply::new(&[]);
        assert!(supply.is_empty());
        assert_eq!(supply.next_word(), FALLBACK_WORD);
    }

    #[test]
    fn test_failed_load_falls_back() {
        let supply = WordSupply::from_result(Err(io::Error::other("unreachable")));
        assert_eq!(supply.next_word(), FALLBACK_WORD);
    }

    #[test]
    fn test_invalid_words_are_dropped() {
        let supply = WordSupply::new(&["CRANES".to_string(), "CRANE".to_string()]);
        assert_eq!(supply.len(), 1);
        assert_eq!(supply.next_word().to_string(), "CRANE");
    }

    #[test]
    fn test_fixed_supply() {
        let word = SecretWord::parse("SLATE").unwrap();
        let supply = WordSupply::fixed(word);
        for _ in 0..5 {
            assert_eq!(supply.next_word(), word);
        }
    }

    #[test]
    fn test_random_word_comes_from_list() {
        let list = vec!["CRANE".to_string(), "SLATE".to_string(), "IRATE".to_string()];
        let supply = WordSupply::new(&list);
        for _ in 0..20 {
            assert!(list.contains(&supply.next_word().to_string()));
        }
    }
}
