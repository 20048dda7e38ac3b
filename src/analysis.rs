//! Text analysis shared by indexing and querying.
//!
//! A piece of text is stripped of punctuation, lowercased and split on
//! whitespace. Stop words are dropped, then each surviving word expands into
//! its prefix n-grams between the configured minimum and maximum lengths.

use crate::config::EngineConfig;

/// One analyzed word: its prefix n-grams and its position among the words
/// that survived stop-word removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWord {
    pub ngrams: Vec<String>,
    pub position: usize,
}

/// Analyze `text` under `config`.
///
/// Words shorter than the minimum n-gram length produce no output but still
/// occupy a position. N-gram lengths are counted in characters so multi-byte
/// words never split mid-codepoint.
pub fn parse(text: &str, config: &EngineConfig) -> Vec<ParsedWord> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let lowered = cleaned.to_lowercase();

    let words = lowered
        .split_whitespace()
        .filter(|word| !config.stop_words.iter().any(|stop| stop == word));

    let mut parsed = Vec::new();
    for (position, word) in words.enumerate() {
        let char_count = word.chars().count();
        let mut ngrams = Vec::new();
        for len in config.ngram_min_length..=config.ngram_max_length {
            if char_count < len {
                break;
            }
            ngrams.push(word.chars().take(len).collect());
        }
        if !ngrams.is_empty() {
            parsed.push(ParsedWord { ngrams, position });
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(stop_words: &[&str]) -> EngineConfig {
        EngineConfig {
            ngram_min_length: 3,
            ngram_max_length: 6,
            stop_words: stop_words.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn all_ngrams(parsed: &[ParsedWord]) -> Vec<&str> {
        parsed
            .iter()
            .flat_map(|w| w.ngrams.iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        assert!(parse("                \t", &config(&[])).is_empty());
    }

    #[test]
    fn test_prefix_ngrams_and_positions() {
        let parsed = parse("There's something happening here..", &config(&["is", "are"]));
        assert_eq!(
            all_ngrams(&parsed),
            [
                "the", "ther", "there", "theres", "som", "some", "somet", "someth", "hap", "happ",
                "happe", "happen", "her", "here"
            ]
        );
        let positions: Vec<usize> = parsed.iter().map(|w| w.position).collect();
        assert_eq!(positions, [0, 1, 2, 3]);
    }

    #[test]
    fn test_stop_words_removed_before_positions_assigned() {
        let parsed = parse("the quick brown fox", &config(&["the"]));
        let positions: Vec<usize> = parsed.iter().map(|w| w.position).collect();
        assert_eq!(positions, [0, 1, 2]);
        assert_eq!(parsed[0].ngrams[0], "qui");
    }

    #[test]
    fn test_short_word_occupies_position_without_ngrams() {
        // "of" is too short for any n-gram but still counts as a word.
        let parsed = parse("pride of lions", &config(&[]));
        let positions: Vec<usize> = parsed.iter().map(|w| w.position).collect();
        assert_eq!(positions, [0, 2]);
    }

    #[test]
    fn test_punctuation_and_case_folded() {
        let parsed = parse("Can't STOP, won't stop!", &config(&[]));
        assert_eq!(
            all_ngrams(&parsed),
            ["can", "cant", "sto", "stop", "won", "wont", "sto", "stop"]
        );
    }

    #[test]
    fn test_non_ascii_words_stay_valid_utf8() {
        let parsed = parse("сause and effect", &config(&["and"]));
        assert_eq!(parsed[0].ngrams, ["сau", "сaus", "сause"]);
    }

    #[test]
    fn test_word_shorter_than_max_stops_early() {
        let parsed = parse("help", &config(&[]));
        assert_eq!(parsed[0].ngrams, ["hel", "help"]);
    }
}
