//! Candidate lookup keys: word list files and built-in frequency lists.

use crate::error::Result;
use log::info;
use std::path::Path;

/// Most frequent Spanish verbs, in frequency order.
const SPANISH_COMMON_WORDS: &[&str] = &[
    "ser", "estar", "tener", "hacer", "poder", "decir", "ir", "ver", "dar", "saber", "querer",
    "llegar", "pasar", "deber", "poner", "parecer", "quedar", "creer", "hablar", "llevar",
];

/// Reads one lookup key per line, skipping blank lines.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let words = parse_word_list(&content);
    info!("Read {} words from {:?}", words.len(), path);
    Ok(words)
}

pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The `count` most frequent keys for `lang_code`, when a built-in list exists.
pub fn frequency_list(lang_code: &str, count: usize) -> Option<Vec<String>> {
    let words = match lang_code {
        "es" => SPANISH_COMMON_WORDS,
        _ => return None,
    };
    Some(words.iter().take(count).map(|w| w.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_word_list_skips_blank_lines() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("words.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "hablar\n\n  casa  \r\nperro").unwrap();
        drop(file);

        let words = read_word_list(&path).unwrap();
        assert_eq!(words, vec!["hablar", "casa", "perro"]);
    }

    #[test]
    fn test_missing_word_list_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(read_word_list(&dir.path().join("absent.txt")).is_err());
    }

    #[test]
    fn test_frequency_list_truncates() {
        assert_eq!(
            frequency_list("es", 3),
            Some(vec!["ser".to_string(), "estar".to_string(), "tener".to_string()])
        );
        assert_eq!(frequency_list("es", 100).map(|w| w.len()), Some(20));
        assert_eq!(frequency_list("fr", 10), None);
    }
}
