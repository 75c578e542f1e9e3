//! Dictionary word lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::{HomophonyError, Result};

/// An ordered list of dictionary words.
///
/// Order matters: homonym groups list their members in dictionary order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Create a dictionary from words, in order.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dictionary {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a dictionary from a text file with one word per line.
    ///
    /// Lines are trimmed and blank lines are skipped. A missing or unreadable
    /// file is reported as [`HomophonyError::Dictionary`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HomophonyError::dictionary(format!("cannot open {}: {e}", path.display()))
        })?;
        let reader = BufReader::new(file);

        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| {
                HomophonyError::dictionary(format!("cannot read {}: {e}", path.display()))
            })?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }

        info!("loaded {} dictionary words from {}", words.len(), path.display());
        Ok(Dictionary { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "vert").unwrap();
        writeln!(temp_file, "  verre ").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "Été").unwrap();
        temp_file.flush().unwrap();

        let dictionary = Dictionary::load_from_file(temp_file.path()).unwrap();
        assert_eq!(dictionary.words(), &["vert", "verre", "Été"]);
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn test_missing_file_is_dictionary_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dictionary::load_from_file(dir.path().join("absent"));
        assert!(matches!(result, Err(HomophonyError::Dictionary(_))));
    }

    #[test]
    fn test_from_words() {
        let dictionary = Dictionary::from_words(["a", "b"]);
        assert!(!dictionary.is_empty());
        assert_eq!(dictionary.into_words(), vec!["a".to_string(), "b".to_string()]);
    }
}
