//! Sentence segmentation.
//!
//! A [`SentenceSegmenter`] splits a paragraph into sentences before word
//! tokenization. The default implementation follows the Unicode sentence
//! boundary rules (UAX #29).

use ahash::AHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Trait for splitting a paragraph into sentences.
pub trait SentenceSegmenter: Send + Sync {
    /// Split `text` into sentences, in order.
    ///
    /// Returned slices borrow from `text` and never contain leading or
    /// trailing whitespace; empty sentences are skipped.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this segmenter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Abbreviations after which a period does not end a sentence.
pub const FRENCH_ABBREVIATIONS: &[&str] = &[
    "m", "mm", "mme", "mmes", "mlle", "mlles", "me", "dr", "pr", "st", "ste", "etc", "cf", "p",
    "pp", "av", "bd", "fig", "vol", "éd", "env", "ex", "chap",
];

/// Segmenter based on Unicode sentence boundaries.
///
/// UAX #29 ends a sentence at every period followed by a capital letter, so
/// `M. Dupont` would be split after `M.`. A boundary whose last word is a
/// known abbreviation is therefore joined with the next sentence. A sentence
/// that really ends with an abbreviation (`... etc.`) is joined too.
///
/// # Examples
///
/// ```
/// use homophony::analysis::segmenter::{SentenceSegmenter, UnicodeSentenceSegmenter};
///
/// let segmenter = UnicodeSentenceSegmenter::new();
/// let sentences = segmenter.segment("Il pleut. Le vent souffle !");
/// assert_eq!(sentences, vec!["Il pleut.", "Le vent souffle !"]);
/// ```
#[derive(Clone, Debug)]
pub struct UnicodeSentenceSegmenter {
    abbreviations: AHashSet<String>,
}

impl UnicodeSentenceSegmenter {
    /// Create a segmenter that knows the common French abbreviations.
    pub fn new() -> Self {
        Self::with_abbreviations(FRENCH_ABBREVIATIONS.iter().copied())
    }

    /// Create a segmenter with its own abbreviations, written without the
    /// trailing period. Matching is case-insensitive.
    pub fn with_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        UnicodeSentenceSegmenter {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn ends_with_abbreviation(&self, sentence: &str) -> bool {
        let Some(last_word) = sentence.split_whitespace().next_back() else {
            return false;
        };
        match last_word.strip_suffix('.') {
            Some(word) if !word.is_empty() => self.abbreviations.contains(&word.to_lowercase()),
            _ => false,
        }
    }
}

impl Default for UnicodeSentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut push = |sentence: &'a str| {
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
        };

        let mut start = None;
        for (offset, bound) in text.split_sentence_bound_indices() {
            let sentence_start = *start.get_or_insert(offset);
            if self.ends_with_abbreviation(bound) {
                continue;
            }
            push(&text[sentence_start..offset + bound.len()]);
            start = None;
        }
        if let Some(sentence_start) = start {
            push(&text[sentence_start..]);
        }

        sentences
    }

    fn name(&self) -> &'static str {
        "unicode_sentence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence() {
        let segmenter = UnicodeSentenceSegmenter::new();
        assert_eq!(segmenter.segment("Bonjour le monde."), vec!["Bonjour le monde."]);
    }

    #[test]
    fn test_multiple_sentences() {
        let segmenter = UnicodeSentenceSegmenter::new();
        let sentences = segmenter.segment("Le chat dort. Le chien aboie ? Oui.\n");
        assert_eq!(sentences, vec!["Le chat dort.", "Le chien aboie ?", "Oui."]);
    }

    #[test]
    fn test_abbreviations_do_not_end_sentences() {
        let segmenter = UnicodeSentenceSegmenter::new();
        assert_eq!(
            segmenter.segment("M. Dupont est là. Il part avec Mme. Durand."),
            vec!["M. Dupont est là.", "Il part avec Mme. Durand."]
        );
        assert_eq!(
            segmenter.segment("Des pommes, des poires, etc. Il en reste."),
            vec!["Des pommes, des poires, etc. Il en reste."]
        );
    }

    #[test]
    fn test_custom_abbreviations() {
        let segmenter = UnicodeSentenceSegmenter::with_abbreviations(["Prof"]);
        assert_eq!(
            segmenter.segment("Le prof. Martin arrive. M. Dupont aussi."),
            vec!["Le prof. Martin arrive.", "M.", "Dupont aussi."]
        );
    }

    #[test]
    fn test_blank_input() {
        let segmenter = UnicodeSentenceSegmenter::new();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("  \n").is_empty());
    }
}
