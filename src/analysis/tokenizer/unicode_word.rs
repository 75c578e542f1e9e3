//! Unicode word tokenizer implementation.
//!
//! This module provides a tokenizer that splits text using Unicode word boundary
//! rules (UAX #29). Unlike a search tokenizer it keeps punctuation as separate
//! tokens, since the generated sentences must be rebuilt from their words.
//!
//! # Examples
//!
//! ```
//! use homophony::analysis::tokenizer::Tokenizer;
//! use homophony::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Bonjour, le monde !").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Bonjour");
//! assert_eq!(tokens[1].text, ",");
//! assert_eq!(tokens.len(), 5);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Whitespace segments are dropped; every other segment (words, numbers,
/// punctuation marks) becomes a token. Elided forms such as `l'eau` stay a
/// single token because the apostrophe is a mid-word character in UAX #29.
/// Hyphenated compounds (`peut-être`) and ellipses (`...`) are kept whole.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }

    /// Whether `segment` joins the two halves of a compound word.
    fn is_hyphen(segment: &str) -> bool {
        matches!(segment, "-" | "\u{2010}" | "\u{2011}")
    }

    fn is_word(segment: &str) -> bool {
        segment.chars().any(char::is_alphanumeric)
    }

    /// Byte spans of the tokens of `text`.
    ///
    /// UAX #29 breaks around hyphens and between the dots of an ellipsis;
    /// touching `word-word` and `...` runs are joined back into one span.
    fn spans(text: &str) -> Vec<(usize, usize)> {
        let segments: Vec<(usize, &str)> = text
            .split_word_bound_indices()
            .filter(|(_, segment)| !segment.chars().all(char::is_whitespace))
            .collect();

        let mut spans: Vec<(usize, usize)> = Vec::with_capacity(segments.len());
        let mut i = 0;
        while i < segments.len() {
            let (start, segment) = segments[i];
            let end = start + segment.len();

            if let Some(last) = spans.last_mut()
                && last.1 == start
            {
                let previous = &text[last.0..last.1];
                if Self::is_hyphen(segment)
                    && Self::is_word(previous)
                    && let Some(&(next_start, next)) = segments.get(i + 1)
                    && next_start == end
                    && Self::is_word(next)
                {
                    last.1 = next_start + next.len();
                    i += 2;
                    continue;
                }
                if segment == "." && previous.bytes().all(|b| b == b'.') {
                    last.1 = end;
                    i += 1;
                    continue;
                }
            }

            spans.push((start, end));
            i += 1;
        }
        spans
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = Self::spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                Token::with_offsets(&text[start..end], position, start, end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
