//! Probabilistic homonym substitution.
//!
//! For every sentence of a paragraph the injector emits two pairs: an
//! identity pair `(correct, correct)`, which teaches the model to leave
//! correct text alone, then `(correct, mistake)` where each word was
//! independently replaced by a random homonym with a probability drawn once
//! for the sentence.

use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::{CharFilter, Latin1EscapeCharFilter};
use crate::analysis::segmenter::{SentenceSegmenter, UnicodeSentenceSegmenter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::corpus::is_valid_paragraph;
use crate::error::{HomophonyError, Result};
use crate::homonym::HomonymIndex;

/// Upper bound of the per-sentence mistake probability.
pub const MAX_MISTAKE_PROBABILITY: f64 = 0.5;

/// How the per-sentence mistake probability is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MistakeRate {
    /// Drawn uniformly from `[0, max)` for each sentence.
    UpTo(f64),
    /// The same probability for every sentence.
    Fixed(f64),
}

impl Default for MistakeRate {
    fn default() -> Self {
        MistakeRate::UpTo(MAX_MISTAKE_PROBABILITY)
    }
}

impl MistakeRate {
    /// Draw the mistake probability of one sentence.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            MistakeRate::UpTo(max) => rng.random::<f64>() * max,
            MistakeRate::Fixed(probability) => probability,
        }
    }

    /// Check that the probability lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let value = match *self {
            MistakeRate::UpTo(max) => max,
            MistakeRate::Fixed(probability) => probability,
        };
        if !(0.0..=1.0).contains(&value) {
            return Err(HomophonyError::config(format!(
                "mistake probability must be within [0, 1], got {value}"
            )));
        }
        Ok(())
    }
}

/// A correct sentence and its possibly corrupted copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub correct: String,
    pub mistake: String,
}

impl SentencePair {
    pub fn new(correct: String, mistake: String) -> Self {
        Self { correct, mistake }
    }

    /// A pair whose mistake phrase is the correct phrase.
    pub fn identity(correct: String) -> Self {
        Self {
            mistake: correct.clone(),
            correct,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.correct == self.mistake
    }
}

/// Replace `word` by a random homonym with probability `probability`.
///
/// The lookup is case-insensitive. A word missing from the index is its own
/// only homonym, so it is returned unchanged.
pub fn miswrite<'a, R: Rng>(
    word: &'a str,
    index: &'a HomonymIndex,
    probability: f64,
    rng: &mut R,
) -> &'a str {
    if rng.random::<f64>() >= probability {
        return word;
    }
    index
        .group(word)
        .and_then(|group| group.choose(rng))
        .map(String::as_str)
        .unwrap_or(word)
}

/// Generates training pairs from paragraphs.
///
/// The injector is immutable; randomness comes from the generator passed to
/// [`inject`](Self::inject), so independent shards can share one injector
/// and still own their random streams.
pub struct MistakeInjector {
    index: Arc<HomonymIndex>,
    segmenter: Box<dyn SentenceSegmenter>,
    tokenizer: Box<dyn Tokenizer>,
    char_filter: Box<dyn CharFilter>,
    rate: MistakeRate,
}

impl MistakeInjector {
    /// Create an injector with Unicode segmentation and Latin-1 escaping.
    pub fn new(index: Arc<HomonymIndex>) -> Self {
        Self {
            index,
            segmenter: Box::new(UnicodeSentenceSegmenter::new()),
            tokenizer: Box::new(UnicodeWordTokenizer::new()),
            char_filter: Box::new(Latin1EscapeCharFilter::new()),
            rate: MistakeRate::default(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn SentenceSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_char_filter(mut self, char_filter: Box<dyn CharFilter>) -> Self {
        self.char_filter = char_filter;
        self
    }

    pub fn with_rate(mut self, rate: MistakeRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn index(&self) -> &HomonymIndex {
        &self.index
    }

    pub fn rate(&self) -> MistakeRate {
        self.rate
    }

    /// Lazily generate the pairs of `paragraph`.
    ///
    /// An invalid paragraph yields nothing. Calling `inject` again on the
    /// same paragraph starts over with a fresh iterator.
    pub fn inject<'a, R: Rng>(
        &'a self,
        paragraph: &'a str,
        rng: &'a mut R,
    ) -> SentencePairs<'a, R> {
        let sentences = if is_valid_paragraph(paragraph) {
            self.segmenter.segment(paragraph)
        } else {
            Vec::new()
        };

        SentencePairs {
            injector: self,
            sentences: sentences.into_iter(),
            rng,
            pending: None,
        }
    }

    /// Tokenize a sentence and filter each word.
    pub fn words(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenizer
            .tokenize(sentence)?
            .map(|token| self.char_filter.filter(&token.text))
            .collect())
    }

    /// Corrupt a tokenized sentence with the given per-word probability.
    pub fn miswrite_words<R: Rng>(
        &self,
        words: &[String],
        probability: f64,
        rng: &mut R,
    ) -> String {
        words
            .iter()
            .map(|word| miswrite(word, &self.index, probability, rng))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for MistakeInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistakeInjector")
            .field("words", &self.index.len())
            .field("segmenter", &self.segmenter.name())
            .field("tokenizer", &self.tokenizer.name())
            .field("char_filter", &self.char_filter.name())
            .field("rate", &self.rate)
            .finish()
    }
}

/// Iterator over the pairs of one paragraph, returned by
/// [`MistakeInjector::inject`].
pub struct SentencePairs<'a, R: Rng> {
    injector: &'a MistakeInjector,
    sentences: std::vec::IntoIter<&'a str>,
    rng: &'a mut R,
    pending: Option<SentencePair>,
}

impl<R: Rng> Iterator for SentencePairs<'_, R> {
    type Item = Result<SentencePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pair) = self.pending.take() {
            return Some(Ok(pair));
        }

        let sentence = self.sentences.next()?;
        let words = match self.injector.words(sentence) {
            Ok(words) => words,
            Err(e) => return Some(Err(e)),
        };
        let correct = words.join(" ");

        let probability = self.injector.rate.draw(&mut *self.rng);
        let mistake = self
            .injector
            .miswrite_words(&words, probability, &mut *self.rng);
        self.pending = Some(SentencePair::new(correct.clone(), mistake));

        Some(Ok(SentencePair::identity(correct)))
    }
}
