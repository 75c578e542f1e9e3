//! Mistake injection: turning correct sentences into training pairs.

pub mod injector;

pub use injector::{
    MAX_MISTAKE_PROBABILITY, MistakeInjector, MistakeRate, SentencePair, SentencePairs, miswrite,
};
