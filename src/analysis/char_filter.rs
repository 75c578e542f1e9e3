//! Char filter implementations for text normalization.
//!
//! Char filters rewrite a string character by character. They are used on
//! both sides of the pipeline: folding diacritics when computing phonetic
//! keys, and escaping unrepresentable characters in generated sentences.
//!
//! # Available Filters
//!
//! - [`ascii_folding::AsciiFoldingCharFilter`] - Transliterates text to ASCII
//! - [`latin1_escape::Latin1EscapeCharFilter`] - Escapes non Latin-1 characters as `&#N;`

/// Trait for character filters that transform text.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod ascii_folding;
pub mod latin1_escape;

pub use ascii_folding::AsciiFoldingCharFilter;
pub use latin1_escape::Latin1EscapeCharFilter;
