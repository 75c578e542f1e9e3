//! Text analysis module for Homophony.
//!
//! This module provides the capabilities the mistake injector consumes:
//! sentence segmentation, word tokenization and character filtering.
//! Each of them is a trait so that callers can plug in their own
//! language-specific implementation.

pub mod char_filter;
pub mod segmenter;
pub mod token;
pub mod tokenizer;
