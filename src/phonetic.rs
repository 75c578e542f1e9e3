//! Phonetic normalization.
//!
//! Words are reduced to an approximate phonetic key by an ordered list of
//! regex rewrite rules followed by diacritic folding. Two words with the same
//! key are considered homonyms.
//!
//! # Examples
//!
//! ```
//! use homophony::phonetic::PhoneticNormalizer;
//!
//! let normalizer = PhoneticNormalizer::french().unwrap();
//! assert_eq!(normalizer.normalize("vert"), normalizer.normalize("verre"));
//! assert_eq!(normalizer.normalize("haut"), "o");
//! ```

pub mod normalizer;
pub mod rule;

pub use normalizer::{PhoneticKey, PhoneticNormalizer};
pub use rule::{Rewrite, RewriteRule};
