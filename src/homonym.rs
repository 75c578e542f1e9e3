//! Homonym index: groups of dictionary words sharing a phonetic key.
//!
//! The index is built once from a dictionary word list, cached as a JSON
//! document, and shared read-only by every mistake injector afterwards.

pub mod cache;
pub mod dictionary;
pub mod index;

pub use cache::{CACHE_FILE_NAME, CacheRead, DEFAULT_DICTIONARY_PATH, HomonymLoader, load};
pub use dictionary::Dictionary;
pub use index::{HomonymGroup, HomonymIndex};
