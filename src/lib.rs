//! # Homophony
//!
//! Synthetic spelling mistakes for French grammar-correction corpora.
//!
//! Dictionary words are grouped under an approximate phonetic key; words
//! sharing a key are homonyms. Sentences from a corpus are then corrupted by
//! swapping words for random homonyms, producing `(mistake, correct)` pairs.
//!
//! ## Features
//!
//! - Ordered rewrite-rule phonetic normalizer for French
//! - Parallel homonym index building with a JSON cache
//! - Lazy per-paragraph mistake injection with pluggable tokenization
//! - Sharded, reproducible corpus generation
//!
//! ```
//! use std::sync::Arc;
//!
//! use homophony::homonym::HomonymIndex;
//! use homophony::mistake::{MistakeInjector, MistakeRate};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let group = vec!["vert".to_string(), "verre".to_string()];
//! let index = HomonymIndex::from_entries(vec![
//!     ("vert".to_string(), group.clone()),
//!     ("verre".to_string(), group),
//! ]);
//! let injector = MistakeInjector::new(Arc::new(index)).with_rate(MistakeRate::Fixed(1.0));
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let pairs: Vec<_> = injector
//!     .inject("Le verre.", &mut rng)
//!     .collect::<homophony::error::Result<_>>()
//!     .unwrap();
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[0].mistake, pairs[0].correct);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod homonym;
pub mod mistake;
pub mod parallel;
pub mod phonetic;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
