//! Configuration for corpus generation.
//!
//! A [`GeneratorConfig`] can be loaded from a JSON file; missing fields take
//! their default value.
//!
//! ```
//! use homophony::config::GeneratorConfig;
//!
//! let config: GeneratorConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.max_mistake_probability, 0.5);
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HomophonyError, Result};
use crate::homonym::{CACHE_FILE_NAME, DEFAULT_DICTIONARY_PATH};
use crate::mistake::{MAX_MISTAKE_PROBABILITY, MistakeRate};
use crate::parallel::WorkerPoolConfig;

/// Configuration for building the homonym index and generating samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the homonym cache.
    pub data_dir: PathBuf,

    /// Canonical dictionary, one word per line.
    pub dictionary_path: PathBuf,

    /// File name of the cache document inside `data_dir`.
    pub cache_file_name: String,

    /// Upper bound of the per-sentence mistake probability.
    pub max_mistake_probability: f64,

    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Number of dictionary words normalized per worker task.
    pub batch_size: usize,

    /// Seed for reproducible generation. Shard `i` uses `seed + i`.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            cache_file_name: CACHE_FILE_NAME.to_string(),
            max_mistake_probability: MAX_MISTAKE_PROBABILITY,
            thread_pool_size: None,
            batch_size: 100,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HomophonyError::config(format!("cannot open {}: {e}", path.display()))
        })?;
        let config: GeneratorConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        self.mistake_rate().validate()?;
        self.pool_config().validate()?;
        if self.cache_file_name.is_empty() {
            return Err(HomophonyError::config("cache_file_name must not be empty"));
        }
        Ok(())
    }

    /// Worker pool settings.
    pub fn pool_config(&self) -> WorkerPoolConfig {
        WorkerPoolConfig {
            thread_pool_size: self.thread_pool_size,
            batch_size: self.batch_size,
        }
    }

    /// Mistake rate used by injectors.
    pub fn mistake_rate(&self) -> MistakeRate {
        MistakeRate::UpTo(self.max_mistake_probability)
    }
}
