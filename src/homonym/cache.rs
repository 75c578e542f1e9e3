//! Loading and persisting the homonym index.
//!
//! The index is cached as `homonyms.json` in a data directory. A missing or
//! malformed cache is a cache miss: the index is rebuilt from the canonical
//! dictionary and the cache is rewritten. Concurrent rebuilders all derive
//! the same document from the same dictionary, so the last write wins
//! without any locking.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::homonym::dictionary::Dictionary;
use crate::homonym::index::HomonymIndex;
use crate::parallel::{WorkerPool, WorkerPoolConfig};
use crate::phonetic::PhoneticNormalizer;

/// File name of the cache document inside the data directory.
pub const CACHE_FILE_NAME: &str = "homonyms.json";

/// Canonical French dictionary.
pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/dict/french";

/// Outcome of reading a cache document.
#[derive(Debug)]
pub enum CacheRead {
    /// The cache exists and parsed.
    Hit(HomonymIndex),
    /// There is no cache file.
    NotFound,
    /// The cache file exists but is not a valid index document.
    Malformed(serde_json::Error),
}

/// Read the cache document at `path`.
///
/// I/O errors other than a missing file are returned as errors.
pub fn read_cache(path: &Path) -> Result<CacheRead> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CacheRead::NotFound),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(index) => Ok(CacheRead::Hit(index)),
        Err(e) if e.is_io() => Err(e.into()),
        Err(e) => Ok(CacheRead::Malformed(e)),
    }
}

/// Write `index` as a cache document at `path`, creating parent directories.
pub fn write_cache(path: &Path, index: &HomonymIndex) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    index.write_json(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads the homonym index from cache or rebuilds it from the dictionary.
#[derive(Debug, Clone)]
pub struct HomonymLoader {
    data_dir: PathBuf,
    dictionary_path: PathBuf,
    cache_file_name: String,
    pool_config: WorkerPoolConfig,
}

impl HomonymLoader {
    /// Create a loader for `data_dir` using the canonical dictionary.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            cache_file_name: CACHE_FILE_NAME.to_string(),
            pool_config: WorkerPoolConfig::default(),
        }
    }

    /// Create a loader from a generator configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            dictionary_path: config.dictionary_path.clone(),
            cache_file_name: config.cache_file_name.clone(),
            pool_config: config.pool_config(),
        }
    }

    /// Use another dictionary file.
    pub fn with_dictionary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dictionary_path = path.into();
        self
    }

    /// Use another worker pool configuration for rebuilds.
    pub fn with_pool_config(mut self, config: WorkerPoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Path of the cache document.
    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.cache_file_name)
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    /// Load the index, rebuilding and caching it on a cache miss.
    pub fn load(&self) -> Result<HomonymIndex> {
        let cache_path = self.cache_path();
        match read_cache(&cache_path)? {
            CacheRead::Hit(index) => {
                info!(
                    "loaded {} homonym entries from {}",
                    index.len(),
                    cache_path.display()
                );
                return Ok(index);
            }
            CacheRead::NotFound => {
                info!("no homonym cache at {}, rebuilding", cache_path.display());
            }
            CacheRead::Malformed(e) => {
                warn!(
                    "ignoring malformed homonym cache {}: {e}",
                    cache_path.display()
                );
            }
        }

        let index = self.rebuild()?;
        write_cache(&cache_path, &index)?;
        info!("wrote homonym cache to {}", cache_path.display());
        Ok(index)
    }

    /// Build the index from the dictionary, ignoring any cache.
    pub fn rebuild(&self) -> Result<HomonymIndex> {
        let dictionary = Dictionary::load_from_file(&self.dictionary_path)?;
        let normalizer = PhoneticNormalizer::french()?;
        let pool = WorkerPool::new(self.pool_config.clone())?;
        HomonymIndex::build(dictionary.words(), &normalizer, &pool)
    }
}

/// Load the homonym index cached in `data_dir`, rebuilding it from the
/// canonical dictionary when needed.
pub fn load<P: Into<PathBuf>>(data_dir: P) -> Result<HomonymIndex> {
    HomonymLoader::new(data_dir).load()
}
