//! Configuration for the worker pool.

use serde::{Deserialize, Serialize};

use crate::error::{HomophonyError, Result};

/// Configuration for [`WorkerPool`](crate::parallel::WorkerPool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPoolConfig {
    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Number of items handed to a worker at once.
    pub batch_size: usize,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: None,
            batch_size: 100,
        }
    }
}

impl WorkerPoolConfig {
    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.thread_pool_size = Some(threads);
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Check that the configuration can build a pool.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(HomophonyError::config("batch_size must be greater than 0"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(HomophonyError::config(
                "thread_pool_size must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkerPoolConfig::default();
        assert_eq!(config.thread_pool_size, None);
        assert_eq!(config.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(WorkerPoolConfig::default().with_batch_size(0).validate().is_err());
        assert!(WorkerPoolConfig::default().with_threads(0).validate().is_err());
    }
}
