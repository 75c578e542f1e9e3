//! Parallel execution for dictionary normalization and corpus sharding.

pub mod config;
pub mod pool;

pub use config::WorkerPoolConfig;
pub use pool::WorkerPool;
