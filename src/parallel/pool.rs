//! A bounded worker pool mapping a pure function over a slice.

use crossbeam_channel::unbounded;
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{HomophonyError, Result};
use crate::parallel::config::WorkerPoolConfig;

/// Fixed-size pool of worker threads.
///
/// Work is dispatched in batches. Each batch reports its results together
/// with the index of its first item, and results are placed back by index,
/// so the output order never depends on which worker finished first.
pub struct WorkerPool {
    thread_pool: ThreadPool,
    batch_size: usize,
}

impl WorkerPool {
    /// Create a new worker pool.
    pub fn new(config: WorkerPoolConfig) -> Result<Self> {
        config.validate()?;
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("homophony-worker-{i}"))
            .build()
            .map_err(|e| HomophonyError::worker(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool,
            batch_size: config.batch_size,
        })
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Default batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Apply `f` to every item using the configured batch size.
    ///
    /// The i-th output is always `f(&items[i])`.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        self.map_batched(items, self.batch_size, f)
    }

    /// Apply `f` to every item, `batch_size` items per task.
    pub fn map_batched<T, R, F>(&self, items: &[T], batch_size: usize, f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        if batch_size == 0 {
            return Err(HomophonyError::invalid_argument(
                "batch size must be greater than 0",
            ));
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let (sender, receiver) = unbounded::<(usize, Vec<R>)>();
        let f = &f;

        self.thread_pool.scope(|scope| {
            for (batch_index, batch) in items.chunks(batch_size).enumerate() {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    let results: Vec<R> = batch.iter().map(f).collect();
                    // The receiver lives until every batch has reported.
                    let _ = sender.send((batch_index * batch_size, results));
                });
            }
        });
        drop(sender);

        let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
        slots.resize_with(items.len(), || None);

        let mut batches = 0;
        for (start, results) in receiver.iter() {
            for (offset, result) in results.into_iter().enumerate() {
                slots[start + offset] = Some(result);
            }
            batches += 1;
        }
        debug!(
            "mapped {} items in {batches} batches on {} threads",
            items.len(),
            self.num_threads()
        );

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| HomophonyError::internal(format!("no result for item {i}")))
            })
            .collect()
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn pool(threads: usize, batch_size: usize) -> WorkerPool {
        WorkerPool::new(
            WorkerPoolConfig::default()
                .with_threads(threads)
                .with_batch_size(batch_size),
        )
        .unwrap()
    }

    #[test]
    fn test_map_preserves_order() {
        let pool = pool(4, 3);
        let items: Vec<usize> = (0..100).collect();
        let results = pool.map(&items, |i| i * 2).unwrap();
        assert_eq!(results, (0..100).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_order_independent_of_completion() {
        let pool = pool(4, 1);
        let items: Vec<u64> = vec![40, 0, 30, 0, 20, 10];
        // Earlier items sleep longer, so they complete last.
        let results = pool
            .map(&items, |&ms| {
                thread::sleep(Duration::from_millis(ms));
                ms
            })
            .unwrap();
        assert_eq!(results, items);
    }

    #[test]
    fn test_empty_input() {
        let pool = pool(2, 10);
        let items: Vec<String> = Vec::new();
        assert!(pool.map(&items, |s| s.len()).unwrap().is_empty());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let pool = pool(2, 10);
        assert!(pool.map_batched(&[1, 2, 3], 0, |x| *x).is_err());
    }

    #[test]
    fn test_pool_size() {
        let pool = pool(3, 10);
        assert_eq!(pool.num_threads(), 3);
        assert_eq!(pool.batch_size(), 10);
    }
}
