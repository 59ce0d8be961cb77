//! Thread pool configuration for parallel aggregation
//!
//! The parallel [`ProcessingMode`](crate::statistics::ProcessingMode) runs on
//! Rayon's global pool. [`ParallelConfig`] sizes that pool once at startup and
//! decides how many grid rows each accumulation shard covers.

use crate::errors::{Result, ZonalError};
use rayon::ThreadPoolBuilder;

/// Shards handed to each worker thread during accumulation
const SHARDS_PER_THREAD: usize = 4;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Worker threads; `None` keeps Rayon's default of one per core
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Use every available CPU core
    pub fn all_cores() -> Self {
        Self::new(Some(num_cpus::get()))
    }

    /// Build the global Rayon pool.
    ///
    /// The global pool can only be built once per process; a second call with
    /// an explicit thread count fails with [`ZonalError::ThreadPoolError`].
    pub fn setup_global_pool(&self) -> Result<()> {
        if let Some(num_threads) = self.num_threads {
            if num_threads == 0 {
                return Err(ZonalError::ThreadPoolError(
                    "Thread count must be at least 1".to_string(),
                ));
            }
            ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    ZonalError::ThreadPoolError(format!(
                        "Failed to initialize thread pool with {} threads: {}",
                        num_threads, e
                    ))
                })?;
        }

        get_parallel_info().log();
        Ok(())
    }

    /// Threads in the pool the current code runs on
    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }
}

/// Rows per accumulation shard for a grid with `total_rows` rows.
///
/// Aims for a few shards per worker so uneven zones still balance, and never
/// returns zero.
pub fn rows_per_shard(total_rows: usize) -> usize {
    let shards = rayon::current_num_threads() * SHARDS_PER_THREAD;
    (total_rows / shards.max(1)).max(1)
}

/// Snapshot of the parallel processing environment
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Emit the snapshot as an info event
    pub fn log(&self) {
        tracing::info!(
            threads = self.current_threads,
            cores = self.available_cores,
            parallelism = self.available_parallelism,
            "thread pool ready"
        );
    }
}
