use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::config::default_workers;
use crate::count::count_chunk;
use crate::partition::{effective_workers, partition};

/// Outcome of one parallel pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelCount {
    pub primes: u64,
    /// Workers that were actually given a chunk.
    pub workers: usize,
}

/// Counts primes by splitting the input into contiguous chunks and running
/// one task per chunk on a fixed-size pool.
///
/// The pool never has more threads than the host has execution units; extra
/// chunks queue on it instead of each getting an OS thread.
pub struct ParallelCounter {
    num_workers: usize,
    pool: ThreadPool,
    progress: Option<ProgressBar>,
}

impl ParallelCounter {
    /// Builds the pool up front so that `run` only measures counting.
    pub fn new(num_workers: usize) -> Result<Self> {
        Self::with_max_threads(num_workers, default_workers())
    }

    /// Like [`ParallelCounter::new`] with an explicit cap on pool threads.
    pub fn with_max_threads(num_workers: usize, max_threads: usize) -> Result<Self> {
        let num_workers = num_workers.max(1);
        let threads = num_workers.min(max_threads).max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("primecount-worker-{}", index))
            .build()
            .with_context(|| format!("Failed to start {} worker threads", threads))?;
        debug!("Started pool of {} threads for {} workers", threads, num_workers);

        Ok(Self {
            num_workers,
            pool,
            progress: None,
        })
    }

    /// Advance `progress` by one each time a chunk finishes.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn pool_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Workers that `run` would use for `len` numbers.
    pub fn workers_for(&self, len: usize) -> usize {
        effective_workers(len, self.num_workers)
    }

    /// Partitions `numbers`, counts every chunk as its own pool task and
    /// sums the partial counts. Returns only once every chunk is done.
    pub fn run(&self, numbers: &[i64]) -> ParallelCount {
        let chunks = partition(numbers.len(), self.num_workers);
        if chunks.is_empty() {
            return ParallelCount {
                primes: 0,
                workers: 0,
            };
        }

        debug!(
            "Partitioned {} numbers into {} chunks of up to {}",
            numbers.len(),
            chunks.len(),
            chunks[0].len()
        );

        if let Some(ref pb) = self.progress {
            pb.set_length(chunks.len() as u64);
        }

        let primes = self.pool.install(|| {
            chunks
                .par_iter()
                .with_max_len(1)
                .map(|&chunk| {
                    let partial = count_chunk(numbers, chunk);
                    trace!(
                        "Chunk {}..{} counted {} primes",
                        chunk.start,
                        chunk.end,
                        partial
                    );
                    if let Some(ref pb) = self.progress {
                        pb.inc(1);
                    }
                    partial
                })
                .sum::<u64>()
        });

        if let Some(ref pb) = self.progress {
            pb.finish_and_clear();
        }

        ParallelCount {
            primes,
            workers: chunks.len(),
        }
    }
}

/// Parallel prime count over `numbers` with up to `workers` workers.
pub fn count_parallel(numbers: &[i64], workers: usize) -> Result<u64> {
    Ok(ParallelCounter::new(workers)?.run(numbers).primes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::count_sequential;

    #[test]
    fn test_empty_input_returns_zero_without_workers() {
        let result = ParallelCounter::new(8).unwrap().run(&[]);
        assert_eq!(result.primes, 0);
        assert_eq!(result.workers, 0);
    }

    #[test]
    fn test_matches_sequential() {
        let numbers: Vec<i64> = (-100..20_000).collect();
        let expected = count_sequential(&numbers);
        for workers in [1, 2, 3, 4, 7, 16, 33] {
            assert_eq!(
                count_parallel(&numbers, workers).unwrap(),
                expected,
                "workers = {}",
                workers
            );
        }
    }

    #[test]
    fn test_worker_count_clamps_to_input_length() {
        let counter = ParallelCounter::new(64).unwrap();
        let result = counter.run(&[2, 3, 4]);
        assert_eq!(result.primes, 2);
        assert_eq!(result.workers, 3);
        assert_eq!(counter.workers_for(3), 3);
    }

    #[test]
    fn test_zero_workers_is_treated_as_one() {
        let counter = ParallelCounter::new(0).unwrap();
        assert_eq!(counter.num_workers(), 1);
        let result = counter.run(&[5, 11, 12]);
        assert_eq!(result.primes, 2);
        assert_eq!(result.workers, 1);
    }

    #[test]
    fn test_progress_reaches_chunk_count() {
        let pb = ProgressBar::hidden();
        let counter = ParallelCounter::new(4).unwrap().with_progress(pb.clone());
        let numbers: Vec<i64> = (0..100).collect();
        let result = counter.run(&numbers);
        assert_eq!(result.primes, 25);
        assert_eq!(pb.position(), 4);
        assert_eq!(pb.length(), Some(4));
    }

    #[test]
    fn test_pool_threads_are_capped() {
        let counter = ParallelCounter::with_max_threads(5_000, 2).unwrap();
        assert_eq!(counter.num_workers(), 5_000);
        assert_eq!(counter.pool_threads(), 2);
        assert!(ParallelCounter::new(100_000).unwrap().pool_threads() <= default_workers());
    }

    #[test]
    fn test_one_chunk_per_number_in_the_thousands() {
        let numbers: Vec<i64> = (0..5_000).collect();
        let started = std::time::Instant::now();
        let result = ParallelCounter::new(numbers.len()).unwrap().run(&numbers);
        assert_eq!(result.workers, 5_000);
        assert_eq!(result.primes, count_sequential(&numbers));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
