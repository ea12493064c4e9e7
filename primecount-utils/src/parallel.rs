//! Parallel processing utilities

use primecount_core::{PrimecountError, PrimecountResult};

/// Resolve a requested thread count, 0 meaning all logical CPUs
pub fn resolve_threads(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

/// Largest thread count `<= threads` that still gives every thread at
/// least `min_distance` of the total `distance`. Never returns 0.
pub fn ideal_num_threads(distance: u64, threads: usize, min_distance: u64) -> usize {
    let min_distance = min_distance.max(1);
    let by_distance = (distance / min_distance).max(1);
    let by_distance = usize::try_from(by_distance).unwrap_or(usize::MAX);

    threads.min(by_distance).max(1)
}

/// Build a dedicated pool of exactly `threads` named worker threads
pub fn build_thread_pool(threads: usize) -> PrimecountResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_threads(threads))
        .thread_name(|i| format!("primecount-worker-{}", i))
        .build()
        .map_err(|e| PrimecountError::ThreadPool(format!("Failed to create thread pool: {}", e)))
}
