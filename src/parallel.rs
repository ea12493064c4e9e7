//! Running claim loops on a fixed pool of worker threads

use crate::load_balancer::LoadBalancerP2;
use primecount_core::PrimecountResult;
use primecount_utils::build_thread_pool;
use std::ops::Add;
use tracing::{debug, trace};

/// Run one claim loop per thread of a pool sized by
/// [`LoadBalancerP2::threads`] and fold the per-chunk results.
///
/// `work(low, high)` sieves `[low, high)` and runs outside the balancer's
/// lock. Each worker folds its own chunks starting from `identity`, then
/// the per-worker partials are folded in worker order.
pub fn fold_claims<T, W, C>(
    balancer: &LoadBalancerP2,
    identity: T,
    work: W,
    combine: C,
) -> PrimecountResult<T>
where
    T: Clone + Send + Sync,
    W: Fn(u64, u64) -> T + Sync,
    C: Fn(T, T) -> T + Sync,
{
    let pool: rayon::ThreadPool = build_thread_pool(balancer.threads())?;

    let partials = pool.broadcast(|ctx| {
        let mut acc = identity.clone();
        let mut chunks = 0usize;
        while let Some(range) = balancer.claim() {
            acc = combine(acc, work(range.start, range.end));
            chunks += 1;
        }
        trace!("Worker {} done after {} chunks", ctx.index(), chunks);
        acc
    });

    debug!("{} workers finished sieving up to {}", partials.len(), balancer.limit());
    Ok(partials.into_iter().fold(identity, &combine))
}

/// [`fold_claims`] with addition, the usual reduction for partial sums
pub fn sum_claims<T, W>(balancer: &LoadBalancerP2, work: W) -> PrimecountResult<T>
where
    T: Default + Add<Output = T> + Clone + Send + Sync,
    W: Fn(u64, u64) -> T + Sync,
{
    fold_claims(balancer, T::default(), work, |a, b| a + b)
}
