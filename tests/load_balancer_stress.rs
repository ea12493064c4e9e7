/// Concurrency tests for the P2 load balancer
///
/// Many threads hammer one balancer; the claimed chunks must tile the
/// sieving interval exactly, whatever the interleaving.

use parking_lot::Mutex;
use primecount::LoadBalancerP2;
use primecount_core::LoadBalancerConfig;
use proptest::prelude::*;
use std::ops::Range;
use std::sync::Arc;
use std::thread;

fn tuning(min_thread_distance: u64) -> LoadBalancerConfig {
    LoadBalancerConfig {
        min_thread_distance,
        ..LoadBalancerConfig::default()
    }
}

/// Drain the balancer from `workers` OS threads, returning every claim
fn claim_concurrently(lb: Arc<LoadBalancerP2>, workers: usize) -> Vec<Range<u64>> {
    let claimed = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let lb = lb.clone();
            let claimed = claimed.clone();
            thread::spawn(move || {
                let mut local = Vec::new();
                loop {
                    let (low, high, has_work) = lb.try_claim();
                    if !has_work {
                        break;
                    }
                    local.push(low..high);
                    // Pretend to sieve so claims interleave
                    if local.len() % 3 == 0 {
                        thread::yield_now();
                    }
                }
                claimed.lock().extend(local);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let mut claimed = Arc::try_unwrap(claimed).expect("workers still alive").into_inner();
    claimed.sort_by_key(|r| r.start);
    claimed
}

fn assert_exact_tiling(chunks: &[Range<u64>], start: u64, limit: u64) {
    let mut next = start;
    for chunk in chunks {
        assert_eq!(chunk.start, next, "gap or overlap before {:?}", chunk);
        assert!(chunk.start < chunk.end);
        next = chunk.end;
    }
    assert_eq!(next, limit);
}

#[test]
fn stress_concurrent_claims_sum_to_distance() {
    let x: u128 = 10u128.pow(16);
    let limit = 400_000_000u64;
    let lb = Arc::new(
        LoadBalancerP2::builder(x, limit)
            .threads(8)
            .tuning(tuning(1 << 14))
            .build(),
    );
    assert_eq!(lb.threads(), 8);
    assert_eq!(lb.start(), 100_000_000);

    let chunks = claim_concurrently(lb.clone(), lb.threads());
    let total: u64 = chunks.iter().map(|r| r.end - r.start).sum();

    assert_eq!(total, limit - 100_000_000);
    assert_exact_tiling(&chunks, 100_000_000, limit);
    assert!(lb.is_done());
}

#[test]
fn stress_more_workers_than_threads() {
    // Oversubscription must not change the outcome
    let lb = Arc::new(
        LoadBalancerP2::builder(0, 1 << 26)
            .threads(4)
            .tuning(tuning(1 << 12))
            .build(),
    );
    let chunks = claim_concurrently(lb.clone(), 32);
    assert_exact_tiling(&chunks, 0, 1 << 26);
}

#[test]
fn stress_exhausted_balancer_keeps_refusing() {
    let lb = Arc::new(LoadBalancerP2::builder(0, 1 << 20).threads(2).tuning(tuning(1 << 10)).build());
    claim_concurrently(lb.clone(), 2);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lb = lb.clone();
            thread::spawn(move || (0..100).all(|_| !lb.try_claim().2))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sequential_claims_tile(
        x in 0u128..=10u128.pow(18),
        extra in 0u64..50_000_000,
        threads in 1usize..=16,
        min_dist in 1u64..=1 << 20,
        is_print in any::<bool>(),
    ) {
        let start = primecount_utils::isqrt(x);
        let limit = start + extra;
        let lb = LoadBalancerP2::builder(x, limit)
            .threads(threads)
            .print(is_print)
            .tuning(tuning(min_dist))
            .status_sink(Arc::new(primecount_utils::RecordingStatus::new()))
            .build();

        prop_assert!(lb.threads() >= 1 && lb.threads() <= threads);
        prop_assert_eq!(lb.start(), start);

        let mut next = start;
        while let Some(range) = lb.claim() {
            prop_assert_eq!(range.start, next);
            prop_assert!(range.end > range.start);
            next = range.end;
        }
        prop_assert_eq!(next, limit);
        prop_assert_eq!(lb.try_claim(), (limit, limit, false));
    }

    #[test]
    fn prop_start_clamps_to_limit(x in any::<u128>(), limit in any::<u64>()) {
        let lb = LoadBalancerP2::builder(x, limit).threads(1).build();
        prop_assert_eq!(lb.start(), primecount_utils::isqrt(x).min(limit));
        prop_assert!(lb.start() <= lb.limit());
    }
}
