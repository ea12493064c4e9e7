//! Load balancer for the 2nd partial sieve function
//!
//! Hands out sub-ranges of `[sqrt(x), limit)` to worker threads. Used by
//! the P2(x, a) and B(x, y) computations, which sieve that interval and
//! pay a fixed startup cost (computing PrimePi(low)) for every chunk.

use parking_lot::Mutex;
use primecount_core::{Config, LoadBalancerConfig, StatusConfig};
use primecount_utils::{
    ideal_num_threads, isqrt, percent, resolve_threads, Clock, ConsoleStatus, StatusSink,
    SystemClock,
};
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Mutable scheduling state, only touched under the lock
#[derive(Debug)]
struct ClaimState {
    /// Next unclaimed position, `start <= low <= limit`
    low: u64,
    /// Width of the next chunk
    chunk_size: u64,
    /// Floor for `chunk_size`, grows with `low`
    min_chunk_size: u64,
    /// Clock reading of the last status report
    last_print: Option<Duration>,
    /// Exhaustion has been logged
    done_logged: bool,
}

/// Adaptive scheduler handing out `[low, high)` chunks to worker threads
pub struct LoadBalancerP2 {
    start: u64,
    limit: u64,
    threads: usize,
    is_print: bool,
    precision: usize,
    init_cost_factor: f64,
    status_interval: Duration,
    state: Mutex<ClaimState>,
    clock: Arc<dyn Clock>,
    status: Arc<dyn StatusSink>,
}

impl LoadBalancerP2 {
    /// Scheduler for sieving `[isqrt(x), limit)` with default tuning.
    ///
    /// `threads == 0` requests all logical CPUs. The resolved count is
    /// available from [`threads`](Self::threads).
    pub fn new(x: u128, limit: u64, threads: usize, is_print: bool) -> Self {
        Self::builder(x, limit).threads(threads).print(is_print).build()
    }

    pub fn builder(x: u128, limit: u64) -> LoadBalancerP2Builder {
        LoadBalancerP2Builder::new(x, limit)
    }

    /// Number of worker threads the caller should spawn
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// First position of the interval, `min(isqrt(x), limit)`
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end of the interval
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Decimal places used for status percentages
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Width the next chunk would have before adjustment
    pub fn chunk_size(&self) -> u64 {
        self.state.lock().chunk_size
    }

    /// Current floor on chunk width
    pub fn min_chunk_size(&self) -> u64 {
        self.state.lock().min_chunk_size
    }

    /// Whether the whole interval has been handed out
    pub fn is_done(&self) -> bool {
        self.state.lock().low >= self.limit
    }

    /// Claim the next chunk, `None` once the interval is exhausted.
    ///
    /// Every call after exhaustion returns `None` again.
    pub fn claim(&self) -> Option<Range<u64>> {
        let mut state = self.state.lock();
        self.print_status(&mut state);

        // Remaining sieving distance
        state.low = state.low.min(self.limit);
        let dist = self.limit - state.low;

        // Chunking only helps multi-threading and live status output. A
        // single printing thread still chunks so status keeps updating.
        if self.threads == 1 && !self.is_print {
            state.chunk_size = dist;
        } else {
            // Computing PrimePi(low) takes O(low^(2/3) / log(low)^2) while
            // sieving n = 5 * low^(2/3) takes O(n log log n), more than 10x
            // as much. Keeps thread startup below ~10% of a chunk.
            let low13 = (state.low as f64).cbrt();
            let floor = (low13 * low13 * self.init_cost_factor) as u64;
            state.min_chunk_size = state.min_chunk_size.max(floor);
            state.chunk_size = state.chunk_size.max(state.min_chunk_size);

            // Shrink chunks near the end so all threads stay busy
            let max_thread_dist = dist / self.threads as u64;
            if state.chunk_size > max_thread_dist {
                state.chunk_size = state.min_chunk_size.max(max_thread_dist);
            }
        }

        let low = state.low;
        state.low = low.saturating_add(state.chunk_size).min(self.limit);
        let high = state.low;

        if low < self.limit {
            trace!("Claimed [{}, {}) ({} remaining)", low, high, self.limit - high);
            Some(low..high)
        } else {
            if !state.done_logged {
                state.done_logged = true;
                debug!("Sieving interval [{}, {}) exhausted", self.start, self.limit);
            }
            None
        }
    }

    /// Claim as `(low, high, has_work)`. Once exhausted this returns
    /// `(limit, limit, false)` and the caller must stop.
    pub fn try_claim(&self) -> (u64, u64, bool) {
        match self.claim() {
            Some(range) => (range.start, range.end, true),
            None => (self.limit, self.limit, false),
        }
    }

    fn print_status(&self, state: &mut ClaimState) {
        if !self.is_print {
            return;
        }

        let now = self.clock.now();
        if let Some(last) = state.last_print {
            if now.saturating_sub(last) < self.status_interval {
                return;
            }
        }

        state.last_print = Some(now);
        self.status.report(percent(state.low, self.limit), self.precision, now);
    }
}

impl std::fmt::Debug for LoadBalancerP2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadBalancerP2")
            .field("start", &self.start)
            .field("limit", &self.limit)
            .field("threads", &self.threads)
            .field("is_print", &self.is_print)
            .field("state", &*self.state.lock())
            .finish()
    }
}

/// Status precision for a computation of size `x`: huge computations
/// advance slowly, so they get extra decimals.
pub fn status_precision(x: u128) -> usize {
    let x = x as f64;
    if x >= 1e23 {
        2
    } else if x >= 1e21 {
        1
    } else {
        0
    }
}

/// Builder for [`LoadBalancerP2`]
pub struct LoadBalancerP2Builder {
    x: u128,
    limit: u64,
    threads: usize,
    is_print: bool,
    tuning: LoadBalancerConfig,
    status_config: StatusConfig,
    clock: Option<Arc<dyn Clock>>,
    status: Option<Arc<dyn StatusSink>>,
}

impl LoadBalancerP2Builder {
    pub fn new(x: u128, limit: u64) -> Self {
        Self {
            x,
            limit,
            threads: 0,
            is_print: false,
            tuning: LoadBalancerConfig::default(),
            status_config: StatusConfig::default(),
            clock: None,
            status: None,
        }
    }

    /// Take tuning, status settings and thread count from a config
    pub fn config(mut self, config: &Config) -> Self {
        self.tuning = config.load_balancer.clone();
        self.status_config = config.status.clone();
        self.threads = config.threads.count;
        self
    }

    pub fn tuning(mut self, tuning: LoadBalancerConfig) -> Self {
        self.tuning = tuning;
        self
    }

    /// Requested thread count, 0 for all logical CPUs
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn print(mut self, is_print: bool) -> Self {
        self.is_print = is_print;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn status_sink(mut self, status: Arc<dyn StatusSink>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> LoadBalancerP2 {
        let tuning = self.tuning;
        let start = isqrt(self.x).min(self.limit);
        let dist = self.limit - start;
        let min_thread_dist = tuning.min_thread_distance.max(1);

        // Per-thread startup cost outgrows the available parallel work
        // as the thread count rises relative to the problem size
        let max_threads = (self.limit as f64).powf(1.0 / tuning.thread_root_exponent) as usize;
        let threads = resolve_threads(self.threads).min(max_threads);
        let threads = ideal_num_threads(dist, threads, min_thread_dist);

        // More chunks per thread balance better but cost more claims
        let chunks = (threads as u64).saturating_mul(tuning.chunks_per_thread.max(1));
        let chunk_size = (dist / chunks).max(min_thread_dist);

        let precision = self
            .status_config
            .precision
            .unwrap_or_else(|| status_precision(self.x));
        let status_interval = Duration::try_from_secs_f64(self.status_config.interval_secs)
            .unwrap_or(Duration::ZERO);

        let is_print = self.is_print;
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock::new()),
        };
        let status: Arc<dyn StatusSink> = match self.status {
            Some(status) => status,
            None if is_print => Arc::new(ConsoleStatus::new()),
            None => Arc::new(ConsoleStatus::hidden()),
        };

        debug!(
            "LoadBalancerP2: sieving [{}, {}) with {} threads (requested {}, cap {}), chunk size {}",
            start, self.limit, threads, self.threads, max_threads, chunk_size
        );

        LoadBalancerP2 {
            start,
            limit: self.limit,
            threads,
            is_print,
            precision,
            init_cost_factor: tuning.init_cost_factor,
            status_interval,
            state: Mutex::new(ClaimState {
                low: start,
                chunk_size,
                min_chunk_size: min_thread_dist,
                last_print: None,
                done_logged: false,
            }),
            clock,
            status,
        }
    }
}
