//! Work distribution for the parallel sieving phases
//!
//! A load balancer owns the frontier of a numeric interval. Worker threads
//! repeatedly claim the next chunk under a short lock and sieve it without
//! holding any lock. A claim either yields a non-empty `[low, high)` or
//! reports that the interval is exhausted; exhaustion is permanent.

pub mod p2;

pub use p2::{status_precision, LoadBalancerP2, LoadBalancerP2Builder};
