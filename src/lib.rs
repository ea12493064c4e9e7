//! Parallel building blocks for prime counting with 128-bit arguments
//!
//! * [`fast_div`]: division that narrows operands to the cheapest width
//!   their runtime values allow.
//! * [`load_balancer`]: adaptive chunk scheduler for the sieving phases.
//! * [`parallel`]: fixed-size worker pools running claim loops.

pub mod fast_div;
pub mod load_balancer;
pub mod parallel;

pub use crate::fast_div::{
    fast_div, fast_div64, Aggressive, Conservative, DefaultPolicy, DivPolicy, FastDiv, FastDiv64,
};
pub use crate::load_balancer::{LoadBalancerP2, LoadBalancerP2Builder};
pub use crate::parallel::{fold_claims, sum_claims};

pub use primecount_core::{Config, PrimecountError, PrimecountResult};
