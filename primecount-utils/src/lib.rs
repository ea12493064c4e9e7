//! Shared utilities for primecount
//!
//! Integer math, thread-count resolution, time sources and status
//! reporting used by the load balancers.

pub mod clock;
pub mod imath;
pub mod parallel;
pub mod status;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use imath::{ceil_div, isqrt, percent};
pub use parallel::{build_thread_pool, ideal_num_threads, resolve_threads};
pub use status::{format_status, ConsoleStatus, RecordingStatus, StatusRecord, StatusSink};
