//! Core utilities and types shared across all primecount crates

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{PrimecountError, PrimecountResult};
pub use config::{
    Config, LoadBalancerConfig, StatusConfig, ThreadsConfig, default_config, load_config,
    save_config,
};
pub use logging::init_logging;

/// Version information for the primecount project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
