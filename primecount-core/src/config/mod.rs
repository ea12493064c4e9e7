//! Configuration types for primecount
//!
//! The load balancer constants below were tuned on a dual-socket
//! AMD EPYC 7642 server (192 cores). They are exposed so they can be
//! recalibrated on other hardware without touching the scheduler.

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::PrimecountError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub load_balancer: LoadBalancerConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub threads: ThreadsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerConfig {
    /// Smallest distance a single thread is ever handed (before the
    /// startup-cost floor kicks in)
    #[serde(default = "default_min_thread_distance")]
    pub min_thread_distance: u64,
    /// Thread cap is `floor(limit ^ (1 / thread_root_exponent))`
    #[serde(default = "default_thread_root_exponent")]
    pub thread_root_exponent: f64,
    /// Chunk floor is `init_cost_factor * low^(2/3)`
    #[serde(default = "default_init_cost_factor")]
    pub init_cost_factor: f64,
    /// Initial number of chunks handed to each thread
    #[serde(default = "default_chunks_per_thread")]
    pub chunks_per_thread: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Minimum number of seconds between two status lines
    #[serde(default = "default_status_interval")]
    pub interval_secs: f64,
    /// Decimal places of the percentage (derived from x when unset)
    #[serde(default)]
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadsConfig {
    /// Number of worker threads (0 = all logical CPUs)
    #[serde(default)]
    pub count: usize,
}

// Default value functions
fn default_min_thread_distance() -> u64 { 1 << 23 }
fn default_thread_root_exponent() -> f64 { 3.7 }
fn default_init_cost_factor() -> f64 { 5.0 }
fn default_chunks_per_thread() -> u64 { 8 }
fn default_status_interval() -> f64 { 0.1 }

impl Default for LoadBalancerConfig {
    fn default() -> Self {
        Self {
            min_thread_distance: default_min_thread_distance(),
            thread_root_exponent: default_thread_root_exponent(),
            init_cost_factor: default_init_cost_factor(),
            chunks_per_thread: default_chunks_per_thread(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_status_interval(),
            precision: None,
        }
    }
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self { count: 0 }
    }
}

impl Config {
    /// Reject values the scheduler cannot work with
    pub fn validate(&self) -> Result<(), PrimecountError> {
        let lb = &self.load_balancer;
        if !(lb.thread_root_exponent.is_finite() && lb.thread_root_exponent > 0.0) {
            return Err(PrimecountError::Configuration(format!(
                "thread_root_exponent must be positive, got {}",
                lb.thread_root_exponent
            )));
        }
        if !(lb.init_cost_factor.is_finite() && lb.init_cost_factor >= 0.0) {
            return Err(PrimecountError::Configuration(format!(
                "init_cost_factor must be non-negative, got {}",
                lb.init_cost_factor
            )));
        }
        if lb.chunks_per_thread == 0 {
            return Err(PrimecountError::Configuration(
                "chunks_per_thread must be at least 1".to_string(),
            ));
        }
        if !(self.status.interval_secs.is_finite() && self.status.interval_secs >= 0.0) {
            return Err(PrimecountError::Configuration(format!(
                "status interval must be non-negative, got {}",
                self.status.interval_secs
            )));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PrimecountError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PrimecountError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), PrimecountError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| PrimecountError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
