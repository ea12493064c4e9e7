//! Status reporting for long-running sieve computations
//!
//! A status line is a single percentage redrawn in place. Where it ends up
//! is decided by the [`StatusSink`] handed to the component that reports.

pub mod recording;

pub use recording::{RecordingStatus, StatusRecord};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Receiver of throttled status updates.
///
/// Called while the reporter holds its lock, so implementations must be
/// cheap and must not call back into the reporter.
pub trait StatusSink: Send + Sync {
    /// `percent` is in `[0, 100]`, `precision` is the number of decimals
    /// to show and `at` is the reporter's clock reading.
    fn report(&self, percent: f64, precision: usize, at: Duration);
}

/// Format a percentage the way the status line shows it
pub fn format_status(percent: f64, precision: usize) -> String {
    format!("Status: {:.*}%", precision, percent)
}

/// Status line on stderr, redrawn in place
pub struct ConsoleStatus {
    bar: ProgressBar,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A status line that never draws anything (quiet mode)
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        let style = ProgressStyle::with_template("{msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        Self { bar }
    }

    /// Last rendered line
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Default for ConsoleStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ConsoleStatus {
    fn report(&self, percent: f64, precision: usize, _at: Duration) {
        self.bar.set_message(format_status(percent, precision));
    }
}
