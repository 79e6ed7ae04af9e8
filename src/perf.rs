//! Performance instrumentation.
//!
//! Scoped timers and profiling macros for the hot editing paths, mainly
//! drag updates, which run at pointer rate.
//!
//! ## Usage
//!
//! Enable profiling with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! folioboard = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn update_drag() {
//!     profile_scope!("drag_update", SLOW_DRAG_UPDATE_MS);
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use crate::profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs its lifetime on drop when it exceeds the threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer for profiling builds (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);

        warn!(
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}
