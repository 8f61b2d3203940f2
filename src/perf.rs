//! Performance monitoring utilities.
//!
//! Timing instrumentation for the parser and view engine hot paths.
//!
//! ## Features
//!
//! - **Scoped timers**: RAII-style timing for code blocks, warning when slow
//! - **Aggregated statistics**: Per-operation rolling samples with p95
//! - **Conditional compilation**: `profile_scope!` is zero-cost without the
//!   `profiling` feature
//!
//! ```ignore
//! use chipdex::profile_scope;
//!
//! fn recompute() {
//!     profile_scope!("recompute");
//!     // ... work ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

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

pub use profile_scope;

// ============================================================================
// Operation Statistics
// ============================================================================

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    max_ms: f64,
    /// Running sum over `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over recent samples.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }
}

/// Collects timings of named operations (view recomputation, loads).
#[derive(Debug, Default)]
pub struct QueryMonitor {
    operation_stats: HashMap<&'static str, OperationStats>,
}

impl QueryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operation timing.
    pub fn record_operation(&mut self, name: &'static str, elapsed_ms: f64) {
        self.operation_stats.entry(name).or_default().record(elapsed_ms);
    }

    /// Time `f` and record it under `name`.
    pub fn time<T, F: FnOnce() -> T>(&mut self, name: &'static str, f: F) -> T {
        let (result, elapsed_ms) = measure(f);
        self.record_operation(name, elapsed_ms);
        result
    }

    pub fn get_operation_stats(&self, name: &str) -> Option<&OperationStats> {
        self.operation_stats.get(name)
    }

    /// Operations whose average exceeds `threshold_ms`, slowest first
    pub fn slow_operations(&self, threshold_ms: f64) -> Vec<(&'static str, &OperationStats)> {
        let mut ops: Vec<_> = self
            .operation_stats
            .iter()
            .filter(|(_, stats)| stats.average() > threshold_ms)
            .map(|(name, stats)| (*name, stats))
            .collect();
        ops.sort_by(|a, b| {
            b.1.average()
                .partial_cmp(&a.1.average())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ops
    }

    /// Log operations whose average exceeds `threshold_ms`.
    pub fn log_summary_if_slow(&self, threshold_ms: f64) {
        let ops = self.slow_operations(threshold_ms);
        if ops.is_empty() {
            return;
        }

        warn!(slow_operations = ops.len(), "Catalog operations below target");
        for (name, stats) in ops.iter().take(5) {
            debug!(
                "  {}: avg={:.2}ms, p95={:.2}ms, max={:.2}ms, count={}",
                name,
                stats.average(),
                stats.p95(),
                stats.max_ms,
                stats.count
            );
        }
    }

    pub fn reset(&mut self) {
        self.operation_stats.clear();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

// Thread-local depth tracking for hierarchical profiling
#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Create a timer for profiling (lower threshold, 1ms).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    /// Elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
