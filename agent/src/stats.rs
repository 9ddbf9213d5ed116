//! Decision counters shared across battles

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Running counters owned by the agent, not the engine
///
/// Wrap in an `Arc` to share between battles running on different workers.
#[derive(Debug, Default)]
pub struct DecisionStats {
    decisions: AtomicU64,
    fallbacks: AtomicU64,
    illegal: AtomicU64,
}

/// Point-in-time copy of [`DecisionStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Decisions requested
    pub decisions: u64,
    /// Decisions that ended on a fallback instead of the policy's choice
    pub fallbacks: u64,
    /// Policy actions rejected as illegal
    pub illegal: u64,
}

impl DecisionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decision(&self) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_illegal(&self) {
        self.illegal.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            decisions: self.decisions.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            illegal: self.illegal.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Share of decisions that fell back (0.0 when nothing was decided)
    pub fn fallback_rate(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.fallbacks as f64 / self.decisions as f64
        }
    }
}
