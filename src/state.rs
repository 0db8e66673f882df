use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request Counters (lock-free) ──

pub struct RequestCounters {
    pub calculations_served: AtomicU64,
    pub calculations_rejected: AtomicU64,
    pub numeric_faults: AtomicU64,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self {
            calculations_served: AtomicU64::new(0),
            calculations_rejected: AtomicU64::new(0),
            numeric_faults: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            calculations_served: self.calculations_served.load(Ordering::Relaxed),
            calculations_rejected: self.calculations_rejected.load(Ordering::Relaxed),
            numeric_faults: self.numeric_faults.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CounterSnapshot {
    pub calculations_served: u64,
    pub calculations_rejected: u64,
    pub numeric_faults: u64,
}

// ── Shared App State ──
// Immutable config plus counters. Form values never live here: each
// request owns its own input.

pub struct AppState {
    pub config: AppConfig,
    pub counters: RequestCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: RequestCounters::new(),
        })
    }
}
