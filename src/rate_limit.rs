//! Per-client fixed-window rate limiting for the contact endpoint.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Admission decision for one client identifier.
///
/// The handler only depends on this trait, so the in-memory map below can be
/// swapped for a shared external counter without changing the call contract.
pub trait RateLimit: Send + Sync {
    /// Returns true when the request is admitted.
    fn check(&self, identifier: &str) -> bool;
}

struct WindowRecord {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window limiter keyed by client identifier.
///
/// State is process-local with no eviction and no cross-instance
/// coordination: each scaled-out instance enforces the limit independently.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    fn check_at(&self, identifier: &str, now: Instant) -> bool {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        match records.get_mut(identifier) {
            Some(record) if now <= record.reset_at => {
                if record.count >= self.max_requests {
                    return false;
                }
                record.count += 1;
                true
            }
            // First request from this identifier, or the window elapsed
            _ => {
                records.insert(
                    identifier.to_string(),
                    WindowRecord {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}

impl RateLimit for FixedWindowLimiter {
    fn check(&self, identifier: &str) -> bool {
        self.check_at(identifier, Instant::now())
    }
}
