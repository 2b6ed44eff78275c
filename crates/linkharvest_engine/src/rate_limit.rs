use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

/// Fixed-window request counter per key. Rejected attempts still count
/// against the window.
#[derive(Debug, Clone)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: HashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: HashMap::new(),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Counts one request for `key`. On rejection returns how long until the
    /// key's window resets.
    pub fn check(&mut self, key: &str, now: Instant) -> Result<(), Duration> {
        let window = self.window;
        let entry = self
            .windows
            .entry(key.to_string())
            .or_insert(Window {
                count: 0,
                resets_at: now + window,
            });
        if now > entry.resets_at {
            *entry = Window {
                count: 0,
                resets_at: now + window,
            };
        }
        entry.count += 1;
        if entry.count > self.max_requests {
            Err(entry.resets_at.saturating_duration_since(now))
        } else {
            Ok(())
        }
    }

    /// Forgets keys whose window has expired.
    pub fn prune(&mut self, now: Instant) {
        self.windows.retain(|_, window| now <= window.resets_at);
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}
