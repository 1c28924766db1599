//! Fixed-window rate limiting per client key.
//!
//! State is per process and is not shared between instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source for window arithmetic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// At most `max` accepted calls per key per `window`. The window starts at
/// a key's first call and resets once it has elapsed.
pub struct RateLimiter {
    max: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    entries: tokio::sync::Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self::with_clock(max, window, Arc::new(SystemClock))
    }

    pub fn with_clock(max: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            max,
            window,
            clock,
            entries: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Count a call for `key`; `false` once the key is over its budget.
    pub async fn check(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        // Evict expired windows.
        entries.retain(|_, w| w.reset_at > now);

        let window = entries.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });

        if window.count >= self.max {
            tracing::debug!(key, count = window.count, "rate limit exceeded");
            return false;
        }

        window.count += 1;
        true
    }

    pub async fn tracked_keys(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(clock: &ManualClock) -> RateLimiter {
        RateLimiter::with_clock(3, Duration::from_secs(15 * 60), Arc::new(clock.clone()))
    }

    #[tokio::test]
    async fn test_three_allowed_then_rejected() {
        let clock = ManualClock::new();
        let rl = limiter(&clock);

        assert!(rl.check("1.2.3.4").await);
        assert!(rl.check("1.2.3.4").await);
        assert!(rl.check("1.2.3.4").await);
        assert!(!rl.check("1.2.3.4").await);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let clock = ManualClock::new();
        let rl = limiter(&clock);

        for _ in 0..3 {
            assert!(rl.check("a").await);
        }
        assert!(!rl.check("a").await);
        assert!(rl.check("b").await);
    }

    #[tokio::test]
    async fn test_window_resets_after_elapsing() {
        let clock = ManualClock::new();
        let rl = limiter(&clock);

        for _ in 0..3 {
            assert!(rl.check("a").await);
        }
        clock.advance(Duration::from_secs(14 * 60));
        assert!(!rl.check("a").await);

        clock.advance(Duration::from_secs(61));
        assert!(rl.check("a").await);
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted() {
        let clock = ManualClock::new();
        let rl = limiter(&clock);

        rl.check("a").await;
        rl.check("b").await;
        assert_eq!(rl.tracked_keys().await, 2);

        clock.advance(Duration::from_secs(16 * 60));
        rl.check("c").await;
        assert_eq!(rl.tracked_keys().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_checks_never_exceed_budget() {
        let rl = Arc::new(RateLimiter::new(3, Duration::from_secs(60)));
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let rl = rl.clone();
                tokio::spawn(async move { rl.check("same").await })
            })
            .collect();

        let mut allowed = 0;
        for h in handles {
            if h.await.unwrap() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 3);
    }
}
