use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Time source for the limiter. Production code uses [`SystemClock`]; tests
/// swap in a manual clock to drive windows deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// Rate limit entry - one counter window for a single key
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
    // Window length in force when this entry was last (re)started.
    // Only the sweeper reads it; checks use the caller's window.
    pub window: Duration,
}

/// Outcome of a rate limit check. `reset_in` is the time until the window
/// rolls over and is set only on denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub reset_in: Option<Duration>,
}

/// Per-key admission counter over a rolling window.
///
/// Keys are caller-constructed strings namespacing a purpose and a subject,
/// e.g. `login:email:alice@example.com` or `report:ip:10.0.0.7`. Counters for
/// different keys never influence each other. State is in-memory only: a
/// restart resets every counter, which is accepted for this deployment.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Admit or deny one request for `key`, allowing at most `limit`
    /// admissions per `window`.
    ///
    /// A request arriving exactly at the window boundary starts a fresh
    /// window. Completes without yielding; the per-key entry lock makes the
    /// read-modify-write atomic, so at most `limit` calls per window see
    /// `allowed` even under concurrent checks on the same key.
    pub fn check_sync(&self, key: &str, limit: u32, window: Duration) -> RateLimitDecision {
        assert!(limit > 0, "rate limit must be positive");
        assert!(!window.is_zero(), "rate window must be positive");

        let now = self.clock.now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                window_start: now,
                window,
            });

        // Window elapsed? Start a fresh one
        if now.duration_since(entry.window_start) >= window {
            entry.count = 1;
            entry.window_start = now;
            entry.window = window;
            return RateLimitDecision {
                allowed: true,
                reset_in: None,
            };
        }

        // Under limit? Allow
        if entry.count < limit {
            entry.count += 1;
            return RateLimitDecision {
                allowed: true,
                reset_in: None,
            };
        }

        // Over limit
        let reset_in = window.saturating_sub(now.duration_since(entry.window_start));
        RateLimitDecision {
            allowed: false,
            reset_in: Some(reset_in),
        }
    }

    /// Awaitable variant of [`Self::check_sync`]. Identical windowing; there
    /// is no await point inside, so a check is never interleaved with another
    /// mutation of the same key.
    pub async fn check(&self, key: &str, limit: u32, window: Duration) -> RateLimitDecision {
        self.check_sync(key, limit, window)
    }

    /// Drop entries whose window has already elapsed. An expired entry would
    /// be reset on its next check anyway, so removal never changes a
    /// decision. Returns the number of keys still tracked.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) < entry.window);
        self.entries.len()
    }

    #[cfg(test)]
    fn count_for(&self, key: &str) -> Option<u32> {
        self.entries.get(key).map(|e| e.count)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn limiter() -> (Arc<ManualClock>, RateLimiter) {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::with_clock(clock.clone());
        (clock, limiter)
    }

    #[test]
    fn admits_up_to_limit_then_denies() {
        let (_clock, limiter) = limiter();
        let window = Duration::from_millis(1000);

        for _ in 0..3 {
            let decision = limiter.check_sync("k", 3, window);
            assert!(decision.allowed);
            assert_eq!(decision.reset_in, None);
        }

        let denied = limiter.check_sync("k", 3, window);
        assert!(!denied.allowed);
        // No time has passed, so the full window remains
        assert_eq!(denied.reset_in, Some(window));
    }

    #[test]
    fn reset_in_shrinks_as_window_elapses() {
        let (clock, limiter) = limiter();
        let window = Duration::from_millis(1000);

        for _ in 0..3 {
            assert!(limiter.check_sync("k", 3, window).allowed);
        }

        clock.advance(Duration::from_millis(400));
        let denied = limiter.check_sync("k", 3, window);
        assert!(!denied.allowed);
        assert_eq!(denied.reset_in, Some(Duration::from_millis(600)));
    }

    #[test]
    fn window_boundary_starts_fresh_window() {
        let (clock, limiter) = limiter();
        let window = Duration::from_millis(1000);

        for _ in 0..3 {
            assert!(limiter.check_sync("k", 3, window).allowed);
        }
        assert!(!limiter.check_sync("k", 3, window).allowed);

        // Arriving exactly at window_start + window rolls the window over
        clock.advance(window);
        let decision = limiter.check_sync("k", 3, window);
        assert!(decision.allowed);
        assert_eq!(limiter.count_for("k"), Some(1));
    }

    #[test]
    fn admits_again_after_reset_in_elapses() {
        let (clock, limiter) = limiter();
        let window = Duration::from_millis(1000);

        for _ in 0..2 {
            assert!(limiter.check_sync("k", 2, window).allowed);
        }
        clock.advance(Duration::from_millis(250));
        let denied = limiter.check_sync("k", 2, window);
        assert!(!denied.allowed);

        clock.advance(denied.reset_in.unwrap());
        assert!(limiter.check_sync("k", 2, window).allowed);
    }

    #[test]
    fn keys_are_independent() {
        let (_clock, limiter) = limiter();
        let window = Duration::from_millis(60_000);

        for _ in 0..5 {
            assert!(limiter.check_sync("a", 5, window).allowed);
            assert!(limiter.check_sync("b", 5, window).allowed);
        }

        assert!(!limiter.check_sync("a", 5, window).allowed);
        assert!(!limiter.check_sync("b", 5, window).allowed);
        assert_eq!(limiter.count_for("a"), Some(5));
        assert_eq!(limiter.count_for("b"), Some(5));
    }

    #[tokio::test]
    async fn async_check_matches_sync_behavior() {
        let (_clock, limiter) = limiter();
        let window = Duration::from_millis(1000);

        assert!(limiter.check("k", 2, window).await.allowed);
        assert!(limiter.check_sync("k", 2, window).allowed);

        let denied = limiter.check("k", 2, window).await;
        assert!(!denied.allowed);
        assert_eq!(denied.reset_in, Some(window));
    }

    #[test]
    fn sweep_drops_only_expired_entries() {
        let (clock, limiter) = limiter();

        assert!(limiter.check_sync("short", 5, Duration::from_millis(100)).allowed);
        assert!(limiter.check_sync("long", 5, Duration::from_millis(10_000)).allowed);

        clock.advance(Duration::from_millis(500));
        assert_eq!(limiter.sweep(), 1);
        assert_eq!(limiter.count_for("short"), None);
        assert_eq!(limiter.count_for("long"), Some(1));

        // A swept key behaves like a brand new one
        assert!(limiter.check_sync("short", 5, Duration::from_millis(100)).allowed);
        assert_eq!(limiter.count_for("short"), Some(1));
    }

    #[test]
    #[should_panic(expected = "rate limit must be positive")]
    fn zero_limit_is_a_caller_bug() {
        let (_clock, limiter) = limiter();
        limiter.check_sync("k", 0, Duration::from_millis(1000));
    }
}
