use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use actix_web::HttpRequest;

pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const RATE_LIMIT_MAX_REQUESTS: usize = 100;

/// Sliding-window request counter, injected per-process via `web::Data` so
/// tests can construct isolated instances. Per-key timestamps are pruned
/// lazily on each call; state is neither persisted nor shared across
/// processes.
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    requests: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn allow(&self, client_key: &str) -> bool {
        self.allow_at(client_key, Instant::now())
    }

    /// Same as [`allow`](Self::allow) with an explicit clock, for tests
    /// that simulate the passage of time.
    pub fn allow_at(&self, client_key: &str, now: Instant) -> bool {
        let mut requests = self.requests.lock().unwrap();
        let timestamps = requests.entry(client_key.to_string()).or_default();

        timestamps.retain(|at| now.duration_since(*at) < self.window);
        if timestamps.len() >= self.max_requests {
            return false;
        }
        timestamps.push(now);
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_REQUESTS)
    }
}

/// Client key for rate limiting: first `X-Forwarded-For` entry when behind
/// a proxy, else the peer address.
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_ceiling_then_rejects() {
        let limiter = RateLimiter::default();
        let now = Instant::now();

        for i in 0..RATE_LIMIT_MAX_REQUESTS {
            assert!(limiter.allow_at("203.0.113.7", now), "call {} rejected", i);
        }
        assert!(!limiter.allow_at("203.0.113.7", now));
    }

    #[test]
    fn window_expiry_resets_the_key() {
        let limiter = RateLimiter::default();
        let now = Instant::now();

        for _ in 0..RATE_LIMIT_MAX_REQUESTS {
            assert!(limiter.allow_at("203.0.113.7", now));
        }
        assert!(!limiter.allow_at("203.0.113.7", now));

        let later = now + Duration::from_secs(61);
        assert!(limiter.allow_at("203.0.113.7", later));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let limiter = RateLimiter::new(RATE_LIMIT_WINDOW, 1);
        let now = Instant::now();

        assert!(limiter.allow_at("a", now));
        assert!(!limiter.allow_at("a", now));
        assert!(limiter.allow_at("b", now));
    }

    #[test]
    fn partial_expiry_only_frees_expired_slots() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2);
        let start = Instant::now();

        assert!(limiter.allow_at("key", start));
        assert!(limiter.allow_at("key", start + Duration::from_secs(30)));
        assert!(!limiter.allow_at("key", start + Duration::from_secs(45)));

        // The first stamp ages out, the second is still inside the window.
        let at_70 = start + Duration::from_secs(70);
        assert!(limiter.allow_at("key", at_70));
        assert!(!limiter.allow_at("key", at_70));
    }
}
