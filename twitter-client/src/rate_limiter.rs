use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Extra time slept past the advertised reset, so the window has really rolled over.
const RESET_GRACE: Duration = Duration::from_secs(1);

/// Fallback wait when a 429 arrives without an `x-rate-limit-reset` header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// The `x-rate-limit-*` window Twitter reports for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: SystemTime,
}

impl RateLimitStatus {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        Some(Self {
            limit: read("x-rate-limit-limit")? as u32,
            remaining: read("x-rate-limit-remaining")? as u32,
            reset_at: UNIX_EPOCH + Duration::from_secs(read("x-rate-limit-reset")?),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Time left until the window resets, plus a grace second. `None` once it has passed.
    pub fn wait_time(&self, now: SystemTime) -> Option<Duration> {
        self.reset_at
            .duration_since(now)
            .ok()
            .filter(|left| !left.is_zero())
            .map(|left| left + RESET_GRACE)
    }
}

/// Tracks the last reported window per endpoint and sleeps through exhausted ones.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RateLimitStatus>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn update(&self, endpoint: &str, headers: &HeaderMap) {
        if let Some(status) = RateLimitStatus::from_headers(headers) {
            tracing::debug!(
                "Rate limit for {}: {}/{} remaining",
                endpoint,
                status.remaining,
                status.limit
            );
            self.windows.lock().await.insert(endpoint.to_string(), status);
        }
    }

    pub async fn status(&self, endpoint: &str) -> Option<RateLimitStatus> {
        self.windows.lock().await.get(endpoint).cloned()
    }

    /// How long to hold off before calling `endpoint` again, if at all.
    pub async fn pending_wait(&self, endpoint: &str) -> Option<Duration> {
        let windows = self.windows.lock().await;
        let status = windows.get(endpoint)?;
        if status.is_exhausted() {
            status.wait_time(SystemTime::now())
        } else {
            None
        }
    }

    /// Sleep until the endpoint's window resets when its budget is used up.
    pub async fn wait_if_exhausted(&self, endpoint: &str) {
        if let Some(wait) = self.pending_wait(endpoint).await {
            tracing::warn!("Rate limit reached for {}, sleeping {:?}", endpoint, wait);
            sleep(wait).await;
        }
    }

    /// Wait to use after a 429, from the last known reset time of `endpoint`.
    pub async fn retry_after(&self, endpoint: &str) -> Duration {
        self.status(endpoint)
            .await
            .map(|status| status.wait_time(SystemTime::now()).unwrap_or(RESET_GRACE))
            .unwrap_or(DEFAULT_RETRY_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(limit: &str, remaining: &str, reset: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-limit", HeaderValue::from_str(limit).unwrap());
        headers.insert("x-rate-limit-remaining", HeaderValue::from_str(remaining).unwrap());
        headers.insert("x-rate-limit-reset", HeaderValue::from_str(reset).unwrap());
        headers
    }

    fn epoch_secs(time: SystemTime) -> u64 {
        time.duration_since(UNIX_EPOCH).unwrap().as_secs()
    }

    #[test]
    fn test_status_from_headers() {
        let status = RateLimitStatus::from_headers(&headers("180", "179", "1700000000")).unwrap();
        assert_eq!(status.limit, 180);
        assert_eq!(status.remaining, 179);
        assert_eq!(status.reset_at, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        assert!(!status.is_exhausted());
    }

    #[test]
    fn test_status_requires_all_headers() {
        let mut partial = HeaderMap::new();
        partial.insert("x-rate-limit-remaining", HeaderValue::from_static("0"));
        assert!(RateLimitStatus::from_headers(&partial).is_none());

        assert!(RateLimitStatus::from_headers(&headers("180", "lots", "1700000000")).is_none());
    }

    #[test]
    fn test_wait_time_until_reset() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let status = RateLimitStatus {
            limit: 180,
            remaining: 0,
            reset_at: UNIX_EPOCH + Duration::from_secs(1_030),
        };
        assert_eq!(status.wait_time(now), Some(Duration::from_secs(31)));

        let later = UNIX_EPOCH + Duration::from_secs(1_031);
        assert_eq!(status.wait_time(later), None);
    }

    #[tokio::test]
    async fn test_limiter_only_waits_on_exhausted_window() {
        let limiter = RateLimiter::new();
        let future_reset = epoch_secs(SystemTime::now()) + 600;

        limiter
            .update("/1.1/search/tweets.json", &headers("180", "5", &future_reset.to_string()))
            .await;
        assert!(limiter.pending_wait("/1.1/search/tweets.json").await.is_none());

        limiter
            .update("/1.1/search/tweets.json", &headers("180", "0", &future_reset.to_string()))
            .await;
        let wait = limiter.pending_wait("/1.1/search/tweets.json").await.unwrap();
        assert!(wait > Duration::from_secs(590));
        assert!(wait <= Duration::from_secs(601));

        assert!(limiter.pending_wait("/1.1/other.json").await.is_none());
    }

    #[tokio::test]
    async fn test_retry_after_defaults() {
        let limiter = RateLimiter::new();
        assert_eq!(limiter.retry_after("/1.1/search/tweets.json").await, DEFAULT_RETRY_AFTER);

        let past_reset = epoch_secs(SystemTime::now()) - 10;
        limiter
            .update("/1.1/search/tweets.json", &headers("180", "0", &past_reset.to_string()))
            .await;
        assert_eq!(limiter.retry_after("/1.1/search/tweets.json").await, RESET_GRACE);
        assert!(limiter.pending_wait("/1.1/search/tweets.json").await.is_none());
    }
}
