use crate::auth::OAuth1Signer;
use crate::metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
use crate::rate_limiter::{RateLimitStatus, RateLimiter};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tweetpulse_core::{AppConfig, ConfigError, CoreError, SearchParams, TwitterApiError};
use url::Url;

pub const SEARCH_TWEETS_ENDPOINT: &str = "/1.1/search/tweets.json";

/// Largest `count` the standard search endpoint accepts.
pub const MAX_SEARCH_PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("tweetpulse/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Raw status objects, kept whole.
    pub statuses: Vec<Value>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub count: Option<u32>,
    pub max_id: Option<u64>,
    pub since_id: Option<u64>,
    pub next_results: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug)]
pub struct TwitterApiClient {
    http_client: Client,
    base_url: Url,
    signer: OAuth1Signer,
    rate_limiter: RateLimiter,
    metrics: MetricsCollector,
    wait_on_rate_limit: bool,
}

impl TwitterApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| ConfigError::InvalidValue {
            field: "TWITTER_API_BASE_URL".to_string(),
            value: format!("{} ({})", config.api_base_url, e),
        })?;

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            signer: OAuth1Signer::new(config.credentials.clone()),
            rate_limiter: RateLimiter::new(),
            metrics: MetricsCollector::new(),
            wait_on_rate_limit: config.wait_on_rate_limit,
        })
    }

    /// Signed GET against `endpoint`.
    ///
    /// With `wait_on_rate_limit` set, an exhausted window or a 429 makes this
    /// sleep until the window resets and then try again; otherwise a 429 is
    /// returned as `RateLimitExceeded`.
    pub async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, String)],
    ) -> Result<Response, CoreError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| CoreError::InvalidInput {
                message: format!("Invalid endpoint {}: {}", endpoint, e),
            })?;

        loop {
            if self.wait_on_rate_limit {
                self.rate_limiter.wait_if_exhausted(endpoint).await;
            }

            let authorization =
                self.signer
                    .authorization_header(Method::GET.as_str(), &url, query_params)?;

            info!("Making Twitter API request: GET {}", endpoint);
            let start_time = Instant::now();
            let sent = self
                .http_client
                .get(url.clone())
                .header(reqwest::header::AUTHORIZATION, authorization)
                .query(query_params)
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    error!("Network error for GET {}: {}", endpoint, e);
                    self.record(endpoint, start_time, false, false).await;
                    if e.is_timeout() {
                        return Err(CoreError::TwitterApi(TwitterApiError::RequestTimeout));
                    }
                    return Err(CoreError::Network(e));
                }
            };

            let status = response.status();
            self.rate_limiter.update(endpoint, response.headers()).await;
            self.record(
                endpoint,
                start_time,
                status.is_success(),
                status.as_u16() == 429,
            )
            .await;

            if status.is_success() {
                debug!("Request successful: {} {}", status, endpoint);
                return Ok(response);
            }

            error!("Request failed with status: {} for {}", status, endpoint);
            if status.as_u16() == 429 {
                let retry_after = self.rate_limiter.retry_after(endpoint).await;
                if self.wait_on_rate_limit {
                    warn!("Rate limited, retrying {} after {:?}", endpoint, retry_after);
                    tokio::time::sleep(retry_after).await;
                    continue;
                }
                return Err(CoreError::TwitterApi(TwitterApiError::RateLimitExceeded {
                    retry_after: retry_after.as_secs(),
                }));
            } else if status.as_u16() == 401 {
                return Err(CoreError::TwitterApi(TwitterApiError::InvalidToken));
            } else if status.as_u16() == 403 {
                return Err(CoreError::TwitterApi(TwitterApiError::Forbidden {
                    resource: endpoint.to_string(),
                }));
            } else if status.is_server_error() {
                return Err(CoreError::TwitterApi(TwitterApiError::ServerError {
                    status_code: status.as_u16(),
                }));
            }

            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::TwitterApi(TwitterApiError::InvalidResponse {
                details: format!("HTTP {}: {}", status.as_u16(), body),
            }));
        }
    }

    /// One page of `search/tweets`. `max_id` restricts results to ids at or below it.
    pub async fn search_tweets(
        &self,
        params: &SearchParams,
        count: usize,
        max_id: Option<u64>,
    ) -> Result<SearchResponse, CoreError> {
        let mut query: Vec<(&str, String)> = vec![
            ("q", params.query.clone()),
            ("geocode", params.geocode.to_string()),
            ("lang", params.lang.clone()),
            ("count", count.clamp(1, MAX_SEARCH_PAGE_SIZE).to_string()),
        ];
        if params.extended {
            query.push(("tweet_mode", "extended".to_string()));
        }
        if let Some(max_id) = max_id {
            query.push(("max_id", max_id.to_string()));
        }

        let response = self.make_request(SEARCH_TWEETS_ENDPOINT, &query).await?;

        let page: SearchResponse = response.json().await.map_err(|e| {
            error!("Failed to parse search response: {}", e);
            CoreError::TwitterApi(TwitterApiError::InvalidResponse {
                details: format!("Failed to parse search results: {}", e),
            })
        })?;

        if let Some(meta) = &page.search_metadata {
            debug!(
                "Search metadata: max_id={:?} next_results={:?}",
                meta.max_id, meta.next_results
            );
        }
        info!("Retrieved {} tweets from search", page.statuses.len());
        Ok(page)
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn get_rate_limit_status(&self, endpoint: &str) -> Option<RateLimitStatus> {
        self.rate_limiter.status(endpoint).await
    }

    async fn record(
        &self,
        endpoint: &str,
        start_time: Instant,
        success: bool,
        rate_limited: bool,
    ) {
        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                response_time: start_time.elapsed(),
                success,
                rate_limited,
            })
            .await;
    }
}
