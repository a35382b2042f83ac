pub mod api;
pub mod auth;
pub mod metrics;
pub mod rate_limiter;

pub use api::{TwitterApiClient, MAX_SEARCH_PAGE_SIZE, SEARCH_TWEETS_ENDPOINT};
pub use auth::OAuth1Signer;

use tracing::debug;
use tweetpulse_core::{CoreError, PageSource, PostRecord, SearchParams};

/// Walks `search/tweets` backwards through time with `max_id`, stopping after
/// `limit` tweets or the first empty page.
pub struct SearchCursor<'a> {
    client: &'a TwitterApiClient,
    params: SearchParams,
    remaining: usize,
    max_id: Option<u64>,
    exhausted: bool,
}

impl TwitterApiClient {
    pub fn search(&self, params: SearchParams, limit: usize) -> SearchCursor<'_> {
        SearchCursor {
            client: self,
            params,
            remaining: limit,
            max_id: None,
            exhausted: false,
        }
    }
}

impl PageSource for SearchCursor<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<PostRecord>>, CoreError> {
        if self.exhausted || self.remaining == 0 {
            return Ok(None);
        }

        let count = self.remaining.min(MAX_SEARCH_PAGE_SIZE);
        let page = self
            .client
            .search_tweets(&self.params, count, self.max_id)
            .await?;

        let posts: Vec<PostRecord> = page.statuses.into_iter().map(PostRecord::from).collect();
        if posts.is_empty() {
            debug!("Search exhausted");
            self.exhausted = true;
            return Ok(None);
        }

        // Without ids there is no way to ask for the next page.
        match posts.iter().filter_map(PostRecord::id).min() {
            Some(lowest) if lowest > 0 => self.max_id = Some(lowest - 1),
            _ => self.exhausted = true,
        }
        self.remaining = self.remaining.saturating_sub(posts.len());

        Ok(Some(posts))
    }
}
