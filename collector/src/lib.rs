pub mod pipeline;

pub use pipeline::{Pipeline, PipelineSummary};

use tracing::{debug, info};
use tweet_store::TweetStore;
use tweetpulse_core::{CoreError, PageSource, PostRecord};

/// Number of tweets a pipeline run collects.
pub const DEFAULT_TARGET_COUNT: usize = 100;

/// Pulls pages from a source until `target` records are held or the source runs dry.
pub struct Collector {
    target: usize,
}

impl Collector {
    pub fn new(target: usize) -> Self {
        Self { target }
    }

    /// Accumulate records in retrieval order. A page that overshoots the target
    /// is cut so exactly `target` records come back.
    pub async fn collect<S: PageSource>(&self, source: &mut S) -> Result<Vec<PostRecord>, CoreError> {
        let mut posts = Vec::with_capacity(self.target);

        while posts.len() < self.target {
            let page = match source.next_page().await? {
                Some(page) if !page.is_empty() => page,
                _ => {
                    debug!("Source exhausted after {} posts", posts.len());
                    break;
                }
            };

            let wanted = self.target - posts.len();
            debug!("Received page of {} posts ({} still wanted)", page.len(), wanted);
            posts.extend(page.into_iter().take(wanted));
        }

        Ok(posts)
    }

    /// Collect everything, then replace the store's document with it.
    ///
    /// Nothing is written if the source fails part way: the records gathered
    /// before the error are dropped along with it.
    pub async fn collect_and_store<S: PageSource>(
        &self,
        source: &mut S,
        store: &TweetStore,
    ) -> Result<usize, CoreError> {
        let posts = self.collect(source).await?;
        store.save(&posts).await?;

        info!(
            "Collected {} tweets and saved to {}",
            posts.len(),
            store.path().display()
        );
        Ok(posts.len())
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_COUNT)
    }
}
