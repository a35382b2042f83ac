use crate::Collector;
use std::path::PathBuf;
use tracing::{debug, info};
use tweet_analytics::{clean_posts, extract_hashtags, FrequencyTable, DEFAULT_TOP_K};
use tweet_store::TweetStore;
use tweetpulse_core::{CoreError, PageSource};

/// What a single collect, store and analyse run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub collected: usize,
    pub data_path: PathBuf,
    pub top_hashtags: Vec<(String, usize)>,
    pub cleaned_texts: Vec<String>,
}

impl PipelineSummary {
    pub fn collected_line(&self) -> String {
        format!(
            "Collected {} tweets and saved to {}",
            self.collected,
            self.data_path.display()
        )
    }

    /// Pairs render as `('tag', count)`, e.g. `[('eskom', 2), ('joburgwater', 1)]`.
    pub fn hashtags_line(&self) -> String {
        let pairs: Vec<String> = self
            .top_hashtags
            .iter()
            .map(|(tag, count)| format!("('{}', {})", tag, count))
            .collect();
        format!("Most common hashtags: [{}]", pairs.join(", "))
    }

    pub fn sample_line(&self) -> String {
        match self.cleaned_texts.first() {
            Some(text) => format!("Sample cleaned tweet: {}", text),
            None => "Sample cleaned tweet: No tweets available".to_string(),
        }
    }
}

pub struct Pipeline {
    collector: Collector,
    store: TweetStore,
}

impl Pipeline {
    pub fn new(collector: Collector, store: TweetStore) -> Self {
        Self { collector, store }
    }

    pub fn store(&self) -> &TweetStore {
        &self.store
    }

    /// Collect into the store, then read the document back and analyse it.
    ///
    /// Analysis always works from what was persisted, not from the in-memory batch.
    pub async fn run<S: PageSource>(&self, source: &mut S) -> Result<PipelineSummary, CoreError> {
        let collected = self.collector.collect_and_store(source, &self.store).await?;

        let posts = self.store.load().await?;
        debug!("Loaded {} posts for analysis", posts.len());

        let hashtags = extract_hashtags(&posts);
        let top_hashtags = FrequencyTable::count(&hashtags).top_k(DEFAULT_TOP_K);
        let cleaned_texts = clean_posts(&posts);

        info!(
            "Analysed {} posts: {} hashtags, {} cleaned texts",
            posts.len(),
            hashtags.len(),
            cleaned_texts.len()
        );

        Ok(PipelineSummary {
            collected,
            data_path: self.store.path().to_path_buf(),
            top_hashtags,
            cleaned_texts,
        })
    }
}
