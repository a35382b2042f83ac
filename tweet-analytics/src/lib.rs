pub mod cleaner;
pub mod frequency;
pub mod hashtags;

pub use cleaner::clean_text;
pub use frequency::{FrequencyTable, DEFAULT_TOP_K};
pub use hashtags::extract_hashtags;

use tweetpulse_core::PostRecord;

/// Cleaned `full_text` of every post that has one, in post order.
pub fn clean_posts(posts: &[PostRecord]) -> Vec<String> {
    let cleaned: Vec<String> = posts
        .iter()
        .filter_map(PostRecord::full_text)
        .map(clean_text)
        .collect();

    tracing::debug!(
        "Cleaned {} of {} posts ({} without full_text)",
        cleaned.len(),
        posts.len(),
        posts.len() - cleaned.len()
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_posts_skips_posts_without_body() {
        let posts: Vec<PostRecord> = vec![
            json!({"text": "truncated only"}).into(),
            json!({"full_text": "Power is OUT again in #Soweto @Eskom_SA https://t.co/x"}).into(),
            json!({"full_text": 12}).into(),
            json!({"full_text": ""}).into(),
        ];

        assert_eq!(
            clean_posts(&posts),
            vec!["power is out again in soweto".to_string(), String::new()]
        );
    }
}
