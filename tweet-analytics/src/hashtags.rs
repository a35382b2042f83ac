use tweetpulse_core::PostRecord;

/// Lowercased hashtag texts in post order, then entity order.
///
/// Duplicates are kept so the counter sees real multiplicity. Posts without
/// `entities.hashtags` contribute nothing.
pub fn extract_hashtags(posts: &[PostRecord]) -> Vec<String> {
    posts
        .iter()
        .flat_map(PostRecord::hashtags)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts(values: Vec<serde_json::Value>) -> Vec<PostRecord> {
        values.into_iter().map(PostRecord::from).collect()
    }

    #[test]
    fn test_extract_preserves_order_and_folds_case() {
        let posts = posts(vec![
            json!({"entities": {"hashtags": [{"text": "Eskom"}]}}),
            json!({}),
            json!({"entities": {"hashtags": [{"text": "JoburgWater"}, {"text": "eskom"}]}}),
        ]);

        assert_eq!(
            extract_hashtags(&posts),
            vec!["eskom", "joburgwater", "eskom"]
        );
    }

    #[test]
    fn test_posts_with_partial_entities_are_skipped() {
        let posts = posts(vec![
            json!({"entities": {}}),
            json!({"entities": {"urls": [], "hashtags": []}}),
            json!({"entities": null}),
            json!({"full_text": "#NotAnEntity"}),
            json!({"entities": {"hashtags": [{"text": "CityPower", "indices": [0, 10]}]}}),
        ]);

        assert_eq!(extract_hashtags(&posts), vec!["citypower"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_hashtags(&[]).is_empty());
    }
}
