#[cfg(test)]
mod tests {
    use crate::TweetStore;
    use serde_json::json;
    use std::env;
    use std::path::PathBuf;
    use tweetpulse_core::{CoreError, PostRecord, StorageError};

    fn scratch_dir() -> PathBuf {
        env::temp_dir().join(format!("test_tweetpulse_{}", uuid::Uuid::new_v4()))
    }

    fn sample_posts() -> Vec<PostRecord> {
        vec![
            json!({"id": 1, "full_text": "No water in Soweto #JoburgWater"}).into(),
            json!({"id": 2, "entities": {"hashtags": [{"text": "Eskom"}]}}).into(),
        ]
    }

    #[tokio::test]
    async fn test_save_creates_missing_directories() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("tweets.json");
        let store = TweetStore::new(&path);

        store.save(&sample_posts()).await.expect("save should succeed");
        assert!(path.exists());

        // A second save into the existing directory is fine.
        store.save(&sample_posts()).await.expect("save should be idempotent");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_records() {
        let dir = scratch_dir();
        let store = TweetStore::new(dir.join("tweets.json"));

        let posts = sample_posts();
        store.save(&posts).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, posts);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_document_uses_four_space_indent() {
        let dir = scratch_dir();
        let path = dir.join("tweets.json");
        let store = TweetStore::new(&path);

        store
            .save(&[json!({"id": 1}).into()])
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n    {\n        \"id\": 1\n    }\n]");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_document() {
        let dir = scratch_dir();
        let store = TweetStore::new(dir.join("tweets.json"));

        store.save(&sample_posts()).await.unwrap();
        store.save(&[json!({"id": 3}).into()]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), Some(3));

        store.save(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let store = TweetStore::new(scratch_dir().join("tweets.json"));
        let result = store.load().await;
        assert!(matches!(
            result,
            Err(CoreError::Storage(StorageError::Read { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_non_array_document() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tweets.json");
        std::fs::write(&path, "{\"statuses\": []}").unwrap();

        let result = TweetStore::new(&path).load().await;
        assert!(matches!(
            result,
            Err(CoreError::Storage(StorageError::Malformed { .. }))
        ));

        let _ = std::fs::remove_dir_all(dir);
    }
}
