use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tweetpulse_core::{CoreError, PostRecord, StorageError};

mod tests;

/// A single JSON document holding the raw collected tweets.
///
/// Each `save` replaces the whole document; there is no append or merge.
#[derive(Debug, Clone)]
pub struct TweetStore {
    path: PathBuf,
}

impl TweetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `posts` as a top-level array, pretty-printed with 4-space indentation.
    ///
    /// Creates the parent directory if it does not exist yet.
    pub async fn save(&self, posts: &[PostRecord]) -> Result<(), CoreError> {
        self.ensure_parent_dir().await?;

        let document = encode_pretty(posts)?;
        tokio::fs::write(&self.path, document)
            .await
            .map_err(|source| StorageError::Write {
                path: self.display_path(),
                source,
            })?;

        info!("Saved {} tweets to {}", posts.len(), self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> Result<Vec<PostRecord>, CoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.display_path(),
                source,
            })?;

        let posts: Vec<PostRecord> =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
                path: self.display_path(),
                source,
            })?;

        debug!("Loaded {} tweets from {}", posts.len(), self.path.display());
        Ok(posts)
    }

    async fn ensure_parent_dir(&self) -> Result<(), CoreError> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StorageError::CreateDirectory {
                path: parent.display().to_string(),
                source,
            })?;
        Ok(())
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
