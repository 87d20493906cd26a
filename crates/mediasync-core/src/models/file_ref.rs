use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reference to a remote object, as delivered by the storage event feed.
///
/// A `FileRef` is created at ingestion and consumed by exactly one
/// processing lane; everything else about the object (origin URL, public
/// URL, local destination) is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub region: String,
    pub bucket: String,
    /// Slash-delimited relative path inside the bucket, may contain
    /// subdirectories.
    pub key: String,
}

impl FileRef {
    /// Origin URL the object bytes are fetched from.
    pub fn source_url(&self) -> String {
        format!(
            "https://s3-{}.amazonaws.com/{}/{}",
            self.region, self.bucket, self.key
        )
    }

    /// Public URL embedded in the cache paths handed to the image cache.
    pub fn public_url(&self) -> String {
        format!("https://{}/{}", self.bucket, self.key)
    }

    /// Destination path under the local mirror directory.
    pub fn local_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.key)
    }
}
