//! Output directory layout and commit of qualifying images.

use crate::error::Result;
use chrono::Local;
use imgscout_core::DownloadRequest;
use std::path::{Path, PathBuf};

/// Commits qualifying images under `{output_root}/{query_with_underscores}/`.
///
/// The filesystem tree is the only persisted state; there is no index.
pub struct ImageStore {
    output_root: PathBuf,
}

impl ImageStore {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Per-query directory for a request.
    #[must_use]
    pub fn search_dir(&self, request: &DownloadRequest) -> PathBuf {
        self.output_root.join(request.dir_name())
    }

    /// Create the per-query directory.
    pub async fn prepare(&self, request: &DownloadRequest) -> Result<PathBuf> {
        let dir = self.search_dir(request);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Move a verified temp file into the output tree.
    ///
    /// Names the file `{query}_{HHMMSS}_{seq}.jpg` with a 1-based sequence
    /// number. Temp dirs usually live on another filesystem, so a failed
    /// rename falls back to copy + remove.
    pub async fn commit(
        &self,
        temp_path: &Path,
        request: &DownloadRequest,
        sequence: usize,
    ) -> Result<PathBuf> {
        let dir = self.search_dir(request);
        tokio::fs::create_dir_all(&dir).await?;

        let timestamp = Local::now().format("%H%M%S");
        let filename = format!("{}_{}_{}.jpg", request.dir_name(), timestamp, sequence);
        let dest = dir.join(filename);

        if tokio::fs::rename(temp_path, &dest).await.is_err() {
            tokio::fs::copy(temp_path, &dest).await?;
            let _ = tokio::fs::remove_file(temp_path).await;
        }

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgscout_core::ImageType;
    use tempfile::TempDir;

    fn request() -> DownloadRequest {
        DownloadRequest::new("mountain lake", 3, 0, ImageType::Photo).expect("valid request")
    }

    #[tokio::test]
    async fn test_search_dir_layout() {
        let store = ImageStore::new("/srv/images");
        assert_eq!(
            store.search_dir(&request()),
            PathBuf::from("/srv/images/mountain_lake")
        );
    }

    #[tokio::test]
    async fn test_commit_moves_and_names() {
        let root = TempDir::new().expect("output root");
        let scratch = TempDir::new().expect("scratch dir");
        let temp_file = scratch.path().join("image.jpg");
        tokio::fs::write(&temp_file, b"jpeg bytes").await.expect("write temp");

        let store = ImageStore::new(root.path());
        let dest = store
            .commit(&temp_file, &request(), 1)
            .await
            .expect("commit");

        assert!(dest.exists());
        assert!(!temp_file.exists());
        assert!(dest.starts_with(root.path().join("mountain_lake")));

        let name = dest.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("mountain_lake_"));
        assert!(name.ends_with("_1.jpg"));
        // mountain_lake_HHMMSS_1.jpg
        let stamp = name
            .trim_start_matches("mountain_lake_")
            .trim_end_matches("_1.jpg");
        assert_eq!(stamp.len(), 6);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_commit_sequence_numbers() {
        let root = TempDir::new().expect("output root");
        let scratch = TempDir::new().expect("scratch dir");
        let store = ImageStore::new(root.path());

        for seq in 1..=3 {
            let temp_file = scratch.path().join("image.jpg");
            tokio::fs::write(&temp_file, b"x").await.expect("write temp");
            let dest = store
                .commit(&temp_file, &request(), seq)
                .await
                .expect("commit");
            assert!(dest
                .file_name()
                .unwrap()
                .to_string_lossy()
                .ends_with(&format!("_{seq}.jpg")));
        }
    }
}
