//! Snapshot writer

use crate::core::settings::to_pretty_json;
use crate::core::models::OutputDocument;
use crate::error::ScrapeError;
use crate::utils::snapshot_file_name;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Writes [`OutputDocument`]s as `channel_<handle>.json` under one directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    data_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path the snapshot for `handle` is written to
    pub fn output_path(&self, handle: &str) -> Result<PathBuf, ScrapeError> {
        Ok(self.data_dir.join(snapshot_file_name(handle)?))
    }

    /// Write `document`, replacing any previous snapshot for the handle.
    ///
    /// The file is written next to its target and renamed into place, so a
    /// failed write never leaves a truncated snapshot behind.
    pub async fn write(
        &self,
        handle: &str,
        document: &OutputDocument,
    ) -> Result<PathBuf, ScrapeError> {
        let output_path = self.output_path(handle)?;
        let bytes = to_pretty_json(document)?;

        tokio::fs::create_dir_all(&self.data_dir).await?;

        let tmp_path = output_path.with_extension("json.tmp");
        let result = match write_file(&tmp_path, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &output_path).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(
                    "Wrote {} videos ({} bytes) to {}",
                    document.total_videos,
                    bytes.len(),
                    output_path.display()
                );
                Ok(output_path)
            }
            Err(e) => {
                warn!("Writing snapshot failed: {}, cleaning up temp file", e);
                let _ = tokio::fs::remove_file(&tmp_path).await;
                Err(e.into())
            }
        }
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await
}
