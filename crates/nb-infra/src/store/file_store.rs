use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use nb_core::errors::StorageError;
use nb_core::notice::Notice;
use nb_core::ports::LocalStorePort;
use tokio::fs;
use tracing::warn;

/// Well-known file name for the persisted notice collection.
pub const DEFAULT_FILE_NAME: &str = "shared_notices.json";

/// File-backed [`LocalStorePort`]: one JSON array under a well-known
/// path, replaced atomically on every save.
pub struct FileNoticeStore {
    path: PathBuf,
}

impl FileNoticeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in `dir` using the well-known file name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create notice store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write through a temp file and rename, so the target is either the
    /// previous document or the fully written new one.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp notice file failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp notice file to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl LocalStorePort for FileNoticeStore {
    async fn load(&self) -> Vec<Notice> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "notice store unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(notices) => notices,
            Err(e) => {
                // Corrupt payloads fail closed rather than bricking start-up.
                warn!(path = %self.path.display(), error = %e, "notice store corrupt, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, notices: &[Notice]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(notices)
            .map_err(|e| StorageError(format!("serialize notices failed: {e}")))?;

        self.atomic_write(&content)
            .await
            .map_err(|e| StorageError(e.to_string()))
    }
}
