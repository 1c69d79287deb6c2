use std::path::PathBuf;

use nb_core::session::ClientId;
use tokio::fs;
use tracing::warn;

/// Well-known file name for the session's client identifier, kept
/// separate from the notice document.
pub const DEFAULT_SESSION_FILE: &str = "notice_client_id";

/// Persists the session-scoped client identifier under its own key.
///
/// A fresh identifier is generated on first use; losing the file only
/// costs attribution continuity, so write failures are logged and
/// tolerated.
pub struct SessionFileStore {
    path: PathBuf,
}

impl SessionFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load_or_generate(&self) -> ClientId {
        match fs::read_to_string(&self.path).await {
            Ok(content) if !content.trim().is_empty() => {
                ClientId::from(content.trim().to_string())
            }
            _ => {
                let id = ClientId::generate();
                if let Some(dir) = self.path.parent() {
                    if let Err(e) = fs::create_dir_all(dir).await {
                        warn!(error = %e, "create session dir failed");
                    }
                }
                if let Err(e) = fs::write(&self.path, id.as_str()).await {
                    warn!(path = %self.path.display(), error = %e, "persist client id failed");
                }
                id
            }
        }
    }
}
