use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::cache::token::CachedToken;
use crate::errors::RelayError;
use crate::helpers::time::now_millis;

// distinguishes temp files of concurrent writers within one process
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Single-record token cache backed by a JSON file.
///
/// There is no locking: concurrent requests that miss at the same time will
/// each issue a token and the last rename wins. Both tokens are valid, so the
/// only cost is a redundant issuance.
#[derive(Debug, Clone)]
pub struct TokenFileCache {
    path: PathBuf,
}

impl TokenFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cached access token if the record exists, is complete and
    /// has not expired. Any read or decode problem is a miss.
    pub async fn load(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("token file '{}' not found", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("token file '{}' unreadable: {}", self.path.display(), e);
                return None;
            }
        };

        let record: CachedToken = serde_json::from_str(&content)
            .inspect_err(|e| warn!("token file '{}' malformed: {}", self.path.display(), e))
            .ok()?;

        if record.is_valid_at(now_millis()) {
            Some(record.access_token)
        } else {
            debug!("cached token expired or incomplete");
            None
        }
    }

    /// Overwrites the record. The content is written to a sibling temp file
    /// and renamed over the target so readers never observe a partial write.
    pub async fn save(&self, access_token: &str, expires_at: i64) -> Result<(), RelayError> {
        let record = CachedToken::new(access_token.to_owned(), expires_at);
        let content = serde_json::to_vec(&record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &content).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!("token stored at '{}', expires_at {}", self.path.display(), expires_at);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "token".to_owned());
        self.path
            .with_file_name(format!(".{}.{}.{}.tmp", file_name, std::process::id(), seq))
    }
}
