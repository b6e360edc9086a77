//! Filesystem-backed credential store.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::{Result, SessionError};
use crate::providers::CredentialStore;
use crate::state::TokenPair;

/// File name of the single persisted credential object.
const CREDENTIAL_FILE: &str = "auth_token.json";

/// Credential store persisting one JSON credential file under a fixed name.
///
/// The localStorage analogue for a native client: one token pair under a
/// fixed key. A missing or unparseable file reads as "logged out"; an
/// unparseable file is additionally removed so the broken state does not
/// stick around.
#[derive(Debug, Clone)]
pub struct FsCredentialStore {
    path: PathBuf,
}

impl FsCredentialStore {
    /// Create a store keeping its credential file in `dir`.
    ///
    /// The directory is expected to exist (it is the application's state
    /// directory, created at startup).
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIAL_FILE),
        }
    }

    /// Path of the credential file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FsCredentialStore {
    fn load(&self) -> impl Future<Output = Result<Option<TokenPair>>> + Send {
        let path = self.path.clone();

        async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(SessionError::Storage(e.to_string())),
            };

            match serde_json::from_slice::<TokenPair>(&bytes) {
                Ok(tokens) => Ok(Some(tokens)),
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "Discarding unparseable credential file");
                    let _ = tokio::fs::remove_file(&path).await;
                    Ok(None)
                },
            }
        }
    }

    fn save(&self, credential: &TokenPair) -> impl Future<Output = Result<()>> + Send {
        let path = self.path.clone();
        let credential = credential.clone();

        async move {
            let json = serde_json::to_vec(&credential)
                .map_err(|e| SessionError::Storage(e.to_string()))?;

            tokio::fs::write(&path, json)
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))
        }
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        let path = self.path.clone();

        async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Storage(e.to_string())),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens() -> TokenPair {
        TokenPair {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
        }
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCredentialStore::new(dir.path());

        store.save(&tokens()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(tokens()));
    }

    #[tokio::test]
    async fn missing_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCredentialStore::new(dir.path());

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCredentialStore::new(dir.path());

        tokio::fs::write(store.path(), b"not json")
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        // The broken file is gone
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn clear_removes_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCredentialStore::new(dir.path());

        store.save(&tokens()).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);

        // Clearing again is fine
        store.clear().await.unwrap();
    }
}
