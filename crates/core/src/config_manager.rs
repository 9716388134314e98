//! Session Configuration Stores
//!
//! The lifecycle manager hands each placed call's [`SessionConfig`] to a
//! [`ConfigManager`]; the real-time conversation pipeline later reads it back by
//! conversation id when the provider connects the media stream.

use crate::error::PersistenceError;
use crate::session::SessionConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Defines the contract for any store that keeps session configurations.
///
/// Implementations are shared between concurrent calls and must be safe for
/// concurrent use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigManager: Send + Sync {
    /// Stores `config` under `conversation_id`, replacing any previous value.
    async fn save_config(
        &self,
        conversation_id: &str,
        config: &SessionConfig,
    ) -> Result<(), PersistenceError>;

    /// Returns the config stored under `conversation_id`, if any.
    async fn get_config(
        &self,
        conversation_id: &str,
    ) -> Result<Option<SessionConfig>, PersistenceError>;

    /// Removes the config stored under `conversation_id`. Missing keys are not an error.
    async fn delete_config(&self, conversation_id: &str) -> Result<(), PersistenceError>;
}

/// A process-local store, useful for tests and single-process deployments.
#[derive(Clone, Default)]
pub struct InMemoryConfigManager {
    configs: Arc<Mutex<HashMap<String, SessionConfig>>>,
}

impl InMemoryConfigManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigManager for InMemoryConfigManager {
    async fn save_config(
        &self,
        conversation_id: &str,
        config: &SessionConfig,
    ) -> Result<(), PersistenceError> {
        debug!(%conversation_id, "Saving session config in memory");
        self.configs
            .lock()
            .await
            .insert(conversation_id.to_string(), config.clone());
        Ok(())
    }

    async fn get_config(
        &self,
        conversation_id: &str,
    ) -> Result<Option<SessionConfig>, PersistenceError> {
        Ok(self.configs.lock().await.get(conversation_id).cloned())
    }

    async fn delete_config(&self, conversation_id: &str) -> Result<(), PersistenceError> {
        self.configs.lock().await.remove(conversation_id);
        Ok(())
    }
}

/// Keeps one pretty-printed JSON file per conversation in a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileConfigManager {
    dir: PathBuf,
}

impl FileConfigManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, conversation_id: &str) -> Result<PathBuf, PersistenceError> {
        let is_plain_name = !conversation_id.is_empty()
            && conversation_id != "."
            && conversation_id != ".."
            && !conversation_id.contains(['/', '\\', '\0']);
        if !is_plain_name {
            return Err(PersistenceError::InvalidKey(conversation_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", conversation_id)))
    }
}

#[async_trait]
impl ConfigManager for FileConfigManager {
    async fn save_config(
        &self,
        conversation_id: &str,
        config: &SessionConfig,
    ) -> Result<(), PersistenceError> {
        let path = self.path_for(conversation_id)?;
        let body = serde_json::to_vec_pretty(config)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, body).await?;
        debug!(%conversation_id, path = %path.display(), "Saved session config");
        Ok(())
    }

    async fn get_config(
        &self,
        conversation_id: &str,
    ) -> Result<Option<SessionConfig>, PersistenceError> {
        let path = self.path_for(conversation_id)?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Some(serde_json::from_slice(&body)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_config(&self, conversation_id: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(conversation_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
