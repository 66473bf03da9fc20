//! Sled-based State Storage Implementation

use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{StateStoragePort, StorageError};

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStorageConfig {
    /// 数据库路径
    pub db_path: String,
    /// 每次写入后是否立即 flush 到磁盘
    pub flush_on_save: bool,
}

impl Default for SledStorageConfig {
    fn default() -> Self {
        Self {
            db_path: "data/story-maker.sled".to_string(),
            flush_on_save: true,
        }
    }
}

/// Sled 状态存储
pub struct SledStateStorage {
    db: Db,
    flush_on_save: bool,
}

impl SledStateStorage {
    /// 打开（或创建）存储
    pub fn new(config: &SledStorageConfig) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            recovered = db.was_recovered(),
            "SledStateStorage initialized"
        );

        Ok(Self {
            db,
            flush_on_save: config.flush_on_save,
        })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let config = SledStorageConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl StateStoragePort for SledStateStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.db
            .get(key)
            .map(|value| value.map(|v| v.to_vec()))
            .map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.db
            .insert(key, value)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        if self.flush_on_save {
            self.flush()?;
        }

        tracing::debug!(key = %key, size_bytes = value.len(), "State record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_loads_none() {
        let dir = tempdir().unwrap();
        let storage = SledStateStorage::open(dir.path().join("state.sled")).unwrap();

        assert!(storage.load("story-maker-storage").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let storage = SledStateStorage::open(dir.path().join("state.sled")).unwrap();

        storage.save("story-maker-storage", b"{\"version\":0}").unwrap();
        storage.save("story-maker-storage", b"{\"version\":1}").unwrap();
        storage.flush().unwrap();

        let value = storage.load("story-maker-storage").unwrap();
        assert_eq!(value.as_deref(), Some(&b"{\"version\":1}"[..]));
        assert!(storage.load("other-key").unwrap().is_none());
    }
}
