//! In-Memory State Storage Implementation

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{StateStoragePort, StorageError};

/// 内存状态存储
///
/// 进程退出即丢失，用于测试和临时会话
pub struct InMemoryStateStorage {
    records: DashMap<String, Vec<u8>>,
    save_count: AtomicU64,
    fail_writes: AtomicBool,
}

impl InMemoryStateStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            save_count: AtomicU64::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 预置一条记录
    pub fn with_record(self, key: &str, value: impl Into<Vec<u8>>) -> Self {
        self.records.insert(key.to_string(), value.into());
        self
    }

    /// 成功写入的次数
    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// 模拟写入失败（例如配额耗尽）
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl Default for InMemoryStateStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStoragePort for InMemoryStateStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.records.get(key).map(|v| v.clone()))
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.records.insert(key.to_string(), value.to_vec());
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
