//! State Storage Port - 持久化状态的存储抽象
//!
//! 以固定 key 保存整条记录，具体实现在 infrastructure/persistence 层

use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// State Storage Port
///
/// 键值形式的持久化存储，同步调用，在进程重启后保留
pub trait StateStoragePort: Send + Sync {
    /// 读取记录，不存在时返回 None
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 覆盖写入记录
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
