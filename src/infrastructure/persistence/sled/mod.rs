//! Sled Persistence - 嵌入式键值存储实现

mod state_storage;

pub use state_storage::{SledStateStorage, SledStorageConfig};
