//! Memory Layer - In-Memory Storage
//!
//! 内存状态存储，用于测试和不需要落盘的场景

mod state_storage;

pub use state_storage::InMemoryStateStorage;
