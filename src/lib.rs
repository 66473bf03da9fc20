//! Story Maker - 故事写作助手核心
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事、章节与当前选择
//! - Generation Context: 提示词模板与响应解析
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StateStorage, TextGeneration）
//! - StoryStore: 持久化状态容器
//! - AiGateway: 文本变换与章节生成
//! - StorySidebar / ChapterEditor: 编辑界面意图
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: Sled 状态存储
//! - Memory: 内存状态存储
//! - Adapters: Gemini Client, Fake Client
//! - Events: 状态变更与编辑器提示广播

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use bootstrap::{init_tracing, AppContext};
pub use config::{load_config, AppConfig};
