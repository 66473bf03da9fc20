//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StateStorage、TextGeneration）
//! - store: 持久化状态容器
//! - gateway: AI 文本变换与章节生成
//! - sidebar / editor: 编辑界面意图
//! - error: 应用层错误定义

pub mod editor;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod sidebar;
pub mod store;

pub use editor::{
    ActionOutcome, AiAction, ChapterEditor, ChapterEditorConfig, EditorError, SkipReason,
    StaleResultPolicy, TitleSuggestion, GENERIC_FAILURE_MESSAGE,
};
pub use error::ApplicationError;
pub use gateway::{AiGateway, GatewayError};
pub use ports::{
    GenerationError, GenerationRequest, GenerationResponse, StateStoragePort, StorageError,
    TextGenerationPort,
};
pub use sidebar::StorySidebar;
pub use store::{StoryStore, STORAGE_KEY};
