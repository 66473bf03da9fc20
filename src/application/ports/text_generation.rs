//! Text Generation Port - 外部文本生成服务抽象
//!
//! 一次调用：提示词 + 模型 → 文本，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// 生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// 完整提示词
    pub prompt: String,
    /// 模型标识
    pub model: String,
}

/// 生成响应
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// 原始响应文本
    pub text: String,
    /// 实际使用的模型
    pub model: String,
    /// 结束原因（如 STOP、MAX_TOKENS）
    pub finish_reason: Option<String>,
}

/// Text Generation Port
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// 根据提示词生成文本
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
