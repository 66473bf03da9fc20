//! 应用层错误定义
//!
//! 装配与启动阶段的错误类型；编辑操作的错误见 EditorError

use thiserror::Error;

use crate::application::ports::{GenerationError, StorageError};
use crate::config::ConfigError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Configuration(message) => Self::ConfigurationError(message),
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(err: ConfigError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}
