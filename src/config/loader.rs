//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::generation::DEFAULT_LANGUAGE;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STORY_MAKER_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STORY_MAKER_STORAGE__PATH=/data/story-maker.sled`
/// - `STORY_MAKER_AI__API_KEY=...`
/// - `STORY_MAKER_AI__MODEL=gemini-1.5-pro`
/// - `STORY_MAKER_EDITOR__STALE_RESULTS=discard_if_deselected`
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载的配置
/// - `Err(ConfigError)` - 加载失败
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("storage.path", "data/story-maker.sled")?
        .set_default("storage.key", "story-maker-storage")?
        .set_default("ai.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("ai.model", "gemini-1.5-flash")?
        .set_default("ai.api_key", "")?
        .set_default("ai.timeout_secs", 120)?
        .set_default("editor.default_language", DEFAULT_LANGUAGE)?
        .set_default("editor.stale_results", "apply")?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("STORY_MAKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.storage.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage path cannot be empty".to_string(),
        ));
    }

    if config.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage key cannot be empty".to_string(),
        ));
    }

    if config.ai.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "AI base URL cannot be empty".to_string(),
        ));
    }

    if config.ai.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "AI model cannot be empty".to_string(),
        ));
    }

    if config.ai.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "AI timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出 API Key
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Storage Path: {:?}", config.storage.path);
    tracing::info!("Storage Key: {}", config.storage.key);
    tracing::info!("AI Base URL: {}", config.ai.base_url);
    tracing::info!("AI Model: {}", config.ai.model);
    tracing::info!("AI Timeout: {}s", config.ai.timeout_secs);
    tracing::info!("AI Key Configured: {}", config.ai.has_api_key());
    tracing::info!("Default Language: {}", config.editor.default_language);
    tracing::info!("Stale Results: {:?}", config.editor.stale_results);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
