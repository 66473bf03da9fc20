//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::StaleResultPolicy;
use crate::domain::generation::DEFAULT_LANGUAGE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 状态存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 文本生成服务配置
    #[serde(default)]
    pub ai: AiConfig,

    /// 编辑器配置
    #[serde(default)]
    pub editor: EditorConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 状态存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// sled 数据目录
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// 持久化记录的 key
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/story-maker.sled")
}

fn default_storage_key() -> String {
    "story-maker-storage".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// 文本生成服务配置
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// API 基础 URL
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    /// 模型标识
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// API Key，为空时生成请求直接失败
    #[serde(default)]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ai_timeout() -> u64 {
    120
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            api_key: String::new(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 编辑器配置
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// 新编辑器的默认写作语言
    #[serde(default = "default_language")]
    pub default_language: String,

    /// 切换章节后迟到的 AI 结果如何处理
    /// 可选: apply, discard_if_deselected
    #[serde(default)]
    pub stale_results: StaleResultPolicy,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            stale_results: StaleResultPolicy::default(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.path, PathBuf::from("data/story-maker.sled"));
        assert_eq!(config.storage.key, "story-maker-storage");
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.ai.timeout_secs, 120);
        assert!(!config.ai.has_api_key());
        assert_eq!(config.editor.default_language, "English");
        assert_eq!(config.editor.stale_results, StaleResultPolicy::Apply);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_ai_config_debug_hides_key() {
        let config = AiConfig {
            api_key: "AIza-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("AIza-secret"));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"editor": {"stale_results": "discard_if_deselected"}, "ai": {"model": "gemini-pro"}}"#,
        )
        .unwrap();

        assert_eq!(config.editor.stale_results, StaleResultPolicy::DiscardIfDeselected);
        assert_eq!(config.editor.default_language, "English");
        assert_eq!(config.ai.model, "gemini-pro");
        assert_eq!(config.ai.base_url, "https://generativelanguage.googleapis.com");
    }
}
