//! Bootstrap - 日志初始化与组件装配
//!
//! 由配置构建 StoryStore、AiGateway 及其依赖，
//! 再按需创建侧边栏与编辑器

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::{
    AiGateway, ApplicationError, ChapterEditor, ChapterEditorConfig, StateStoragePort,
    StorySidebar, StoryStore, TextGenerationPort,
};
use crate::config::{AppConfig, LogConfig};
use crate::infrastructure::adapters::{GeminiClient, GeminiClientConfig};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::persistence::{SledStateStorage, SledStorageConfig};

/// 初始化日志（RUST_LOG 优先）
pub fn init_tracing(config: &LogConfig) -> Result<(), ApplicationError> {
    let log_filter = format!("{},story_maker={}", config.level, config.level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .try_init()
        .map_err(|e| ApplicationError::internal(format!("Failed to init tracing: {}", e)))
}

/// 应用上下文
pub struct AppContext {
    config: AppConfig,
    publisher: Arc<EventPublisher>,
    store: Arc<StoryStore>,
    gateway: Arc<AiGateway>,
}

impl AppContext {
    /// 使用 sled 存储与 Gemini 客户端构建
    pub async fn build(config: &AppConfig) -> Result<Self, ApplicationError> {
        if let Some(parent) = config.storage.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let storage = SledStateStorage::new(&SledStorageConfig {
            db_path: config.storage.path.to_string_lossy().to_string(),
            flush_on_save: true,
        })?;

        if !config.ai.has_api_key() {
            tracing::warn!("AI API key is not configured, generation requests will fail");
        }

        let generator = GeminiClient::new(
            GeminiClientConfig::new(config.ai.api_key.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout_secs),
        )?;

        Ok(Self::with_ports(
            storage.arc(),
            Arc::new(generator),
            config.clone(),
        ))
    }

    /// 使用给定端口实现构建
    pub fn with_ports(
        storage: Arc<dyn StateStoragePort>,
        generator: Arc<dyn TextGenerationPort>,
        config: AppConfig,
    ) -> Self {
        let publisher = EventPublisher::new().arc();
        let store = StoryStore::load(storage, config.storage.key.clone(), publisher.clone()).arc();
        let gateway = Arc::new(AiGateway::new(generator, config.ai.model.clone()));

        tracing::info!(
            model = %config.ai.model,
            stale_results = ?config.editor.stale_results,
            "AppContext ready"
        );

        Self {
            config,
            publisher,
            store,
            gateway,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn publisher(&self) -> Arc<EventPublisher> {
        self.publisher.clone()
    }

    pub fn store(&self) -> Arc<StoryStore> {
        self.store.clone()
    }

    pub fn gateway(&self) -> Arc<AiGateway> {
        self.gateway.clone()
    }

    pub fn sidebar(&self) -> StorySidebar {
        StorySidebar::new(self.store.clone())
    }

    /// 创建编辑器，语言取配置中的默认值
    pub fn editor(&self) -> ChapterEditor {
        ChapterEditor::new(
            self.store.clone(),
            self.gateway.clone(),
            self.publisher.clone(),
            ChapterEditorConfig {
                language: self.config.editor.default_language.clone(),
                stale_results: self.config.editor.stale_results,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ActionOutcome, STORAGE_KEY};
    use crate::infrastructure::adapters::FakeGenerationClient;
    use crate::infrastructure::memory::InMemoryStateStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_context_wires_sidebar_and_editor() {
        let storage = InMemoryStateStorage::new().arc();
        let client = Arc::new(FakeGenerationClient::new());
        client.push_reply("Once upon a time");

        let mut config = AppConfig::default();
        config.editor.default_language = "Italian".to_string();
        let context = AppContext::with_ports(storage.clone(), client.clone(), config);

        let sidebar = context.sidebar();
        let story_id = sidebar.add_story("Book").unwrap();
        sidebar.select_story(story_id);
        let chapter_id = sidebar.add_chapter("Ch1").unwrap();
        sidebar.select_chapter(chapter_id);

        let editor = context.editor();
        assert_eq!(editor.language(), "Italian");

        let outcome = editor.generate_chapter("a beginning").await.unwrap();
        assert_eq!(outcome, ActionOutcome::Applied { request_id: 1 });

        let chapter = context.store().current_chapter().unwrap();
        assert_eq!(chapter.content(), "Once upon a time");
        assert_eq!(client.requests()[0].model, "gemini-1.5-flash");
        assert!(storage.load(STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_build_creates_storage_directory() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.path = dir.path().join("nested").join("state.sled");

        let context = AppContext::build(&config).await.unwrap();
        let story_id = context.sidebar().add_story("Persisted").unwrap();

        assert!(dir.path().join("nested").is_dir());
        assert_eq!(context.store().story(story_id).unwrap().title(), "Persisted");
    }
}
