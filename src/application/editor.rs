//! Chapter Editor - 编辑器意图
//!
//! 绑定 StoryStore 与 AiGateway：
//! - 手动编辑直接写入当前章节
//! - AI 操作捕获目标章节，每个编辑器同时只允许一个请求
//! - 结果按 StaleResultPolicy 写回捕获的目标章节

use serde::Deserialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::gateway::{AiGateway, GatewayError};
use crate::application::store::StoryStore;
use crate::domain::generation::{ChapterDetails, DEFAULT_LANGUAGE};
use crate::domain::story::{ChapterId, StoryId};
use crate::infrastructure::events::{EditorNotice, EventPublisher};

/// 错误消息为空时展示的通用提示
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// 请求期间用户切换章节后，结果如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResultPolicy {
    /// 仍写入捕获的目标章节
    #[default]
    Apply,
    /// 目标不再是当前选择时丢弃
    DiscardIfDeselected,
}

/// 编辑器配置
#[derive(Debug, Clone)]
pub struct ChapterEditorConfig {
    pub language: String,
    pub stale_results: StaleResultPolicy,
}

impl Default for ChapterEditorConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            stale_results: StaleResultPolicy::default(),
        }
    }
}

/// 编辑器错误
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("An AI request is already in flight for this editor")]
    Busy,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// 针对当前章节内容的 AI 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Clarify,
    Enrich,
    Polish,
    /// 以当前内容作为结构化提示重写，只保留正文
    Advanced,
}

impl AiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiAction::Clarify => "clarify",
            AiAction::Enrich => "enrich",
            AiAction::Polish => "polish",
            AiAction::Advanced => "advanced",
        }
    }
}

/// 未发起请求的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSelection,
    EmptyContent,
    EmptyPrompt,
    NoSuggestion,
}

/// 编辑器操作结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied { request_id: u64 },
    Discarded { request_id: u64 },
    NotInvoked(SkipReason),
}

/// 待用户确认的标题建议
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSuggestion {
    pub request_id: u64,
    pub story_id: StoryId,
    pub chapter_id: ChapterId,
    pub title: String,
}

/// 进行中标记，离开作用域（含取消）时释放
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// 一次网关调用
enum Call<'a> {
    Clarify(&'a str),
    Enrich(&'a str),
    Polish(&'a str),
    Chapter(&'a str),
    Advanced {
        details_prompt: &'a str,
        language: &'a str,
        keep_title: bool,
    },
}

/// 网关返回的待写入内容
struct Generated {
    content: String,
    title: Option<String>,
}

impl From<String> for Generated {
    fn from(content: String) -> Self {
        Self {
            content,
            title: None,
        }
    }
}

/// Chapter Editor
pub struct ChapterEditor {
    id: String,
    store: Arc<StoryStore>,
    gateway: Arc<AiGateway>,
    publisher: Arc<EventPublisher>,
    stale_results: StaleResultPolicy,
    language: RwLock<String>,
    busy: AtomicBool,
    last_request_id: AtomicU64,
    suggestion: Mutex<Option<TitleSuggestion>>,
}

impl ChapterEditor {
    pub fn new(
        store: Arc<StoryStore>,
        gateway: Arc<AiGateway>,
        publisher: Arc<EventPublisher>,
        config: ChapterEditorConfig,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(editor_id = %id, language = %config.language, "ChapterEditor created");

        Self {
            id,
            store,
            gateway,
            publisher,
            stale_results: config.stale_results,
            language: RwLock::new(config.language),
            busy: AtomicBool::new(false),
            last_request_id: AtomicU64::new(0),
            suggestion: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 订阅本编辑器的提示
    pub fn subscribe(&self) -> broadcast::Receiver<EditorNotice> {
        self.publisher.register_editor(&self.id)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        tracing::debug!(editor_id = %self.id, language = %language, "Editor language changed");
        *self
            .language
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = language;
    }

    pub fn suggested_title(&self) -> Option<TitleSuggestion> {
        self.lock_suggestion().clone()
    }

    // ========== 手动编辑 ==========

    /// 用 text 替换当前章节内容；无选择时返回 false
    pub fn edit_content(&self, text: &str) -> bool {
        match self.store.selection().target() {
            Some((story_id, chapter_id)) => {
                self.store.update_chapter(story_id, chapter_id, text, None);
                true
            }
            None => false,
        }
    }

    // ========== AI 操作 ==========

    /// 对当前章节内容执行 AI 操作
    pub async fn run_action(&self, action: AiAction) -> Result<ActionOutcome, EditorError> {
        let Some((story_id, chapter_id)) = self.store.selection().target() else {
            return Ok(ActionOutcome::NotInvoked(SkipReason::NoSelection));
        };
        let Some(chapter) = self.store.chapter(story_id, chapter_id) else {
            return Ok(ActionOutcome::NotInvoked(SkipReason::NoSelection));
        };
        if chapter.content().is_empty() {
            return Ok(ActionOutcome::NotInvoked(SkipReason::EmptyContent));
        }

        let content = chapter.content();
        let language = self.language();
        let call = match action {
            AiAction::Clarify => Call::Clarify(content),
            AiAction::Enrich => Call::Enrich(content),
            AiAction::Polish => Call::Polish(content),
            AiAction::Advanced => Call::Advanced {
                details_prompt: content,
                language: &language,
                keep_title: false,
            },
        };

        self.execute(action.as_str(), (story_id, chapter_id), call)
            .await
    }

    /// 按提示生成章节内容
    pub async fn generate_chapter(&self, prompt: &str) -> Result<ActionOutcome, EditorError> {
        let Some(target) = self.store.selection().target() else {
            return Ok(ActionOutcome::NotInvoked(SkipReason::NoSelection));
        };
        if prompt.trim().is_empty() {
            return Ok(ActionOutcome::NotInvoked(SkipReason::EmptyPrompt));
        }

        self.execute("generate_chapter", target, Call::Chapter(prompt))
            .await
    }

    /// 按结构化提示生成章节，正文直接写入，标题作为建议保留
    pub async fn generate_advanced_chapter(
        &self,
        details: &ChapterDetails,
        prompt: &str,
    ) -> Result<ActionOutcome, EditorError> {
        let Some(target) = self.store.selection().target() else {
            return Ok(ActionOutcome::NotInvoked(SkipReason::NoSelection));
        };
        if prompt.trim().is_empty() {
            return Ok(ActionOutcome::NotInvoked(SkipReason::EmptyPrompt));
        }

        let details_prompt = details.compose(prompt);
        let language = self.language();
        let call = Call::Advanced {
            details_prompt: &details_prompt,
            language: &language,
            keep_title: true,
        };

        self.execute("generate_advanced_chapter", target, call)
            .await
    }

    // ========== 标题建议 ==========

    /// 采用标题建议，保留章节当前内容
    pub fn accept_suggested_title(&self) -> ActionOutcome {
        let Some(suggestion) = self.lock_suggestion().take() else {
            return ActionOutcome::NotInvoked(SkipReason::NoSuggestion);
        };

        let Some(chapter) = self.store.chapter(suggestion.story_id, suggestion.chapter_id) else {
            tracing::debug!(
                request_id = suggestion.request_id,
                "Suggested title target no longer exists"
            );
            return ActionOutcome::Discarded {
                request_id: suggestion.request_id,
            };
        };

        self.store.update_chapter(
            suggestion.story_id,
            suggestion.chapter_id,
            chapter.content(),
            Some(&suggestion.title),
        );

        tracing::info!(
            editor_id = %self.id,
            chapter_id = %suggestion.chapter_id,
            title = %suggestion.title,
            "Suggested title accepted"
        );

        ActionOutcome::Applied {
            request_id: suggestion.request_id,
        }
    }

    /// 丢弃标题建议
    pub fn reject_suggested_title(&self) -> bool {
        self.lock_suggestion().take().is_some()
    }

    async fn execute(
        &self,
        action: &'static str,
        target: (StoryId, ChapterId),
        call: Call<'_>,
    ) -> Result<ActionOutcome, EditorError> {
        let Some(_guard) = InFlightGuard::claim(&self.busy) else {
            tracing::debug!(editor_id = %self.id, action = action, "Editor busy, request rejected");
            return Err(EditorError::Busy);
        };

        let request_id = self.last_request_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (story_id, chapter_id) = target;

        tracing::info!(
            editor_id = %self.id,
            request_id = request_id,
            action = action,
            story_id = %story_id,
            chapter_id = %chapter_id,
            "AI request started"
        );
        self.notify(EditorNotice::AiStarted {
            request_id,
            action: action.to_string(),
        });

        let generated = match self.call_gateway(call).await {
            Ok(generated) => generated,
            Err(e) => {
                let mut message = e.to_string();
                if message.is_empty() {
                    message = GENERIC_FAILURE_MESSAGE.to_string();
                }
                tracing::warn!(
                    editor_id = %self.id,
                    request_id = request_id,
                    action = action,
                    error = %message,
                    "AI request failed"
                );
                self.notify(EditorNotice::AiFailed {
                    request_id,
                    action: action.to_string(),
                    message,
                });
                return Err(EditorError::Gateway(e));
            }
        };

        let discard_reason = if self.store.chapter(story_id, chapter_id).is_none() {
            Some("Target chapter deleted")
        } else if self.stale_results == StaleResultPolicy::DiscardIfDeselected
            && self.store.selection().target() != Some(target)
        {
            Some("Target chapter deselected")
        } else {
            None
        };

        if let Some(reason) = discard_reason {
            tracing::info!(
                editor_id = %self.id,
                request_id = request_id,
                action = action,
                chapter_id = %chapter_id,
                reason = reason,
                "AI result discarded"
            );
            self.notify(EditorNotice::ResultDiscarded {
                request_id,
                action: action.to_string(),
            });
            return Ok(ActionOutcome::Discarded { request_id });
        }

        self.store
            .update_chapter(story_id, chapter_id, &generated.content, None);
        self.notify(EditorNotice::AiApplied {
            request_id,
            action: action.to_string(),
        });

        if let Some(title) = generated.title {
            *self.lock_suggestion() = Some(TitleSuggestion {
                request_id,
                story_id,
                chapter_id,
                title: title.clone(),
            });
            self.notify(EditorNotice::TitleSuggested { request_id, title });
        }

        Ok(ActionOutcome::Applied { request_id })
    }

    async fn call_gateway(&self, call: Call<'_>) -> Result<Generated, GatewayError> {
        let generated = match call {
            Call::Clarify(text) => self.gateway.clarify(text).await?.into(),
            Call::Enrich(text) => self.gateway.enrich(text).await?.into(),
            Call::Polish(text) => self.gateway.polish(text).await?.into(),
            Call::Chapter(prompt) => self.gateway.generate_chapter(prompt).await?.into(),
            Call::Advanced {
                details_prompt,
                language,
                keep_title,
            } => {
                let chapter = self
                    .gateway
                    .generate_advanced_chapter(details_prompt, language)
                    .await?;
                Generated {
                    content: chapter.content,
                    title: keep_title.then_some(chapter.title),
                }
            }
        };
        Ok(generated)
    }

    fn notify(&self, notice: EditorNotice) {
        self.publisher.publish_editor_notice(&self.id, notice);
    }

    fn lock_suggestion(&self) -> MutexGuard<'_, Option<TitleSuggestion>> {
        self.suggestion
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for ChapterEditor {
    fn drop(&mut self) {
        self.publisher.unregister_editor(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use crate::application::store::STORAGE_KEY;
    use crate::infrastructure::adapters::FakeGenerationClient;
    use crate::infrastructure::memory::InMemoryStateStorage;
    use std::time::Duration;

    struct Fixture {
        store: Arc<StoryStore>,
        client: Arc<FakeGenerationClient>,
        editor: ChapterEditor,
        story_id: StoryId,
        chapter_id: ChapterId,
    }

    fn fixture(client: FakeGenerationClient, stale_results: StaleResultPolicy) -> Fixture {
        let publisher = EventPublisher::new().arc();
        let store =
            StoryStore::load(InMemoryStateStorage::new().arc(), STORAGE_KEY, publisher.clone()).arc();
        let client = Arc::new(client);
        let gateway = Arc::new(AiGateway::new(client.clone(), "fake-model"));
        let editor = ChapterEditor::new(
            store.clone(),
            gateway,
            publisher,
            ChapterEditorConfig {
                stale_results,
                ..Default::default()
            },
        );

        let story_id = store.add_story("Book");
        let chapter_id = store.add_chapter(story_id, "Ch1").unwrap();
        store.set_current_story(Some(story_id));
        store.set_current_chapter(Some(chapter_id));

        Fixture {
            store,
            client,
            editor,
            story_id,
            chapter_id,
        }
    }

    impl Fixture {
        fn content(&self) -> String {
            self.store
                .chapter(self.story_id, self.chapter_id)
                .unwrap()
                .content()
                .to_string()
        }
    }

    #[tokio::test]
    async fn test_edit_content_writes_current_chapter() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);

        assert!(f.editor.edit_content("Hello"));
        assert_eq!(f.content(), "Hello");

        f.store.set_current_story(None);
        assert!(!f.editor.edit_content("Ignored"));
        assert_eq!(f.content(), "Hello");
    }

    #[tokio::test]
    async fn test_polish_replaces_content() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);
        f.editor.edit_content("teh cat");
        f.client.push_reply("The cat.");

        let mut notices = f.editor.subscribe();
        let outcome = f.editor.run_action(AiAction::Polish).await.unwrap();

        assert_eq!(outcome, ActionOutcome::Applied { request_id: 1 });
        assert_eq!(f.content(), "The cat.");
        assert!(f.client.last_prompt().unwrap().contains("teh cat"));

        assert!(matches!(notices.try_recv().unwrap(), EditorNotice::AiStarted { request_id: 1, .. }));
        assert!(matches!(notices.try_recv().unwrap(), EditorNotice::AiApplied { request_id: 1, .. }));
    }

    #[tokio::test]
    async fn test_actions_not_invoked_without_input() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);

        assert_eq!(
            f.editor.run_action(AiAction::Clarify).await.unwrap(),
            ActionOutcome::NotInvoked(SkipReason::EmptyContent)
        );
        assert_eq!(
            f.editor.generate_chapter("   ").await.unwrap(),
            ActionOutcome::NotInvoked(SkipReason::EmptyPrompt)
        );
        assert_eq!(
            f.editor
                .generate_advanced_chapter(&ChapterDetails::default(), "")
                .await
                .unwrap(),
            ActionOutcome::NotInvoked(SkipReason::EmptyPrompt)
        );

        f.store.set_current_chapter(None);
        assert_eq!(
            f.editor.generate_chapter("a prompt").await.unwrap(),
            ActionOutcome::NotInvoked(SkipReason::NoSelection)
        );

        assert!(f.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_busy_editor_rejects_concurrent_call() {
        let f = fixture(
            FakeGenerationClient::new().with_delay(Duration::from_millis(50)),
            StaleResultPolicy::Apply,
        );
        f.editor.edit_content("draft");
        f.client.push_reply("first result");

        let (first, second) = tokio::join!(
            f.editor.run_action(AiAction::Enrich),
            f.editor.run_action(AiAction::Clarify)
        );

        assert_eq!(first.unwrap(), ActionOutcome::Applied { request_id: 1 });
        assert!(matches!(second, Err(EditorError::Busy)));
        assert_eq!(f.client.requests().len(), 1);
        assert_eq!(f.content(), "first result");
        assert!(!f.editor.is_busy());
    }

    #[tokio::test]
    async fn test_failure_publishes_notice_and_keeps_content() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);
        f.editor.edit_content("original");
        f.client.push_failure(GenerationError::NetworkError("connection reset".to_string()));

        let mut notices = f.editor.subscribe();
        let result = f.editor.run_action(AiAction::Clarify).await;

        assert!(matches!(result, Err(EditorError::Gateway(_))));
        assert_eq!(f.content(), "original");
        assert!(!f.editor.is_busy());

        let _started = notices.try_recv().unwrap();
        match notices.try_recv().unwrap() {
            EditorNotice::AiFailed { action, message, .. } => {
                assert_eq!(action, "clarify");
                assert!(message.contains("connection reset"));
            }
            other => panic!("unexpected notice: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_applies_to_captured_chapter_after_navigation() {
        let f = fixture(
            FakeGenerationClient::new().with_delay(Duration::from_millis(30)),
            StaleResultPolicy::Apply,
        );
        let other = f.store.add_chapter(f.story_id, "Ch2").unwrap();
        f.client.push_reply("generated");

        let (outcome, _) = tokio::join!(f.editor.generate_chapter("a storm"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            f.store.set_current_chapter(Some(other));
        });

        assert_eq!(outcome.unwrap(), ActionOutcome::Applied { request_id: 1 });
        assert_eq!(f.content(), "generated");
        assert_eq!(f.store.chapter(f.story_id, other).unwrap().content(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_discard_policy_drops_result_after_navigation() {
        let f = fixture(
            FakeGenerationClient::new().with_delay(Duration::from_millis(30)),
            StaleResultPolicy::DiscardIfDeselected,
        );
        let other = f.store.add_chapter(f.story_id, "Ch2").unwrap();
        f.client.push_reply("generated");

        let (outcome, _) = tokio::join!(f.editor.generate_chapter("a storm"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            f.store.set_current_chapter(Some(other));
        });

        assert_eq!(outcome.unwrap(), ActionOutcome::Discarded { request_id: 1 });
        assert_eq!(f.content(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_for_deleted_chapter_is_discarded() {
        let f = fixture(
            FakeGenerationClient::new().with_delay(Duration::from_millis(30)),
            StaleResultPolicy::Apply,
        );
        f.client
            .push_reply("TITLE: Lost\n\nCONTENT:\nNobody reads this.");
        let mut notices = f.editor.subscribe();

        let details = ChapterDetails::default();
        let (outcome, _) = tokio::join!(
            f.editor
                .generate_advanced_chapter(&details, "a storm"),
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                f.store.delete_chapter(f.story_id, f.chapter_id);
            }
        );

        assert_eq!(outcome.unwrap(), ActionOutcome::Discarded { request_id: 1 });
        assert!(f.store.chapter(f.story_id, f.chapter_id).is_none());
        assert_eq!(f.store.story(f.story_id).unwrap().chapter_count(), 0);
        assert!(f.editor.suggested_title().is_none());

        let _started = notices.try_recv().unwrap();
        assert!(matches!(
            notices.try_recv().unwrap(),
            EditorNotice::ResultDiscarded { request_id: 1, .. }
        ));
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_advanced_generation_suggests_title() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);
        f.editor.set_language("Spanish");
        f.client
            .push_reply("TITLE: El Puerto\n\nCONTENT:\nLa niebla cubría el muelle.");

        let details = ChapterDetails {
            setting: "a foggy harbor".to_string(),
            ..Default::default()
        };
        let outcome = f
            .editor
            .generate_advanced_chapter(&details, "a return home")
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Applied { request_id: 1 });
        assert_eq!(f.content(), "La niebla cubría el muelle.");

        let prompt = f.client.last_prompt().unwrap();
        assert!(prompt.contains("Spanish"));
        assert!(prompt.contains("a foggy harbor"));
        assert!(prompt.contains("Main Prompt: a return home"));

        let suggestion = f.editor.suggested_title().unwrap();
        assert_eq!(suggestion.title, "El Puerto");

        // 标题未确认前不变
        let chapter = f.store.chapter(f.story_id, f.chapter_id).unwrap();
        assert_eq!(chapter.title(), "Ch1");

        assert_eq!(
            f.editor.accept_suggested_title(),
            ActionOutcome::Applied { request_id: 1 }
        );
        let chapter = f.store.chapter(f.story_id, f.chapter_id).unwrap();
        assert_eq!(chapter.title(), "El Puerto");
        assert_eq!(chapter.content(), "La niebla cubría el muelle.");
        assert!(f.editor.suggested_title().is_none());
    }

    #[tokio::test]
    async fn test_reject_suggested_title() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);
        f.client.push_reply("TITLE: Dawn\n\nCONTENT:\nLight.");

        f.editor
            .generate_advanced_chapter(&ChapterDetails::default(), "sunrise")
            .await
            .unwrap();

        assert!(f.editor.reject_suggested_title());
        assert!(!f.editor.reject_suggested_title());
        assert_eq!(
            f.editor.accept_suggested_title(),
            ActionOutcome::NotInvoked(SkipReason::NoSuggestion)
        );
        let chapter = f.store.chapter(f.story_id, f.chapter_id).unwrap();
        assert_eq!(chapter.title(), "Ch1");
        assert_eq!(chapter.content(), "Light.");
    }

    #[tokio::test]
    async fn test_advanced_action_keeps_only_content() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);
        f.editor.edit_content("Setting and Atmosphere: desert");
        f.client.push_reply("TITLE: Sand\n\nCONTENT:\nDunes rolled on.");

        let outcome = f.editor.run_action(AiAction::Advanced).await.unwrap();

        assert_eq!(outcome, ActionOutcome::Applied { request_id: 1 });
        assert_eq!(f.content(), "Dunes rolled on.");
        assert!(f.editor.suggested_title().is_none());
        assert!(f.client.last_prompt().unwrap().contains("Write in English"));
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let f = fixture(FakeGenerationClient::new(), StaleResultPolicy::Apply);

        let first = f.editor.generate_chapter("one").await.unwrap();
        let second = f.editor.generate_chapter("two").await.unwrap();

        assert_eq!(first, ActionOutcome::Applied { request_id: 1 });
        assert_eq!(second, ActionOutcome::Applied { request_id: 2 });
    }
}
