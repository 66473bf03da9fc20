//! Event Publisher Implementation
//!
//! Store 变更通知与编辑器提示的广播实现

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::story::{ChapterId, StoryId, StoryState};

const CHANNEL_CAPACITY: usize = 100;

/// Store 变更类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum StoreChange {
    StoryAdded {
        story_id: StoryId,
    },
    ChapterAdded {
        story_id: StoryId,
        chapter_id: ChapterId,
    },
    ChapterUpdated {
        story_id: StoryId,
        chapter_id: ChapterId,
    },
    CurrentStoryChanged {
        story_id: Option<StoryId>,
    },
    CurrentChapterChanged {
        chapter_id: Option<ChapterId>,
    },
    StoryDeleted {
        story_id: StoryId,
    },
    ChapterDeleted {
        story_id: StoryId,
        chapter_id: ChapterId,
    },
}

/// Store 变更事件（携带变更后的完整状态快照）
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub change: StoreChange,
    pub state: Arc<StoryState>,
}

/// 编辑器提示（面向用户的通知）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum EditorNotice {
    /// AI 请求已发出
    AiStarted { request_id: u64, action: String },
    /// AI 结果已写入章节
    AiApplied { request_id: u64, action: String },
    /// AI 请求失败
    AiFailed {
        request_id: u64,
        action: String,
        message: String,
    },
    /// 目标章节已不是当前选择，结果被丢弃
    ResultDiscarded { request_id: u64, action: String },
    /// 高级生成给出的标题建议
    TitleSuggested { request_id: u64, title: String },
}

/// 事件发布器
pub struct EventPublisher {
    /// Store 变更广播
    store_channel: broadcast::Sender<StoreEvent>,
    /// editor_id -> broadcast sender (for editor-specific notices)
    editor_channels: DashMap<String, broadcast::Sender<EditorNotice>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (store_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            store_channel: store_tx,
            editor_channels: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅 Store 变更
    pub fn subscribe_store(&self) -> broadcast::Receiver<StoreEvent> {
        self.store_channel.subscribe()
    }

    /// 注册编辑器的提示通道
    pub fn register_editor(&self, editor_id: &str) -> broadcast::Receiver<EditorNotice> {
        if let Some(sender) = self.editor_channels.get(editor_id) {
            return sender.subscribe();
        }

        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
        self.editor_channels.insert(editor_id.to_string(), tx);
        rx
    }

    /// 取消注册编辑器
    pub fn unregister_editor(&self, editor_id: &str) {
        self.editor_channels.remove(editor_id);
    }

    /// 发布 Store 变更
    pub fn publish_store_changed(&self, change: StoreChange, state: Arc<StoryState>) {
        if let Err(e) = self.store_channel.send(StoreEvent { change, state }) {
            tracing::debug!(
                change = ?e.0.change,
                "Store change not delivered (no subscribers)"
            );
        }
    }

    /// 发布编辑器提示
    pub fn publish_editor_notice(&self, editor_id: &str, notice: EditorNotice) {
        if let Some(sender) = self.editor_channels.get(editor_id) {
            if let Err(e) = sender.send(notice) {
                tracing::debug!(
                    editor_id = %editor_id,
                    error = %e,
                    "Failed to publish editor notice (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
