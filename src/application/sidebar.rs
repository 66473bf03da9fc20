//! Story Sidebar - 侧边栏意图
//!
//! 故事/章节的新增、选择与删除。空白标题不会触发变更。

use std::sync::Arc;

use crate::application::store::StoryStore;
use crate::domain::story::{ChapterId, StoryId};

pub struct StorySidebar {
    store: Arc<StoryStore>,
}

impl StorySidebar {
    pub fn new(store: Arc<StoryStore>) -> Self {
        Self { store }
    }

    /// 新增故事；标题去除首尾空白后为空则忽略
    pub fn add_story(&self, title: &str) -> Option<StoryId> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("Blank story title, add_story skipped");
            return None;
        }
        Some(self.store.add_story(title))
    }

    /// 为当前故事新增章节；需要已选择故事且标题非空
    pub fn add_chapter(&self, title: &str) -> Option<ChapterId> {
        let title = title.trim();
        let story_id = self.store.selection().story_id?;
        if title.is_empty() {
            tracing::debug!(story_id = %story_id, "Blank chapter title, add_chapter skipped");
            return None;
        }
        self.store.add_chapter(story_id, title)
    }

    /// 选择故事；故事不存在时忽略
    pub fn select_story(&self, story_id: StoryId) -> bool {
        if self.store.story(story_id).is_none() {
            tracing::debug!(story_id = %story_id, "Unknown story, select_story skipped");
            return false;
        }
        self.store.set_current_story(Some(story_id));
        true
    }

    /// 选择当前故事中的章节；不属于当前故事时忽略
    pub fn select_chapter(&self, chapter_id: ChapterId) -> bool {
        let owned = self
            .store
            .current_story()
            .is_some_and(|story| story.chapter(chapter_id).is_some());
        if !owned {
            tracing::debug!(
                chapter_id = %chapter_id,
                "Chapter not in current story, select_chapter skipped"
            );
            return false;
        }
        self.store.set_current_chapter(Some(chapter_id));
        true
    }

    pub fn delete_story(&self, story_id: StoryId) {
        self.store.delete_story(story_id);
    }

    pub fn delete_chapter(&self, story_id: StoryId, chapter_id: ChapterId) {
        self.store.delete_chapter(story_id, chapter_id);
    }
}
