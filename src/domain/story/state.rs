//! Story Context - 完整状态
//!
//! StoryState 是持久化的整体状态：故事列表 + 选择游标。
//! 所有状态迁移都是纯函数，在克隆出的新状态上执行。

use serde::{Deserialize, Serialize};

use super::{Chapter, ChapterId, Selection, Story, StoryId};

/// 故事集合与选择游标
///
/// 不变量:
/// - current_chapter_id 若已设置，属于 current_story_id 指向的故事
/// - 切换故事时章节游标同时清空
/// - 删除已选中的实体时，对应游标同时清空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    #[serde(default)]
    stories: Vec<Story>,
    #[serde(default)]
    current_story_id: Option<StoryId>,
    #[serde(default)]
    current_chapter_id: Option<ChapterId>,
}

impl StoryState {
    // ========== 读取 ==========

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn story(&self, story_id: StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| s.id() == story_id)
    }

    pub fn chapter(&self, story_id: StoryId, chapter_id: ChapterId) -> Option<&Chapter> {
        self.story(story_id)?.chapter(chapter_id)
    }

    pub fn current_story_id(&self) -> Option<StoryId> {
        self.current_story_id
    }

    pub fn current_chapter_id(&self) -> Option<ChapterId> {
        self.current_chapter_id
    }

    pub fn selection(&self) -> Selection {
        Selection {
            story_id: self.current_story_id,
            chapter_id: self.current_chapter_id,
        }
    }

    pub fn current_story(&self) -> Option<&Story> {
        self.story(self.current_story_id?)
    }

    /// 当前章节（必须属于当前故事）
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.current_story()?.chapter(self.current_chapter_id?)
    }

    // ========== 状态迁移 ==========

    /// 追加新故事
    pub fn add_story(&mut self, title: impl Into<String>) -> StoryId {
        let story = Story::new(title);
        let id = story.id();
        self.stories.push(story);
        id
    }

    /// 向故事追加空章节；故事不存在时不做任何修改
    pub fn add_chapter(&mut self, story_id: StoryId, title: impl Into<String>) -> Option<ChapterId> {
        let story = self.stories.iter_mut().find(|s| s.id() == story_id)?;
        Some(story.push_chapter(title))
    }

    /// 替换章节内容（标题仅在非空时替换）；找不到时不做任何修改
    pub fn update_chapter(
        &mut self,
        story_id: StoryId,
        chapter_id: ChapterId,
        content: &str,
        title: Option<&str>,
    ) -> bool {
        self.stories
            .iter_mut()
            .find(|s| s.id() == story_id)
            .map(|story| story.rewrite_chapter(chapter_id, content, title))
            .unwrap_or(false)
    }

    /// 设置故事游标，并无条件清空章节游标
    pub fn set_current_story(&mut self, story_id: Option<StoryId>) {
        self.current_story_id = story_id;
        self.current_chapter_id = None;
    }

    /// 设置章节游标，不影响故事游标
    pub fn set_current_chapter(&mut self, chapter_id: Option<ChapterId>) {
        self.current_chapter_id = chapter_id;
    }

    /// 删除故事；若为当前故事，同时清空两个游标
    pub fn delete_story(&mut self, story_id: StoryId) -> bool {
        let before = self.stories.len();
        self.stories.retain(|s| s.id() != story_id);
        let removed = self.stories.len() != before;

        if removed && self.current_story_id == Some(story_id) {
            self.current_story_id = None;
            self.current_chapter_id = None;
        }
        removed
    }

    /// 删除章节；若为当前章节，只清空章节游标
    pub fn delete_chapter(&mut self, story_id: StoryId, chapter_id: ChapterId) -> bool {
        let removed = self
            .stories
            .iter_mut()
            .find(|s| s.id() == story_id)
            .map(|story| story.remove_chapter(chapter_id))
            .unwrap_or(false);

        if removed && self.current_chapter_id == Some(chapter_id) {
            self.current_chapter_id = None;
        }
        removed
    }
}
