//! Story Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{Chapter, ChapterId, StoryId};

/// Story 聚合根
///
/// 不变量:
/// - 章节顺序即插入顺序，不提供重排
/// - 章节只能通过聚合根增删改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    title: String,
    chapters: Vec<Chapter>,
}

impl Story {
    /// 创建新故事（无章节）
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: StoryId::new(),
            title: title.into(),
            chapters: Vec::new(),
        }
    }

    // Getters
    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapter(&self, chapter_id: ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id() == chapter_id)
    }

    /// 追加空章节
    pub(crate) fn push_chapter(&mut self, title: impl Into<String>) -> ChapterId {
        let chapter = Chapter::new(title);
        let id = chapter.id();
        self.chapters.push(chapter);
        id
    }

    /// 改写章节，章节不存在时返回 false
    pub(crate) fn rewrite_chapter(
        &mut self,
        chapter_id: ChapterId,
        content: &str,
        title: Option<&str>,
    ) -> bool {
        match self.chapters.iter_mut().find(|c| c.id() == chapter_id) {
            Some(chapter) => {
                chapter.rewrite(content, title);
                true
            }
            None => false,
        }
    }

    /// 删除章节，章节不存在时返回 false
    pub(crate) fn remove_chapter(&mut self, chapter_id: ChapterId) -> bool {
        let before = self.chapters.len();
        self.chapters.retain(|c| c.id() != chapter_id);
        self.chapters.len() != before
    }
}
