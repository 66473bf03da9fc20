//! Story Context - Entities

use serde::{Deserialize, Serialize};

use super::ChapterId;

/// 章节 - 可编辑的文本块
///
/// 不变量:
/// - 创建时内容为空
/// - 只属于一个 Story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    content: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ChapterId::new(),
            title: title.into(),
            content: String::new(),
        }
    }

    pub fn id(&self) -> ChapterId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 替换内容；标题仅在非空时替换
    pub(crate) fn rewrite(&mut self, content: &str, title: Option<&str>) {
        self.content = content.to_string();
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title.to_string();
        }
    }
}
