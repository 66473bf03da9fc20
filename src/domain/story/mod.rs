//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 故事聚合管理
//! - 章节实体
//! - 选择游标与整体状态迁移

mod aggregate;
mod entities;
mod state;
mod value_objects;

pub use aggregate::Story;
pub use entities::Chapter;
pub use state::StoryState;
pub use value_objects::{ChapterId, Selection, StoryId};
