//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Story Context: 故事、章节与选择游标
//! - Generation Context: 提示词模板与响应解析

pub mod generation;
pub mod story;
