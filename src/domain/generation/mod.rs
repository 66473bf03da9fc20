//! Generation Context - 生成请求与响应契约
//!
//! 职责:
//! - 各操作的提示词模板
//! - 高级章节的结构化字段
//! - TITLE/CONTENT 响应解析

mod details;
mod parser;
mod prompts;

pub use details::ChapterDetails;
pub use parser::{
    extract_content, extract_title, parse_generated_chapter, GeneratedChapter, UNTITLED_CHAPTER,
};
pub use prompts::{render_advanced_chapter, Instruction, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
