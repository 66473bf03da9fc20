//! Response Parser - 高级章节响应解析
//!
//! 两条互相独立的提取规则:
//! - 标题: `TITLE:` 同一行之后的文本，空行视为缺失
//! - 内容: `CONTENT:` 之后到结尾（去除首尾空白）
//!
//! 任意一条失败都有独立的回退值，解析本身从不报错。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 标题缺失时的回退值
pub const UNTITLED_CHAPTER: &str = "Untitled Chapter";

static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"TITLE:[ \t]*(.+?)[ \t]*(?:\r?\n|$)").expect("Failed to compile title regex")
});

static CONTENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)CONTENT:\s*(.*)").expect("Failed to compile content regex")
});

/// 解析后的章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChapter {
    pub title: String,
    pub content: String,
}

/// 提取标题
pub fn extract_title(raw: &str) -> Option<String> {
    TITLE_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// 提取内容
pub fn extract_content(raw: &str) -> Option<String> {
    CONTENT_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// 解析 TITLE/CONTENT 格式的响应
pub fn parse_generated_chapter(raw: &str) -> GeneratedChapter {
    let title = extract_title(raw).unwrap_or_else(|| UNTITLED_CHAPTER.to_string());
    let content = extract_content(raw).unwrap_or_else(|| raw.trim().to_string());
    GeneratedChapter { title, content }
}
