//! Prompt Templates - 生成请求模板
//!
//! 每个操作使用固定模板包装输入文本

/// 默认写作语言
pub const DEFAULT_LANGUAGE: &str = "English";

/// 编辑器提供的写作语言
pub const SUPPORTED_LANGUAGES: &[&str] = &["English", "French", "Spanish", "German", "Italian"];

/// 单文本输入的指令模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// 提升清晰度，保持原意与风格
    Clarify,
    /// 补充感官与描写细节
    Enrich,
    /// 修正语法、拼写、标点
    Polish,
    /// 根据提示写约 300 字章节
    Chapter,
}

impl Instruction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Instruction::Clarify => "clarify",
            Instruction::Enrich => "enrich",
            Instruction::Polish => "polish",
            Instruction::Chapter => "generate_chapter",
        }
    }

    fn preamble(&self) -> &'static str {
        match self {
            Instruction::Clarify => {
                "Please improve the clarity of the following text while maintaining its original \
                 meaning and style. Make it more readable and easier to understand:"
            }
            Instruction::Enrich => {
                "Please enhance the following text by adding more vivid imagery, sensory details, \
                 and descriptive language while maintaining the original story and tone:"
            }
            Instruction::Polish => {
                "Please polish the following text by fixing any grammar, spelling, or punctuation \
                 errors, and improve the overall writing quality while maintaining the original \
                 style and meaning:"
            }
            Instruction::Chapter => {
                "Write a chapter of approximately 300 words based on the following prompt. \
                 Make it engaging and well-written:"
            }
        }
    }

    /// 生成完整提示词
    pub fn render(&self, input: &str) -> String {
        format!("{}\n\n{}", self.preamble(), input)
    }
}

/// 高级章节提示词：约 500 字，指定语言，固定 TITLE/CONTENT 响应格式
pub fn render_advanced_chapter(details_prompt: &str, language: &str) -> String {
    format!(
        "Create a detailed chapter outline and content based on the following details. \
The chapter should be approximately 500 words and include all the specified elements. \
Write in {language}:

{details_prompt}

First, suggest a title for this chapter, then provide the chapter content. \
Format your response exactly like this:

TITLE: [Your suggested title here]

CONTENT:
[The actual chapter content here]

Do not include any outline or other sections in the response."
    )
}
