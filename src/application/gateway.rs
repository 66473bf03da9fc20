//! AI Gateway - 文本变换与章节生成
//!
//! 将编辑操作映射为提示词并调用 TextGenerationPort。
//! 除模型 id 外无状态，失败不重试。

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{GenerationError, GenerationRequest, TextGenerationPort};
use crate::domain::generation::{
    parse_generated_chapter, render_advanced_chapter, GeneratedChapter, Instruction,
};

/// 网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Generation service returned an empty response")]
    EmptyResponse,
}

/// AI Gateway
pub struct AiGateway {
    generator: Arc<dyn TextGenerationPort>,
    model: String,
}

impl AiGateway {
    pub fn new(generator: Arc<dyn TextGenerationPort>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 改写为更清晰的表达
    pub async fn clarify(&self, text: &str) -> Result<String, GatewayError> {
        self.complete(Instruction::Clarify.render(text), Instruction::Clarify.as_str())
            .await
    }

    /// 扩写细节
    pub async fn enrich(&self, text: &str) -> Result<String, GatewayError> {
        self.complete(Instruction::Enrich.render(text), Instruction::Enrich.as_str())
            .await
    }

    /// 润色
    pub async fn polish(&self, text: &str) -> Result<String, GatewayError> {
        self.complete(Instruction::Polish.render(text), Instruction::Polish.as_str())
            .await
    }

    /// 按提示生成章节，返回原始文本
    pub async fn generate_chapter(&self, prompt: &str) -> Result<String, GatewayError> {
        self.complete(Instruction::Chapter.render(prompt), Instruction::Chapter.as_str())
            .await
    }

    /// 按结构化提示生成章节，并解析标题与正文
    pub async fn generate_advanced_chapter(
        &self,
        details_prompt: &str,
        language: &str,
    ) -> Result<GeneratedChapter, GatewayError> {
        let raw = self
            .complete(
                render_advanced_chapter(details_prompt, language),
                "generate_advanced_chapter",
            )
            .await?;

        let chapter = parse_generated_chapter(&raw);
        tracing::debug!(
            title = %chapter.title,
            content_len = chapter.content.len(),
            "Parsed advanced chapter"
        );
        Ok(chapter)
    }

    async fn complete(&self, prompt: String, operation: &'static str) -> Result<String, GatewayError> {
        tracing::info!(
            operation = operation,
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling generation service"
        );

        let response = self
            .generator
            .generate(GenerationRequest {
                prompt,
                model: self.model.clone(),
            })
            .await
            .map_err(|e| {
                tracing::warn!(operation = operation, error = %e, "Generation failed");
                GatewayError::from(e)
            })?;

        if response.text.trim().is_empty() {
            tracing::warn!(operation = operation, "Generation returned empty text");
            return Err(GatewayError::EmptyResponse);
        }

        Ok(response.text)
    }
}
