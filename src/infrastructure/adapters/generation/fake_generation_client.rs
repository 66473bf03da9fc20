//! Fake Generation Client - 用于测试的文本生成客户端
//!
//! 按顺序返回预设的响应，不实际调用外部服务

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    GenerationError, GenerationRequest, GenerationResponse, TextGenerationPort,
};

/// Fake Generation Client
///
/// 预设响应用完后返回 default_reply
pub struct FakeGenerationClient {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    default_reply: String,
    delay: Option<Duration>,
}

impl FakeGenerationClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_reply: "fake response".to_string(),
            delay: None,
        }
    }

    /// 设置默认响应
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// 模拟推理延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 追加一个成功响应
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock_replies().push_back(Ok(reply.into()));
    }

    /// 追加一个失败响应
    pub fn push_failure(&self, error: GenerationError) {
        self.lock_replies().push_back(Err(error));
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 最近一次请求的提示词
    pub fn last_prompt(&self) -> Option<String> {
        self.requests().last().map(|r| r.prompt.clone())
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GenerationError>>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FakeGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationPort for FakeGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        tracing::debug!(
            prompt_len = request.prompt.len(),
            model = %request.model,
            "FakeGenerationClient: returning scripted reply"
        );

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let reply = self.lock_replies().pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let text = match reply {
            Some(reply) => reply?,
            None => self.default_reply.clone(),
        };

        Ok(GenerationResponse {
            text,
            model: request.model,
            finish_reason: Some("STOP".to_string()),
        })
    }
}
