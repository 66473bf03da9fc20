//! Generation Adapter - 文本生成客户端实现

mod fake_generation_client;
mod gemini_client;

pub use fake_generation_client::FakeGenerationClient;
pub use gemini_client::*;
