//! 评卷模型客户端 - 业务能力层
//!
//! 只负责"提交请求、拿回原始文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（Gemini 的 OpenAI 兼容端点等）
//! - 凭证 / 端点 / 模型名全部来自显式传入的配置，无全局状态，
//!   测试可以把 base_url 指到假服务

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;

/// 评卷模型客户端
///
/// 职责：
/// - 用单一配置的模型提交评卷请求
/// - 无重试策略
/// - 调用失败或响应信封缺失/畸形时返回空串而不是错误，
///   调用方按"模型调用失败"处理
pub struct EvaluationClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl EvaluationClient {
    /// 创建新的评卷模型客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 提交评卷请求，返回模型的原始文本输出
    pub async fn submit(&self, prompt: &str) -> String {
        debug!(
            "调用评卷模型: {}，请求长度: {} 字符",
            self.model_name,
            prompt.chars().count()
        );

        let user_msg = match ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
        {
            Ok(msg) => msg,
            Err(e) => {
                warn!("构建用户消息失败: {}", e);
                return String::new();
            }
        };

        let request = match CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.2)
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                warn!("构建评卷请求失败: {}", e);
                return String::new();
            }
        };

        match self.client.chat().create(request).await {
            Ok(response) => {
                debug!("评卷模型调用成功");
                response
                    .choices
                    .first()
                    .and_then(|choice| choice.message.content.clone())
                    .map(|content| content.trim().to_string())
                    .unwrap_or_default()
            }
            Err(e) => {
                warn!("评卷模型调用失败 (模型: {}): {}", self.model_name, e);
                String::new()
            }
        }
    }
}
