//! Azure OpenAI 聊天补全接口
//!
//! 使用阻塞的 `reqwest` 客户端，不设置请求超时：调用挂起会阻塞整个运行。

use serde::{Deserialize, Serialize};

use super::prompt::{system_prompt, user_prompt};
use super::{TranslationRequest, Translator};
use crate::config::TranslatorSettings;
use crate::error::{SyncError, SyncResult};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Azure OpenAI 翻译服务
///
/// 启动时构造一次，然后传给更新器使用。
pub struct AzureOpenAiTranslator {
    client: reqwest::blocking::Client,
    settings: TranslatorSettings,
    api_key: String,
}

impl AzureOpenAiTranslator {
    pub fn new(settings: TranslatorSettings, api_key: String) -> SyncResult<Self> {
        if api_key.trim().is_empty() {
            return Err(SyncError::Config("OPENAI_API_KEY 环境变量未设置".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| SyncError::Config(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    /// 聊天补全接口地址
    pub fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model,
            self.settings.api_version
        )
    }
}

fn build_request<'a>(system: &'a str, user: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
    }
}

fn extract_content(response: ChatResponse) -> SyncResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| SyncError::TranslationCall("响应中没有可用的译文内容".to_string()))
}

impl Translator for AzureOpenAiTranslator {
    fn translate(&self, request: &TranslationRequest<'_>) -> SyncResult<String> {
        let system = system_prompt(request.language_name);
        let user = user_prompt(request);
        let body = build_request(&system, &user);

        tracing::debug!(
            "调用模型 {} 翻译为 {}（完整翻译: {}）",
            self.settings.model,
            request.language_name,
            request.is_full_translation()
        );

        let response = self
            .client
            .post(self.request_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(SyncError::TranslationCall(format!(
                "服务返回 {}: {}",
                status,
                text.trim()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| SyncError::TranslationCall(format!("解析响应失败: {}", e)))?;

        extract_content(parsed)
    }
}
