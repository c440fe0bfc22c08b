// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// AI补全模块
///
/// 提供商（OpenAI、OpenRouter）由配置选择，调用方只依赖
/// `CompletionProvider` 接口，不关心具体后端。
pub mod openai;
pub mod openrouter;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::settings::CompletionSettings;
use crate::utils::errors::ClientError;

pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;

/// 补全响应
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model_used: String,
    pub tokens_used: Option<Value>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 发送一次chat补全请求
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionResponse, ClientError>;

    /// 配置的模型名称
    fn model(&self) -> &str;

    /// 提供商名称
    fn name(&self) -> &'static str;
}

/// 根据配置选择提供商
pub fn from_settings(settings: &CompletionSettings) -> Arc<dyn CompletionProvider> {
    match settings.provider.to_lowercase().as_str() {
        "openrouter" => Arc::new(OpenRouterProvider::new(settings)),
        _ => Arc::new(OpenAiProvider::new(settings)),
    }
}

/// chat/completions 请求的共用实现
pub(crate) async fn send_chat_request(
    client: &Client,
    base_url: &str,
    api_key: &str,
    extra_headers: HeaderMap,
    model: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<CompletionResponse, ClientError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

    let request_body = json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": user_prompt}
        ],
        "temperature": 0.7,
        "max_tokens": 2000,
    });

    let response = client
        .post(url)
        .headers(extra_headers)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&request_body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ClientError::ProviderStatus(format!(
            "{} - {}",
            status, error_text
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ClientError::UnexpectedResponse(format!("Failed to parse response: {}", e)))?;

    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            ClientError::UnexpectedResponse("Invalid response format from completion API".to_string())
        })?;

    Ok(CompletionResponse {
        content: content.to_string(),
        model_used: model.to_string(),
        tokens_used: body.get("usage").cloned(),
    })
}
