// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;

use crate::config::settings::CompletionSettings;
use crate::infrastructure::completion::{send_chat_request, CompletionProvider, CompletionResponse};
use crate::utils::errors::ClientError;

/// OpenAI补全提供商
pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(settings: &CompletionSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings
                .openai
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
            model: settings.openai.model.clone(),
            base_url: settings.openai.base_url.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionResponse, ClientError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ClientError::MissingApiKey("OPENAI_API_KEY".to_string()))?;

        send_chat_request(
            &self.client,
            &self.base_url,
            api_key,
            HeaderMap::new(),
            &self.model,
            system_prompt,
            user_prompt,
        )
        .await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
