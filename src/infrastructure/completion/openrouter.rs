// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use crate::config::settings::CompletionSettings;
use crate::infrastructure::completion::{send_chat_request, CompletionProvider, CompletionResponse};
use crate::utils::errors::ClientError;

/// OpenRouter补全提供商
///
/// 与OpenAI同构的chat接口，额外携带可选的HTTP-Referer与X-Title头
pub struct OpenRouterProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    site_url: Option<String>,
    app_title: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(settings: &CompletionSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings
                .openrouter
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
            model: settings.openrouter.model.clone(),
            base_url: settings.openrouter.base_url.clone(),
            site_url: settings.openrouter.site_url.clone(),
            app_title: settings.openrouter.app_title.clone(),
        }
    }

    fn extra_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(referer) = &self.site_url {
            if let Ok(value) = HeaderValue::from_str(referer) {
                headers.insert("HTTP-Referer", value);
            }
        }

        if let Some(title) = &self.app_title {
            if let Ok(value) = HeaderValue::from_str(title) {
                headers.insert("X-Title", value);
            }
        }

        headers
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionResponse, ClientError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ClientError::MissingApiKey("OPENROUTER_API_KEY".to_string()))?;

        send_chat_request(
            &self.client,
            &self.base_url,
            api_key,
            self.extra_headers(),
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
        "openrouter"
    }
}
