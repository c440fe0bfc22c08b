// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::config::settings::SerperSettings;
use crate::domain::models::search_result::SearchResult;
use crate::domain::search::engine::{SearchError, SearchProvider};

/// 测试搜索结果条目结构
#[derive(Debug, Deserialize, Serialize)]
struct TestSearchResultEntry {
    title: String,
    url: String,
    description: Option<String>,
    position: Option<u32>,
}

/// Serper 测试配置结构
#[derive(Debug, Deserialize, Serialize)]
struct SerperTestConfig {
    serper: Vec<TestSearchResultEntry>,
}

/// 加载测试配置
fn load_test_config() -> Option<SerperTestConfig> {
    // 首先检查 USE_TEST_DATA 环境变量
    if std::env::var("USE_TEST_DATA").is_err() {
        return None;
    }

    // 尝试从配置文件读取
    let config_paths = [
        "test-data/search-providers/test-results.yaml",
        "../test-data/search-providers/test-results.yaml",
    ];

    for path in config_paths {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(config) = serde_yaml::from_str::<SerperTestConfig>(&content) {
                info!("成功加载 Serper 测试配置 from {}", path);
                return Some(config);
            }
        }
    }

    warn!("无法找到或解析 Serper 测试配置文件");
    None
}

/// 从配置创建搜索结果
fn create_search_results_from_config(config: &SerperTestConfig) -> Vec<SearchResult> {
    config
        .serper
        .iter()
        .map(|entry| SearchResult {
            title: entry.title.clone(),
            url: entry.url.clone(),
            description: entry.description.clone(),
            position: entry.position,
        })
        .collect()
}

/// Serper API 自然结果行
#[derive(Debug, Deserialize)]
struct SerperOrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    snippet: Option<String>,
    position: Option<u32>,
}

/// Serper API 响应体
#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganicResult>,
}

/// Serper.dev 搜索提供商实现
///
/// 以JSON API的方式获取Google自然搜索结果。
/// 密钥可以在构造后由每次请求的覆盖值替换。
pub struct SerperSearchProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SerperSearchProvider {
    pub fn new(settings: &SerperSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
            endpoint: settings.endpoint.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SearchProvider for SerperSearchProvider {
    async fn search(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        // 检查是否使用测试数据（配置文件优先）
        if let Some(config) = load_test_config() {
            info!("使用配置文件中的 Serper 测试数据");
            return Ok(create_search_results_from_config(&config));
        }

        let api_key = self.api_key.as_ref().ok_or(SearchError::MissingApiKey)?;

        let payload = json!({
            "q": query,
            "gl": country.unwrap_or("us"),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-API-KEY", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(format!("Serper request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SearchError::ProviderError(format!(
                "Serper returned status: {}",
                response.status()
            )));
        }

        let body: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let results: Vec<SearchResult> = body
            .organic
            .into_iter()
            .filter(|row| !row.link.is_empty())
            .map(|row| SearchResult {
                title: row.title,
                url: row.link,
                description: row.snippet,
                position: row.position,
            })
            .collect();

        info!("Serper search for {:?} returned {} results", query, results.len());

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}
