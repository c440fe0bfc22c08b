// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、HTTP抓取、外部搜索/地点/补全API和深度探测等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 网站抓取配置
    pub fetch: FetchSettings,
    /// Serper搜索API配置
    pub serper: SerperSettings,
    /// Google Places API配置
    pub google_places: GooglePlacesSettings,
    /// AI补全配置
    pub completion: CompletionSettings,
    /// 深度探测配置
    pub probes: ProbeSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 网站抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 主请求超时时间（秒）
    pub timeout_secs: u64,
    /// 资源存在性检查超时时间（秒）
    pub resource_timeout_secs: u64,
    /// HTML预览截断长度（字符）
    pub html_preview_chars: usize,
}

/// Serper搜索API配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SerperSettings {
    /// API密钥（缺失时社交媒体搜索降级为仅网站解析）
    pub api_key: Option<String>,
    /// API端点
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// Google Places API配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlacesSettings {
    /// API密钥（缺失时商家列表检测直接返回未找到）
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// AI补全配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    /// 提供商 (openai, openrouter)
    pub provider: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// OpenAI配置
    pub openai: OpenAiSettings,
    /// OpenRouter配置
    pub openrouter: OpenRouterSettings,
}

/// OpenAI提供商配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// OpenRouter提供商配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// HTTP-Referer 头（可选）
    pub site_url: Option<String>,
    /// X-Title 头（可选）
    pub app_title: Option<String>,
}

/// 深度探测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// PageSpeed Insights API密钥（缺失时回退到本地lighthouse）
    pub pagespeed_api_key: Option<String>,
    /// 内部链接爬取上限（页面数）
    pub internal_link_limit: usize,
    /// 出站链接状态检查上限
    pub outbound_link_limit: usize,
    /// 关键词提取数量上限
    pub keyword_top: usize,
    /// 外部工具调用超时时间（秒）
    pub tool_timeout_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 30)?
            .set_default("fetch.resource_timeout_secs", 8)?
            .set_default("fetch.html_preview_chars", 8000)?
            // Default Serper settings
            .set_default("serper.endpoint", "https://google.serper.dev/search")?
            .set_default("serper.timeout_secs", 20)?
            // Default Google Places settings
            .set_default("google_places.timeout_secs", 15)?
            // Default completion settings
            .set_default("completion.provider", "openai")?
            .set_default("completion.timeout_secs", 120)?
            .set_default("completion.openai.model", "gpt-4o-mini")?
            .set_default("completion.openai.base_url", "https://api.openai.com/v1")?
            .set_default("completion.openrouter.model", "openrouter/auto")?
            .set_default("completion.openrouter.base_url", "https://openrouter.ai/api/v1")?
            // Default probe settings
            .set_default("probes.internal_link_limit", 75)?
            .set_default("probes.outbound_link_limit", 120)?
            .set_default("probes.keyword_top", 20)?
            .set_default("probes.tool_timeout_secs", 180)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("AUDITRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
