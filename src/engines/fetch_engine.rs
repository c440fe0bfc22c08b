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

use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use crate::config::settings::FetchSettings;
use crate::domain::models::fetch_result::FetchResult;

/// 桌面端User-Agent
pub const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 移动端User-Agent
pub const MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 10; SM-G973F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

/// 网站抓取引擎
///
/// 对目标网站发起计时的GET/HEAD请求。被审计的站点证书质量参差不齐，
/// 这里刻意禁用证书校验，以可用性优先于严格TLS验证。
/// 所有传输层失败都折叠为降级结果，从不向上传播。
pub struct FetchEngine {
    client: Client,
    mobile_client: Client,
    resource_client: Client,
    preview_chars: usize,
}

impl FetchEngine {
    pub fn new(settings: &FetchSettings) -> Self {
        let client = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        let mobile_client = Client::builder()
            .user_agent(MOBILE_USER_AGENT)
            .timeout(Duration::from_secs(15))
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        let resource_client = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(Duration::from_secs(settings.resource_timeout_secs))
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            mobile_client,
            resource_client,
            preview_chars: settings.html_preview_chars,
        }
    }

    /// 抓取网站内容
    ///
    /// 用桌面UA抓取并计时，再用移动UA独立测量一次响应时间，
    /// 同时探测robots.txt和sitemap.xml是否存在。
    /// 任何传输失败返回 `status_code: 0` 的降级结果。
    pub async fn fetch_website(&self, url: &str) -> FetchResult {
        let start = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                return FetchResult::failed(url, format!("Failed to fetch website: {}", err));
            }
        };

        let status_code = response.status().as_u16();
        let html = match response.text().await {
            Ok(html) => html,
            Err(err) => {
                return FetchResult::failed(url, format!("Failed to fetch website: {}", err));
            }
        };
        let elapsed_ms = round1(start.elapsed().as_secs_f64() * 1000.0);

        let mobile_elapsed = self.measure_response_time(url).await;

        let (has_robots, has_sitemap) = match Url::parse(url) {
            Ok(base) => {
                let robots = match base.join("/robots.txt") {
                    Ok(u) => self.resource_exists(u.as_str()).await,
                    Err(_) => false,
                };
                let sitemap = match base.join("/sitemap.xml") {
                    Ok(u) => self.resource_exists(u.as_str()).await,
                    Err(_) => false,
                };
                (robots, sitemap)
            }
            Err(_) => (false, false),
        };

        FetchResult {
            status_code,
            has_ssl: url.starts_with("https://"),
            html_length: html.len(),
            html_preview: truncate_chars(&html, self.preview_chars),
            response_time_ms_desktop: Some(elapsed_ms),
            response_time_ms_mobile: mobile_elapsed,
            has_robots,
            has_sitemap,
            error: None,
        }
    }

    /// 检查资源是否存在
    ///
    /// 先HEAD后GET回退，2xx/3xx视为存在，所有传输错误视为不存在
    pub async fn resource_exists(&self, url: &str) -> bool {
        if let Ok(response) = self.resource_client.head(url).send().await {
            let status = response.status().as_u16();
            if (200..400).contains(&status) {
                return true;
            }
        }

        match self.resource_client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                (200..400).contains(&status)
            }
            Err(_) => false,
        }
    }

    /// 抓取任意页面正文（探测器使用）
    ///
    /// 返回状态码和正文；失败时返回 (0, 空串)
    pub async fn fetch_page(&self, url: &str) -> (u16, String) {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(html) => (status, html),
                    Err(_) => (status, String::new()),
                }
            }
            Err(_) => (0, String::new()),
        }
    }

    /// 检查URL状态码（出站链接探测使用）
    ///
    /// HEAD失败时回退GET，双双失败记为500
    pub async fn status_code(&self, url: &str) -> u16 {
        if let Ok(response) = self.resource_client.head(url).send().await {
            return response.status().as_u16();
        }

        match self.resource_client.get(url).send().await {
            Ok(response) => response.status().as_u16(),
            Err(_) => 500,
        }
    }

    /// 用移动UA测量响应时间（毫秒）
    async fn measure_response_time(&self, url: &str) -> Option<f64> {
        let start = Instant::now();
        match self.mobile_client.get(url).send().await {
            Ok(_) => Some(round1(start.elapsed().as_secs_f64() * 1000.0)),
            Err(_) => None,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 按字符数截断（保持UTF-8边界）
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(123.456), 123.5);
        assert_eq!(round1(123.44), 123.4);
    }
}
