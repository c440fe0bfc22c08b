// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 网站抓取结果
///
/// 一次审计运行中对目标网站的只读快照。HTML正文只保留固定长度
/// 的前缀，完整内容从不驻留。传输层失败时 `status_code` 为 0，
/// `error` 携带原因，计时字段为 null。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchResult {
    pub status_code: u16,
    pub has_ssl: bool,
    pub html_length: usize,
    pub html_preview: String,
    pub response_time_ms_desktop: Option<f64>,
    pub response_time_ms_mobile: Option<f64>,
    pub has_robots: bool,
    pub has_sitemap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    /// 传输失败时的降级结果
    pub fn failed(url: &str, message: String) -> Self {
        Self {
            status_code: 0,
            has_ssl: url.starts_with("https://"),
            html_length: 0,
            html_preview: String::new(),
            response_time_ms_desktop: None,
            response_time_ms_mobile: None,
            has_robots: false,
            has_sitemap: false,
            error: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_keeps_ssl_flag_from_scheme() {
        let result = FetchResult::failed("https://unreachable.example", "timeout".to_string());
        assert_eq!(result.status_code, 0);
        assert!(result.has_ssl);
        assert!(result.error.is_some());
        assert!(result.response_time_ms_desktop.is_none());
        assert!(result.response_time_ms_mobile.is_none());

        let result = FetchResult::failed("http://unreachable.example", "timeout".to_string());
        assert!(!result.has_ssl);
    }
}
