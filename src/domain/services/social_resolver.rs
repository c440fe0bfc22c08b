// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};
use url::Url;

use crate::domain::models::audit_input::AuditInput;
use crate::domain::models::social::{PlatformMatch, PlatformSet, SocialPlatform};
use crate::domain::search::engine::SearchProvider;

/// 用户名路径中的内容页片段（命中即拒绝）
const BLOCKED_PATH_PATTERNS: [&str; 6] = ["p/", "reel/", "tv/", "watch", "shorts", "video"];

/// 社交档案解析器
///
/// 网站上已有的链接为权威来源，直接以HIGH置信度接受并跳过搜索；
/// 否则通过搜索提供商查找，第一个用户名包含身份令牌的结果以LOW
/// 置信度接受。密钥缺失、传输错误和空结果一律按"未匹配"处理。
pub struct SocialProfileResolver {
    search: Arc<dyn SearchProvider>,
}

impl SocialProfileResolver {
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }

    /// 解析全部平台
    ///
    /// 各平台的搜索尝试相互独立，可以并发执行；结果顺序与平台
    /// 定义顺序一致。
    pub async fn resolve(
        &self,
        input: &AuditInput,
        website_links: &HashMap<SocialPlatform, String>,
        tokens: &[String],
    ) -> PlatformSet {
        let attempts = SocialPlatform::ALL.map(|platform| async move {
            if let Some(url) = website_links.get(&platform) {
                return (platform, PlatformMatch::from_website(url.clone()));
            }

            match self.find_via_search(input, platform, tokens).await {
                Some(url) => (platform, PlatformMatch::from_search(url)),
                None => (platform, PlatformMatch::not_found()),
            }
        });

        let mut platforms = PlatformSet::all_not_found();
        for (platform, resolved) in join_all(attempts).await {
            platforms.set(platform, resolved);
        }

        platforms
    }

    /// 通过搜索提供商查找单个平台
    async fn find_via_search(
        &self,
        input: &AuditInput,
        platform: SocialPlatform,
        tokens: &[String],
    ) -> Option<String> {
        let business_name = input.business_name.trim();
        if business_name.is_empty() {
            return None;
        }

        let query = build_search_query(business_name, platform);
        let country = input.search_country();

        let results = match self.search.search(&query, Some(&country)).await {
            Ok(results) => results,
            Err(err) => {
                info!(
                    "Social search failed for platform {}: {}",
                    platform.name(),
                    err
                );
                return None;
            }
        };

        for result in results {
            let url = &result.url;
            if url.is_empty() {
                continue;
            }

            // twitter.com与x.com互为别名
            let match_domain = if platform == SocialPlatform::Twitter {
                if url.contains("twitter.com") {
                    "twitter.com"
                } else if url.contains("x.com") {
                    "x.com"
                } else {
                    continue;
                }
            } else if url.contains(platform.domain()) {
                platform.domain()
            } else {
                continue;
            };

            let username = match extract_social_username(url, match_domain) {
                Some(username) => username.to_lowercase(),
                None => continue,
            };

            if tokens
                .iter()
                .any(|token| !token.is_empty() && username.contains(token))
            {
                debug!(
                    "Accepted {} profile {} via search (username {})",
                    platform.name(),
                    url,
                    username
                );
                return Some(url.clone());
            }
        }

        None
    }
}

/// 构建平台特定的搜索词
pub fn build_search_query(business_name: &str, platform: SocialPlatform) -> String {
    match platform {
        SocialPlatform::Youtube => format!("{} YouTube channel", business_name),
        SocialPlatform::Twitter => format!("{} X", business_name),
        SocialPlatform::Tiktok => format!("{} TikTok", business_name),
        _ => format!("{} site:{}", business_name, platform.domain()),
    }
}

/// 从档案URL中提取平台特定的用户名
///
/// 内容详情路径（/p/、/reel/、/watch等）一律拒绝
pub fn extract_social_username(url: &str, domain: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path().trim_matches('/').to_string();
    if path.is_empty() {
        return None;
    }

    for pattern in BLOCKED_PATH_PATTERNS {
        if path.contains(pattern) {
            return None;
        }
    }

    match domain {
        "youtube.com" => {
            if let Some(handle) = path.strip_prefix('@') {
                Some(handle.to_string())
            } else if let Some(channel) = path.strip_prefix("c/") {
                Some(channel.to_string())
            } else {
                path.strip_prefix("channel/").map(String::from)
            }
        }
        "instagram.com" => {
            if path.contains('/') {
                None
            } else {
                Some(path)
            }
        }
        "tiktok.com" => path.strip_prefix('@').map(String::from),
        "linkedin.com" => path.strip_prefix("company/").map(String::from),
        _ => path.split('/').next().map(String::from),
    }
}
