// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use auditrs::config::settings::SerperSettings;
use auditrs::domain::models::social::{Confidence, Provenance};
use auditrs::domain::search::engine::SearchProvider;
use auditrs::domain::services::social_resolver::SocialProfileResolver;
use auditrs::infrastructure::search::SerperSearchProvider;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers;

fn provider_for(server: &MockServer) -> SerperSearchProvider {
    SerperSearchProvider::new(&SerperSettings {
        api_key: Some("test-key".to_string()),
        endpoint: format!("{}/search", server.uri()),
        timeout_secs: 5,
    })
}

/// Serper客户端解析自然结果
#[tokio::test]
async fn test_serper_provider_maps_organic_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {
                    "title": "Acme Tech (@acmetech) on Instagram",
                    "link": "https://instagram.com/acmetech",
                    "snippet": "Custom software in Lagos",
                    "position": 1
                },
                {
                    "title": "Broken row without link"
                }
            ]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let results = provider.search("Acme Tech site:instagram.com", Some("Nigeria")).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://instagram.com/acmetech");
    assert_eq!(results[0].description.as_deref(), Some("Custom software in Lagos"));
}

/// 搜索命中的候选必须通过身份令牌验证才被接受
#[tokio::test]
async fn test_social_resolution_via_search_with_token_gate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "Other shop", "link": "https://instagram.com/unrelatedstore", "position": 1},
                {"title": "Acme", "link": "https://instagram.com/acmetech", "position": 2}
            ]
        })))
        .mount(&server)
        .await;

    let provider: Arc<dyn SearchProvider> = Arc::new(provider_for(&server));
    let resolver = SocialProfileResolver::new(provider);

    let input = helpers::sample_input("https://acmetech.ng");
    let tokens = vec!["acme".to_string(), "acmetech".to_string()];

    let platforms = resolver.resolve(&input, &HashMap::new(), &tokens).await;

    // 第一个结果令牌不匹配被跳过
    assert_eq!(platforms.instagram.url, "https://instagram.com/acmetech");
    assert_eq!(platforms.instagram.source, Provenance::Search);
    assert_eq!(platforms.instagram.confidence, Confidence::Low);
}

/// 提供商返回5xx时按"未匹配"处理
#[tokio::test]
async fn test_provider_failure_is_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider: Arc<dyn SearchProvider> = Arc::new(provider_for(&server));
    let resolver = SocialProfileResolver::new(provider);

    let input = helpers::sample_input("https://acmetech.ng");
    let platforms = resolver
        .resolve(&input, &HashMap::new(), &["acme".to_string()])
        .await;

    for (_, platform) in platforms.iter() {
        assert_eq!(platform.source, Provenance::None);
        assert_eq!(platform.url, "NOT FOUND");
    }
}
