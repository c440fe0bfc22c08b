// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use auditrs::config::settings::{
    CompletionSettings, FetchSettings, GooglePlacesSettings, OpenAiSettings, OpenRouterSettings,
    ProbeSettings, SerperSettings,
};
use auditrs::domain::models::audit_input::AuditInput;
use auditrs::domain::search::engine::SearchProvider;
use auditrs::domain::services::audit_service::AuditEngine;
use auditrs::engines::fetch_engine::FetchEngine;
use auditrs::engines::probe_runner::ProbeRunner;
use auditrs::infrastructure::completion;
use auditrs::infrastructure::places::GooglePlacesClient;
use auditrs::infrastructure::search::SerperSearchProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn fetch_settings() -> FetchSettings {
    FetchSettings {
        timeout_secs: 10,
        resource_timeout_secs: 3,
        html_preview_chars: 8000,
    }
}

pub fn probe_settings() -> ProbeSettings {
    ProbeSettings {
        pagespeed_api_key: None,
        internal_link_limit: 5,
        outbound_link_limit: 20,
        keyword_top: 10,
        tool_timeout_secs: 5,
    }
}

pub fn completion_settings_without_key() -> CompletionSettings {
    CompletionSettings {
        provider: "openai".to_string(),
        timeout_secs: 10,
        openai: OpenAiSettings {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        },
        openrouter: OpenRouterSettings {
            api_key: None,
            model: "openrouter/auto".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            site_url: None,
            app_title: None,
        },
    }
}

/// 构建一个所有外部凭据均缺失的引擎
///
/// 社交搜索、商家检测和AI建议全部走降级路径
pub fn engine_without_keys() -> AuditEngine {
    let fetch_engine = Arc::new(FetchEngine::new(&fetch_settings()));
    let probe_runner = Arc::new(ProbeRunner::new(fetch_engine.clone(), probe_settings()));

    let search: Arc<dyn SearchProvider> = Arc::new(SerperSearchProvider::new(&SerperSettings {
        api_key: None,
        endpoint: "https://google.serper.dev/search".to_string(),
        timeout_secs: 5,
    }));
    let places = Arc::new(GooglePlacesClient::new(&GooglePlacesSettings {
        api_key: None,
        timeout_secs: 5,
    }));
    let provider = completion::from_settings(&completion_settings_without_key());

    AuditEngine::with_components(fetch_engine, probe_runner, search, places, provider)
}

pub fn sample_input(website_url: &str) -> AuditInput {
    AuditInput {
        website_url: website_url.to_string(),
        business_name: "Acme Tech Ltd".to_string(),
        industry: "Technology".to_string(),
        country: vec!["Nigeria".to_string()],
        city: vec!["Lagos".to_string()],
        target_audience: "Small businesses".to_string(),
        description: None,
        competitors: vec![],
        keywords: vec![],
    }
}

/// 挂载一个带社交链接与信任信号的示例站点
pub async fn mount_sample_site(server: &MockServer) {
    let home_html = r#"<!DOCTYPE html>
<html>
<head>
    <title>Acme Tech</title>
    <meta name="description" content="Custom software for Lagos businesses">
    <meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
    <h1>Acme Tech</h1>
    <h2>Software that ships</h2>
    <p>We build custom software for growing businesses.</p>
    <p>Read our Privacy Policy and Terms of Service.</p>
    <p>Call +234 801 234 5678 or write hello@acmetech.ng</p>
    <a href="https://facebook.com/acmetech">Facebook</a>
    <a href="/about">About us</a>
</body>
</html>"#;

    let about_html = r#"<html><head><title>About</title></head>
<body><h1>About Acme</h1><a href="/">Home</a></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(home_html))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_string(about_html))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /\n"))
        .mount(server)
        .await;
}
