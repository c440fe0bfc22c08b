// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers;
use auditrs::domain::models::report::KeywordUsage;
use auditrs::domain::models::social::{Confidence, Provenance};
use wiremock::MockServer;

/// 针对模拟站点的完整审计流程
///
/// 无任何外部凭据：社交检测只依赖网站解析，商家检测与AI建议降级
#[tokio::test]
async fn test_full_audit_against_mock_site() {
    let server = MockServer::start().await;
    helpers::mount_sample_site(&server).await;

    let engine = helpers::engine_without_keys();
    let input = helpers::sample_input(&server.uri());

    let outcome = engine.run_comprehensive_audit(&input).await;
    assert!(outcome.success);

    let report = &outcome.audit_results;

    // 技术SEO：200(+40) + 无SSL(0) + robots(+20) + 无sitemap(0) = 60
    let technical = &report.website_audit.technical_seo;
    assert_eq!(technical.score, 60);
    assert!(!technical.ssl_valid);
    assert!(technical.robots_txt_present);
    assert!(!technical.sitemap_xml_present);
    assert!(technical
        .issues
        .iter()
        .any(|issue| issue == "sitemap.xml missing"));
    assert!(technical
        .strengths
        .iter()
        .any(|strength| strength == "robots.txt present"));
    // lighthouse不可用时回退到原始计时
    assert!(technical.page_speed_estimate.desktop_ms.is_some());
    // viewport标签存在
    assert_eq!(technical.mobile_friendly, Some(true));

    // 内容：标题(+25) + 描述(+25) + h1&h2(+20) + 未提供关键词(0) = 70
    let content = &report.website_audit.content_quality;
    assert_eq!(content.score, 70);
    assert_eq!(content.meta_title.as_deref(), Some("Acme Tech"));
    assert_eq!(content.keyword_usage, KeywordUsage::Unknown);

    // 信任：无SSL(0) + 隐私(+25) + 条款(+25) + 联系方式(+25) = 75
    let trust = &report.website_audit.security_trust;
    assert_eq!(trust.score, Some(75));
    assert_eq!(trust.privacy_policy_found, Some(true));
    assert_eq!(trust.terms_conditions_found, Some(true));
    assert_eq!(trust.contact_info_visible, Some(true));

    // 社交：网站上的facebook链接权威接受，其余未找到
    let social = &report.social_media_presence;
    assert_eq!(social.platforms.facebook.source, Provenance::Website);
    assert_eq!(social.platforms.facebook.confidence, Confidence::High);
    assert_eq!(social.platforms.facebook.url, "https://facebook.com/acmetech");
    assert_eq!(social.platforms.instagram.source, Provenance::None);
    assert_eq!(social.platforms.instagram.url, "NOT FOUND");
    assert_eq!(social.total_platforms, 1);
    assert_eq!(social.social_score, Some(17));
    assert_eq!(social.integration_quality, "excellent");

    // 商家：无API密钥，规范未找到记录
    let gbp = &report.google_business_profile;
    assert_eq!(gbp.found, "NO");
    assert_eq!(gbp.name, "N/A");
    assert_eq!(gbp.score, Some(0));

    // 总评：(60 + 70 + 17 + 0) / 4 = 37 → F
    let scores = &report.visibility_scores;
    assert_eq!(scores.overall_visibility_score, 37);
    assert_eq!(scores.grade, "F");
    assert_eq!(scores.social_media_presence, 17);

    // 深度探测为附加内容，外部工具缺失时是结构化失败对象
    let osat = report.osat_checks.as_ref().expect("osat checks present");
    assert!(osat["lighthouse"]["mobile"].get("error").is_some());
    assert!(osat["keywords"].as_array().is_some());
    assert!(osat["internal_links"]["summary"]["pages_crawled"].as_u64().unwrap() >= 1);

    // AI建议降级但字段齐全
    let ai = report.ai_recommendations.as_ref().expect("ai section present");
    assert!(!ai.success);
    assert!(ai
        .content
        .as_deref()
        .unwrap()
        .contains("NOT CHECKED"));

    assert!(outcome.metadata.note.contains("AI recommendations fallback"));
    assert_eq!(
        outcome.metadata.audit_method,
        "manual_fetch_with_osat_probes_and_ai_recommendations"
    );
}

/// 不可达主机的优雅降级
///
/// 抓取返回status 0且不抛错，其余管线仍产出完整报告
#[tokio::test]
async fn test_unreachable_host_produces_complete_report() {
    let engine = helpers::engine_without_keys();
    let input = helpers::sample_input("https://127.0.0.1:9");

    let outcome = engine.run_comprehensive_audit(&input).await;
    assert!(outcome.success);

    let report = &outcome.audit_results;

    let fetch = &report.website_fetch;
    assert_eq!(fetch.status_code, 0);
    assert!(fetch.error.is_some());
    assert!(fetch.has_ssl);
    assert!(fetch.response_time_ms_desktop.is_none());
    assert!(fetch.response_time_ms_mobile.is_none());

    // 技术：仅SSL标志来自scheme = 20
    assert_eq!(report.website_audit.technical_seo.score, 20);

    // 空HTML：信任不可评分
    let trust = &report.website_audit.security_trust;
    assert_eq!(trust.score, None);
    assert_eq!(trust.privacy_policy_found, None);
    assert!(trust
        .issues
        .iter()
        .any(|issue| issue.contains("not fully evaluated")));

    // 内容全空
    let content = &report.website_audit.content_quality;
    assert_eq!(content.score, 0);
    assert!(content.meta_title.is_none());

    // 社交全未找到，social_score为null
    assert_eq!(report.social_media_presence.social_score, None);
    assert_eq!(report.social_media_presence.total_platforms, 0);
    assert_eq!(report.visibility_scores.social_media_presence, 0);

    // 总评 (20+0+0+0)/4 = 5 → F
    assert_eq!(report.visibility_scores.overall_visibility_score, 5);
    assert_eq!(report.visibility_scores.grade, "F");

    // 无法判定移动端友好
    assert_eq!(report.website_audit.technical_seo.mobile_friendly, None);

    // 报告形态完整：AI部分存在且降级
    assert!(report.ai_recommendations.is_some());
    assert!(report.osat_checks.is_some());
}
