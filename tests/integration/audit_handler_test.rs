// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use auditrs::presentation::routes;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::integration::helpers;

fn test_server() -> TestServer {
    let engine = Arc::new(helpers::engine_without_keys());
    TestServer::new(routes::api_routes(engine)).expect("test server")
}

/// 有效请求走完整流程并返回200的完整报告
#[tokio::test]
async fn test_audit_endpoint_returns_complete_report() {
    let site = MockServer::start().await;
    helpers::mount_sample_site(&site).await;

    let server = test_server();
    let response = server
        .post("/api/audit/run")
        .json(&json!({
            "website_url": site.uri(),
            "business_name": "Acme Tech Ltd",
            "industry": "Technology",
            "country": "Nigeria",
            "city": ["Lagos"],
            "target_audience": "Small businesses"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "AI-powered audit completed successfully");

    // 输入回显，位置字段已归一化为数组
    assert_eq!(body["input"]["city"], json!(["Lagos"]));
    assert_eq!(body["input"]["country"], json!(["Nigeria"]));

    // 报告形态完整
    let results = &body["audit_results"];
    assert!(results["website_audit"]["technical_seo"]["score"].is_number());
    assert!(results["website_audit"]["content_quality"].is_object());
    assert!(results["website_audit"]["security_trust"].is_object());
    assert!(results["social_media_presence"]["platforms"]["facebook"].is_object());
    assert!(results["google_business_profile"]["found"].is_string());
    assert!(results["visibility_scores"]["overall_visibility_score"].is_number());
    assert!(results["visibility_scores"]["grade"].is_string());
    assert!(results["key_findings"].is_object());
    assert!(results["recommendations"]["immediate_actions"].is_array());
    assert!(results["competitive_insights"].is_object());

    // 元数据带执行时间
    assert!(body["metadata"]["execution_time"]
        .as_str()
        .unwrap()
        .ends_with("seconds"));
    assert_eq!(
        body["metadata"]["audit_method"],
        "manual_fetch_with_osat_probes_and_ai_recommendations"
    );
    assert!(body["timestamp"].is_string());
}

/// 无效URL触发422验证错误
#[tokio::test]
async fn test_invalid_url_is_rejected_with_422() {
    let server = test_server();
    let response = server
        .post("/api/audit/run")
        .json(&json!({
            "website_url": "not-a-url",
            "business_name": "Acme Tech Ltd",
            "industry": "Technology",
            "country": "Nigeria",
            "city": "Lagos",
            "target_audience": "Small businesses"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"].is_object());
}

/// 缺少必填字段触发422
#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let server = test_server();
    let response = server
        .post("/api/audit/run")
        .json(&json!({
            "website_url": "https://acmetech.ng",
            "business_name": "",
            "industry": "Technology",
            "country": "Nigeria",
            "city": "Lagos",
            "target_audience": "Small businesses"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

/// 健康检查
#[tokio::test]
async fn test_health_endpoint() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
