// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use auditrs::config::settings::GooglePlacesSettings;
use auditrs::domain::models::listing::ListingResolution;
use auditrs::domain::services::listing_resolver::ListingResolver;
use auditrs::infrastructure::places::GooglePlacesClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::helpers;

fn resolver_for(server: &MockServer) -> ListingResolver {
    let client = GooglePlacesClient::with_endpoints(
        &GooglePlacesSettings {
            api_key: Some("places-key".to_string()),
            timeout_secs: 5,
        },
        &format!("{}/textsearch", server.uri()),
        &format!("{}/details", server.uri()),
    );
    ListingResolver::new(Arc::new(client))
}

async fn mount_text_search(server: &MockServer, name: &str, address: &str) {
    Mock::given(method("GET"))
        .and(path("/textsearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {"place_id": "place-1", "name": name, "formatted_address": address}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer, name: &str, address: &str) {
    Mock::given(method("GET"))
        .and(path("/details"))
        .and(query_param("place_id", "place-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": name,
                "formatted_address": address,
                "formatted_phone_number": "+234 801 234 5678",
                "rating": 4.5,
                "user_ratings_total": 57
            }
        })))
        .mount(server)
        .await;
}

/// 令牌验证通过的候选被接受
#[tokio::test]
async fn test_verified_candidate_is_resolved() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Acme Tech Nigeria", "12 Marina Rd, Lagos").await;
    mount_details(&server, "Acme Tech Nigeria", "12 Marina Rd, Lagos").await;

    let resolver = resolver_for(&server);
    let input = helpers::sample_input("https://acmetech.ng");
    let tokens = vec!["acme".to_string(), "acmetech".to_string()];

    let resolution = resolver.resolve(&input, &tokens).await;

    match resolution {
        ListingResolution::Resolved(candidate) => {
            assert_eq!(candidate.name, "Acme Tech Nigeria");
            assert_eq!(candidate.rating, Some(4.5));
            assert_eq!(candidate.reviews, Some(57));
            assert_eq!(candidate.phone.as_deref(), Some("+234 801 234 5678"));
        }
        other => panic!("expected resolved candidate, got {:?}", other),
    }
}

/// 名称与地址都不含身份令牌的候选被降级为未找到
#[tokio::test]
async fn test_mismatched_candidate_fails_keyword_verification() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Unrelated Store", "99 Elm St, Springfield").await;
    mount_details(&server, "Unrelated Store", "99 Elm St, Springfield").await;

    let resolver = resolver_for(&server);
    let input = helpers::sample_input("https://acmetech.ng");
    let tokens = vec!["acme".to_string(), "acmetech".to_string()];

    let resolution = resolver.resolve(&input, &tokens).await;

    assert_eq!(
        resolution,
        ListingResolution::NotFound {
            reason: "candidate failed keyword verification".to_string()
        }
    );
}

/// 文本搜索返回非OK状态
#[tokio::test]
async fn test_zero_results_status_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let input = helpers::sample_input("https://acmetech.ng");

    let resolution = resolver.resolve(&input, &["acme".to_string()]).await;

    assert_eq!(
        resolution,
        ListingResolution::NotFound {
            reason: "Text Search returned no results".to_string()
        }
    );
}

/// 详情查询失败时收敛到未找到，不返回半填充数据
#[tokio::test]
async fn test_details_failure_converges_to_not_found() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Acme Tech", "12 Marina Rd, Lagos").await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "INVALID_REQUEST"
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let input = helpers::sample_input("https://acmetech.ng");

    let resolution = resolver.resolve(&input, &["acme".to_string()]).await;

    assert_eq!(
        resolution,
        ListingResolution::NotFound {
            reason: "Details lookup failed".to_string()
        }
    );
}
