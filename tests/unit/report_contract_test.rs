// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use auditrs::domain::models::listing::{ListingCandidate, ListingResolution};
use auditrs::domain::models::report::{GoogleBusinessProfile, NumberOrNa};
use auditrs::domain::models::social::{PlatformMatch, PlatformSet};
use serde_json::json;

/// 平台映射的JSON契约
///
/// 对外输出必须保持 url/source/confidence 三字段及其标签值
#[test]
fn test_platform_set_json_contract() {
    let mut platforms = PlatformSet::all_not_found();
    platforms.facebook = PlatformMatch::from_website("https://facebook.com/acme".to_string());
    platforms.instagram = PlatformMatch::from_search("https://instagram.com/acme".to_string());

    let value = serde_json::to_value(&platforms).unwrap();

    assert_eq!(
        value["facebook"],
        json!({"url": "https://facebook.com/acme", "source": "website", "confidence": "HIGH"})
    );
    assert_eq!(
        value["instagram"],
        json!({"url": "https://instagram.com/acme", "source": "search", "confidence": "LOW"})
    );
    assert_eq!(
        value["tiktok"],
        json!({"url": "NOT FOUND", "source": "none", "confidence": "NONE"})
    );

    // 全部六个平台必须出现
    for platform in ["facebook", "instagram", "twitter", "linkedin", "youtube", "tiktok"] {
        assert!(value.get(platform).is_some(), "missing platform {}", platform);
    }
}

/// 商家档案的JSON契约
///
/// found为YES/NO，缺失的数值字段序列化为"N/A"
#[test]
fn test_google_business_profile_json_contract() {
    let resolved = ListingResolution::Resolved(ListingCandidate {
        name: "Acme Tech".to_string(),
        address: "12 Marina Rd, Lagos".to_string(),
        phone: None,
        rating: Some(4.5),
        reviews: None,
    });

    let mut profile = GoogleBusinessProfile::from_resolution(&resolved);
    profile.score = Some(64);
    let value = serde_json::to_value(&profile).unwrap();

    assert_eq!(value["found"], "YES");
    assert_eq!(value["name"], "Acme Tech");
    assert_eq!(value["phone"], "N/A");
    assert_eq!(value["rating"], 4.5);
    assert_eq!(value["reviews"], "N/A");
    assert_eq!(value["confidence"], "very_high");
    assert_eq!(value["score"], 64);

    let not_found = serde_json::to_value(GoogleBusinessProfile::not_found()).unwrap();
    assert_eq!(not_found["found"], "NO");
    assert_eq!(not_found["rating"], "N/A");
    assert_eq!(not_found["confidence"], "low");
}

/// 内部三态在报告边界被扁平化
#[test]
fn test_tri_state_flattens_at_the_report_boundary() {
    let unavailable = ListingResolution::Unavailable {
        reason: "GOOGLE_PLACES_API_KEY missing".to_string(),
    };
    let not_found = ListingResolution::NotFound {
        reason: "candidate failed keyword verification".to_string(),
    };

    // 内部保持可区分
    assert_ne!(unavailable, not_found);

    // 对外输出不可区分
    assert_eq!(
        serde_json::to_value(GoogleBusinessProfile::from_resolution(&unavailable)).unwrap(),
        serde_json::to_value(GoogleBusinessProfile::from_resolution(&not_found)).unwrap()
    );
}

/// 数值或占位的序列化
#[test]
fn test_number_or_na_round_trip() {
    assert_eq!(serde_json::to_value(NumberOrNa::Number(57.0)).unwrap(), json!(57.0));
    assert_eq!(serde_json::to_value(NumberOrNa::na()).unwrap(), json!("N/A"));

    let parsed: NumberOrNa = serde_json::from_value(json!(4.2)).unwrap();
    assert_eq!(parsed, NumberOrNa::Number(4.2));
    let parsed: NumberOrNa = serde_json::from_value(json!("N/A")).unwrap();
    assert_eq!(parsed, NumberOrNa::na());
}
