// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::models::audit_input::AuditInput;
use crate::domain::models::listing::{ListingCandidate, ListingResolution};
use crate::domain::services::identity_tokenizer;
use crate::infrastructure::places::{GooglePlacesClient, PlacesError};

/// 本地商家列表解析器
///
/// 文本搜索只取第一个候选，获取详情后要求名称+地址与身份令牌
/// 有重叠，否则降级为未找到。所有失败分支都收敛到规范的
/// 未找到形态，调用方永远不会拿到半填充的记录。
pub struct ListingResolver {
    places: Arc<GooglePlacesClient>,
}

impl ListingResolver {
    pub fn new(places: Arc<GooglePlacesClient>) -> Self {
        Self { places }
    }

    /// 解析商家列表
    pub async fn resolve(&self, input: &AuditInput, tokens: &[String]) -> ListingResolution {
        if !self.places.has_api_key() {
            return skipped("GOOGLE_PLACES_API_KEY missing");
        }

        let business = input.business_name.trim();
        if business.is_empty() {
            return skipped("Business name missing");
        }

        let location = input.location_query();
        let query = format!("{} {}", business, location).trim().to_string();
        let query = if query.is_empty() {
            business.to_string()
        } else {
            query
        };

        let place = match self.places.text_search_first(&query).await {
            Ok(place) => place,
            Err(PlacesError::MissingApiKey) => {
                return skipped("GOOGLE_PLACES_API_KEY missing");
            }
            Err(PlacesError::NetworkError(reason)) => {
                warn!("Places text search transport failure: {}", reason);
                return ListingResolution::Unavailable {
                    reason: "Text Search request failed".to_string(),
                };
            }
            Err(PlacesError::BadStatus(status)) => {
                warn!("Places text search status {} for query {:?}", status, query);
                return not_found("Text Search returned no results");
            }
            Err(PlacesError::NoResults) => {
                return not_found("No Google Business Profile match");
            }
        };

        let details = match self.places.details(&place.place_id).await {
            Ok(details) => details,
            Err(PlacesError::NetworkError(reason)) => {
                warn!("Places details transport failure: {}", reason);
                return ListingResolution::Unavailable {
                    reason: "Details request failed".to_string(),
                };
            }
            Err(_) => {
                return not_found("Details lookup failed");
            }
        };

        let candidate = ListingCandidate {
            name: details
                .name
                .or(place.name)
                .unwrap_or_else(|| business.to_string()),
            address: details
                .formatted_address
                .or(place.formatted_address)
                .unwrap_or_else(|| "N/A".to_string()),
            phone: details.formatted_phone_number,
            rating: details.rating,
            reviews: details.user_ratings_total,
        };

        if !candidate_matches_tokens(&candidate, tokens) {
            return not_found("candidate failed keyword verification");
        }

        ListingResolution::Resolved(candidate)
    }
}

/// 名称+地址的令牌重叠验证
///
/// 空令牌集合无法验证，按宽松处理直接通过
pub fn candidate_matches_tokens(candidate: &ListingCandidate, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }

    let haystack = format!("{} {}", candidate.name, candidate.address);
    if haystack.trim().is_empty() {
        return false;
    }

    identity_tokenizer::matches_any_token(&haystack, tokens)
}

fn skipped(reason: &str) -> ListingResolution {
    info!("Business listing lookup skipped: {}", reason);
    ListingResolution::Unavailable {
        reason: reason.to_string(),
    }
}

fn not_found(reason: &str) -> ListingResolution {
    info!("Business listing not found: {}", reason);
    ListingResolution::NotFound {
        reason: reason.to_string(),
    }
}
