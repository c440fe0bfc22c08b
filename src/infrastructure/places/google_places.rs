// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::settings::GooglePlacesSettings;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API status not OK: {0}")]
    BadStatus(String),
    #[error("No results")]
    NoResults,
}

/// 文本搜索返回的候选摘要
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    #[serde(default)]
    pub place_id: String,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
}

/// 地点详情
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<PlaceSummary>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: String,
    result: Option<PlaceDetails>,
}

/// Google Places API客户端
///
/// 封装文本搜索和详情两个端点，状态字段非OK一律视为失败
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    text_search_url: String,
    details_url: String,
}

impl GooglePlacesClient {
    pub fn new(settings: &GooglePlacesSettings) -> Self {
        Self::with_endpoints(settings, TEXT_SEARCH_URL, DETAILS_URL)
    }

    /// 使用自定义端点构造（测试或代理场景）
    pub fn with_endpoints(
        settings: &GooglePlacesSettings,
        text_search_url: &str,
        details_url: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(String::from),
            text_search_url: text_search_url.to_string(),
            details_url: details_url.to_string(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// 文本搜索，只返回第一个候选
    pub async fn text_search_first(&self, query: &str) -> Result<PlaceSummary, PlacesError> {
        let api_key = self.api_key.as_ref().ok_or(PlacesError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.text_search_url)
            .query(&[("query", query), ("key", api_key)])
            .send()
            .await
            .map_err(|e| PlacesError::NetworkError(format!("Text Search request failed: {}", e)))?;

        let body: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::NetworkError(format!("Failed to parse response: {}", e)))?;

        if body.status != "OK" {
            warn!("Places text search status {:?} for query {:?}", body.status, query);
            return Err(PlacesError::BadStatus(body.status));
        }

        body.results
            .into_iter()
            .find(|place| !place.place_id.is_empty())
            .ok_or(PlacesError::NoResults)
    }

    /// 获取地点详情
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let api_key = self.api_key.as_ref().ok_or(PlacesError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.details_url)
            .query(&[
                ("place_id", place_id),
                (
                    "fields",
                    "name,formatted_address,formatted_phone_number,rating,user_ratings_total",
                ),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| PlacesError::NetworkError(format!("Details request failed: {}", e)))?;

        let body: DetailsResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::NetworkError(format!("Failed to parse response: {}", e)))?;

        if body.status != "OK" {
            warn!("Places details status {:?} for place {:?}", body.status, place_id);
            return Err(PlacesError::BadStatus(body.status));
        }

        body.result.ok_or(PlacesError::NoResults)
    }
}
