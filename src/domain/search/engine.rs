// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::SearchResult;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search provider error: {0}")]
    ProviderError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API key not configured")]
    MissingApiKey,
    #[error("Timeout")]
    Timeout,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search and return organic results in ranking order
    async fn search(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Get the name of the search provider
    fn name(&self) -> &'static str;
}
