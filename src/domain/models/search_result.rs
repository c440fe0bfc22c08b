// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 外部搜索API返回的单条自然结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub position: Option<u32>,
}

impl SearchResult {
    pub fn new(title: String, url: String, description: Option<String>) -> Self {
        Self {
            title,
            url,
            description,
            position: None,
        }
    }
}
