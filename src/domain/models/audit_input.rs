// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 审计输入
///
/// 一次审计运行的完整输入契约。`country`/`city` 在进入领域层之前
/// 已经归一化为列表，下游不再区分单值和多值形式。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditInput {
    pub website_url: String,
    pub business_name: String,
    pub industry: String,
    pub country: Vec<String>,
    pub city: Vec<String>,
    pub target_audience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl AuditInput {
    /// 构建位置查询字符串（城市 + 国家，空格连接）
    pub fn location_query(&self) -> String {
        let cities = self
            .city
            .iter()
            .filter(|c| !c.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let countries = self
            .country
            .iter()
            .filter(|c| !c.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        format!("{} {}", cities.trim(), countries.trim())
            .trim()
            .to_string()
    }

    /// 搜索API的国家参数（取第一个国家，缺失时回退为 "us"）
    pub fn search_country(&self) -> String {
        self.country
            .iter()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
            .map(|c| c.to_string())
            .unwrap_or_else(|| "us".to_string())
    }
}
