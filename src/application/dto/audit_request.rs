// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::models::audit_input::AuditInput;

/// 审计请求校验错误
#[derive(Debug, Error)]
pub enum AuditRequestError {
    #[error("validation failed")]
    Rules(#[from] ValidationErrors),
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// 单值或列表形式的位置字段
///
/// `"Lagos"` 与 `["Lagos"]` 反序列化后完全等价
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StringOrVec {
    Single(String),
    Multiple(Vec<String>),
}

impl StringOrVec {
    /// 归一化为列表（过滤空白项）
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrVec::Single(value) => {
                if value.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![value]
                }
            }
            StringOrVec::Multiple(values) => values
                .into_iter()
                .filter(|value| !value.trim().is_empty())
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            StringOrVec::Single(value) => value.trim().is_empty(),
            StringOrVec::Multiple(values) => {
                values.iter().all(|value| value.trim().is_empty())
            }
        }
    }
}

/// 审计请求数据传输对象
///
/// 封装客户端发起的商家可见度审计请求的相关参数
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AuditRequestDto {
    /// 商家网站完整URL
    #[validate(url(message = "website_url must be an absolute URL"))]
    pub website_url: String,
    /// 商家名称
    #[validate(length(min = 1, message = "business_name is required"))]
    pub business_name: String,
    /// 行业
    #[validate(length(min = 1, message = "industry is required"))]
    pub industry: String,
    /// 国家（字符串或数组）
    pub country: StringOrVec,
    /// 城市（字符串或数组）
    pub city: StringOrVec,
    /// 目标受众
    #[validate(length(min = 1, message = "target_audience is required"))]
    pub target_audience: String,
    /// 可选的商家描述（用于验证搜索匹配）
    pub description: Option<String>,
    /// 可选的竞争对手网站列表
    #[serde(default)]
    pub competitors: Vec<String>,
    /// 可选的目标关键词列表
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl AuditRequestDto {
    /// 校验并转换为领域输入
    ///
    /// country/city 在此处归一化为列表，下游不再处理单值形式
    pub fn into_audit_input(self) -> Result<AuditInput, AuditRequestError> {
        self.validate()?;

        if self.country.is_empty() {
            return Err(AuditRequestError::MissingField("country"));
        }
        if self.city.is_empty() {
            return Err(AuditRequestError::MissingField("city"));
        }

        Ok(AuditInput {
            website_url: self.website_url,
            business_name: self.business_name,
            industry: self.industry,
            country: self.country.into_vec(),
            city: self.city.into_vec(),
            target_audience: self.target_audience,
            description: self
                .description
                .filter(|description| !description.trim().is_empty()),
            competitors: self.competitors,
            keywords: self.keywords,
        })
    }
}
