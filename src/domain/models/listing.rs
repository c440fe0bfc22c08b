// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 商家列表候选
///
/// 通过地点API解析出的本地商家列表。只有在名称+地址通过
/// 身份令牌验证后才会作为成功结果保留。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingCandidate {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
}

/// 商家列表解析结果（三态）
///
/// `NotFound` 表示检查过但没有可信候选，`Unavailable` 表示
/// 由于缺少凭据等原因根本没有检查。两者对外输出同一个规范的
/// 未找到记录，内部保留区别用于日志和测试断言。
#[derive(Debug, Clone, PartialEq)]
pub enum ListingResolution {
    Resolved(ListingCandidate),
    NotFound { reason: String },
    Unavailable { reason: String },
}

impl ListingResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ListingResolution::Resolved(_))
    }

    pub fn candidate(&self) -> Option<&ListingCandidate> {
        match self {
            ListingResolution::Resolved(candidate) => Some(candidate),
            _ => None,
        }
    }
}
