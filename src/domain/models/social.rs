// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 未找到平台时的URL占位值
pub const NOT_FOUND_URL: &str = "NOT FOUND";

/// 固定审计的社交平台集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 6] = [
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Youtube,
        SocialPlatform::Tiktok,
    ];

    /// 平台的规范域名（twitter 规范域为 x.com，twitter.com 同样接受）
    pub fn domain(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook.com",
            SocialPlatform::Instagram => "instagram.com",
            SocialPlatform::Twitter => "x.com",
            SocialPlatform::Linkedin => "linkedin.com",
            SocialPlatform::Youtube => "youtube.com",
            SocialPlatform::Tiktok => "tiktok.com",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Tiktok => "tiktok",
        }
    }
}

/// 匹配来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// 从商家自己的网站解析出的链接
    Website,
    /// 通过外部搜索API找到
    Search,
    /// 未找到
    None,
}

/// 置信度等级（由来源机械推导）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Low,
    None,
}

/// 单个平台的解析结果
///
/// 不变量：来源为 website 时置信度必为 HIGH；来源为 none 时
/// URL必为占位值且置信度必为 NONE。构造函数强制维持该约束。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformMatch {
    pub url: String,
    pub source: Provenance,
    pub confidence: Confidence,
}

impl PlatformMatch {
    pub fn from_website(url: String) -> Self {
        Self {
            url,
            source: Provenance::Website,
            confidence: Confidence::High,
        }
    }

    pub fn from_search(url: String) -> Self {
        Self {
            url,
            source: Provenance::Search,
            confidence: Confidence::Low,
        }
    }

    pub fn not_found() -> Self {
        Self {
            url: NOT_FOUND_URL.to_string(),
            source: Provenance::None,
            confidence: Confidence::None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.source != Provenance::None && !self.url.is_empty() && self.url != NOT_FOUND_URL
    }
}

/// 全部六个平台的解析结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformSet {
    pub facebook: PlatformMatch,
    pub instagram: PlatformMatch,
    pub twitter: PlatformMatch,
    pub linkedin: PlatformMatch,
    pub youtube: PlatformMatch,
    pub tiktok: PlatformMatch,
}

impl PlatformSet {
    pub fn all_not_found() -> Self {
        Self {
            facebook: PlatformMatch::not_found(),
            instagram: PlatformMatch::not_found(),
            twitter: PlatformMatch::not_found(),
            linkedin: PlatformMatch::not_found(),
            youtube: PlatformMatch::not_found(),
            tiktok: PlatformMatch::not_found(),
        }
    }

    pub fn get(&self, platform: SocialPlatform) -> &PlatformMatch {
        match platform {
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Linkedin => &self.linkedin,
            SocialPlatform::Youtube => &self.youtube,
            SocialPlatform::Tiktok => &self.tiktok,
        }
    }

    pub fn set(&mut self, platform: SocialPlatform, m: PlatformMatch) {
        match platform {
            SocialPlatform::Facebook => self.facebook = m,
            SocialPlatform::Instagram => self.instagram = m,
            SocialPlatform::Twitter => self.twitter = m,
            SocialPlatform::Linkedin => self.linkedin = m,
            SocialPlatform::Youtube => self.youtube = m,
            SocialPlatform::Tiktok => self.tiktok = m,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SocialPlatform, &PlatformMatch)> {
        SocialPlatform::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}
