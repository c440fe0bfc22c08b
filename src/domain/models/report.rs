// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::fetch_result::FetchResult;
use crate::domain::models::listing::ListingResolution;
use crate::domain::models::social::PlatformSet;

/// 页面速度估算（毫秒）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageSpeedEstimate {
    pub desktop_ms: Option<f64>,
    pub mobile_ms: Option<f64>,
}

/// 标题结构等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStructure {
    Good,
    Fair,
    Poor,
}

impl Default for HeadingStructure {
    fn default() -> Self {
        HeadingStructure::Poor
    }
}

/// 关键词使用等级
///
/// `Unknown`（未提供关键词）与 `Poor`（提供了但零命中）在评分上
/// 等价，但在报告中保留不同标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordUsage {
    Good,
    Fair,
    Poor,
    Unknown,
}

/// 技术SEO部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicalSeo {
    pub score: i32,
    pub ssl_valid: bool,
    pub robots_txt_present: bool,
    pub sitemap_xml_present: bool,
    pub page_speed_estimate: PageSpeedEstimate,
    pub mobile_friendly: Option<bool>,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

/// 内容质量部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentQuality {
    pub score: i32,
    pub has_meta_title: bool,
    pub has_meta_description: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keyword_usage: KeywordUsage,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

/// 安全与信任部分
///
/// 零信任信号时 `score` 为 null，表示"无法评分"而非"零分"。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityTrust {
    pub score: Option<i32>,
    pub ssl_certificate: bool,
    pub privacy_policy_found: Option<bool>,
    pub terms_conditions_found: Option<bool>,
    pub contact_info_visible: Option<bool>,
    pub issues: Vec<String>,
}

/// 网站审计部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebsiteAudit {
    pub technical_seo: TechnicalSeo,
    pub content_quality: ContentQuality,
    pub security_trust: SecurityTrust,
}

/// 社交媒体部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialMediaPresence {
    pub business_name: String,
    pub website: String,
    pub platforms: PlatformSet,
    pub social_score: Option<i32>,
    pub total_platforms: usize,
    pub integration_quality: String,
    pub recommendations: Vec<String>,
}

/// 数值或 "N/A" 占位
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumberOrNa {
    Number(f64),
    Na(String),
}

impl NumberOrNa {
    pub fn na() -> Self {
        NumberOrNa::Na("N/A".to_string())
    }

    pub fn from_opt(value: Option<f64>) -> Self {
        value.map(NumberOrNa::Number).unwrap_or_else(NumberOrNa::na)
    }
}

/// Google商家档案部分（对外的扁平化形态）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleBusinessProfile {
    pub found: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: NumberOrNa,
    pub reviews: NumberOrNa,
    pub confidence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

impl GoogleBusinessProfile {
    /// 规范的未找到记录
    pub fn not_found() -> Self {
        Self {
            found: "NO".to_string(),
            name: "N/A".to_string(),
            address: "N/A".to_string(),
            phone: "N/A".to_string(),
            rating: NumberOrNa::na(),
            reviews: NumberOrNa::na(),
            confidence: "low".to_string(),
            score: None,
        }
    }

    /// 由三态解析结果扁平化为对外形态
    ///
    /// `NotFound` 与 `Unavailable` 在此处折叠为同一个记录。
    pub fn from_resolution(resolution: &ListingResolution) -> Self {
        match resolution {
            ListingResolution::Resolved(candidate) => Self {
                found: "YES".to_string(),
                name: candidate.name.clone(),
                address: candidate.address.clone(),
                phone: candidate
                    .phone
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                rating: NumberOrNa::from_opt(candidate.rating),
                reviews: NumberOrNa::from_opt(candidate.reviews.map(f64::from)),
                confidence: "very_high".to_string(),
                score: None,
            },
            ListingResolution::NotFound { .. } | ListingResolution::Unavailable { .. } => {
                Self::not_found()
            }
        }
    }

    pub fn is_found(&self) -> bool {
        self.found == "YES"
    }
}

/// 可见度评分部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisibilityScores {
    pub website_audit: i32,
    pub content_quality: i32,
    pub social_media_presence: i32,
    pub google_business_profile: i32,
    pub overall_visibility_score: i32,
    pub grade: String,
    pub grade_description: String,
}

/// 关键发现
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KeyFindings {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// 即时行动项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImmediateAction {
    pub priority: String,
    pub category: String,
    pub action: String,
    pub impact: String,
    pub effort: String,
    pub description: String,
}

/// 建议计划
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecommendationPlan {
    pub immediate_actions: Vec<ImmediateAction>,
    pub short_term_strategy: Vec<String>,
    pub long_term_strategy: Vec<String>,
    pub quick_wins: Vec<String>,
}

/// 竞争洞察
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitiveInsights {
    pub market_position_estimate: String,
    pub differentiation_opportunities: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

/// AI建议部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRecommendations {
    pub content: Option<String>,
    pub success: bool,
    pub model_used: Option<String>,
    pub tokens_used: Option<Value>,
    pub note: Option<String>,
    pub error: Option<String>,
}

/// 审计报告
///
/// 返回给调用方的唯一聚合对象，按值持有所有子部分，
/// 审计运行之间不共享任何可变状态。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    pub website_audit: WebsiteAudit,
    pub social_media_presence: SocialMediaPresence,
    pub google_business_profile: GoogleBusinessProfile,
    pub visibility_scores: VisibilityScores,
    pub key_findings: KeyFindings,
    pub recommendations: RecommendationPlan,
    pub competitive_insights: CompetitiveInsights,
    pub website_fetch: FetchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osat_checks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_recommendations: Option<AiRecommendations>,
}

/// 审计元数据
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditMetadata {
    pub model_used: Option<String>,
    pub tokens_used: Option<Value>,
    pub audit_method: String,
    pub timestamp: String,
    pub note: String,
}

/// 审计引擎的完整返回值
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditOutcome {
    pub success: bool,
    pub audit_results: AuditReport,
    pub metadata: AuditMetadata,
}
