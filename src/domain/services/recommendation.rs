// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;
use url::Url;

use crate::domain::models::audit_input::AuditInput;
use crate::domain::models::report::AuditReport;
use crate::domain::models::social::{Provenance, NOT_FOUND_URL};
use crate::infrastructure::completion::CompletionProvider;
use crate::utils::errors::ClientError;

const SYSTEM_PROMPT: &str = "You are a strict verification assistant. Only determine whether \
social media or Google Business listings belong to the provided business. Use short verdicts \
like \"Instagram is verified via website\" or \"TikTok page does not belong to this business.\" \
Never mention SEO, HTML, or other data.";

const FALLBACK_TEXT: &str = "AI verification temporarily unavailable.
- Facebook: NOT CHECKED
- Instagram: NOT CHECKED
- Twitter: NOT CHECKED
- LinkedIn: NOT CHECKED
- YouTube: NOT CHECKED
- TikTok: NOT CHECKED
- Google Business Profile: NOT CHECKED";

/// AI建议生成结果
#[derive(Debug, Clone)]
pub struct RecommendationResult {
    pub success: bool,
    pub recommendations: String,
    pub model_used: Option<String>,
    pub tokens_used: Option<Value>,
    pub note: Option<String>,
    pub error: Option<String>,
}

/// 建议合成器
///
/// 将业务身份与已计算的报告编入验证提示词发送给补全提供商。
/// 密钥缺失或任何失败都回退到静态文案并标记 success=false，
/// 整体审计仍然成功返回。
pub struct RecommendationSynthesizer {
    provider: Arc<dyn CompletionProvider>,
}

impl RecommendationSynthesizer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// 基于审计报告生成验证判定
    pub async fn generate(&self, report: &AuditReport, input: &AuditInput) -> RecommendationResult {
        let prompt = build_prompt(report, input);

        match self.provider.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(response) => RecommendationResult {
                success: true,
                recommendations: if response.content.is_empty() {
                    "No recommendations generated".to_string()
                } else {
                    response.content
                },
                model_used: Some(response.model_used),
                tokens_used: response.tokens_used,
                note: None,
                error: None,
            },
            Err(ClientError::MissingApiKey(_)) => fallback(),
            Err(err) => {
                error!("Completion API error: {}", err);
                RecommendationResult {
                    success: false,
                    recommendations: FALLBACK_TEXT.to_string(),
                    model_used: None,
                    tokens_used: None,
                    note: None,
                    error: Some(format!("Failed to generate AI recommendations: {}", err)),
                }
            }
        }
    }
}

fn fallback() -> RecommendationResult {
    RecommendationResult {
        success: false,
        recommendations: FALLBACK_TEXT.to_string(),
        model_used: None,
        tokens_used: None,
        note: Some("AI verification unavailable. Using fallback verdicts.".to_string()),
        error: None,
    }
}

/// 构建身份验证提示词
///
/// 网站来源的档案列为已验证，其余列为待核实候选；
/// NOT OWNED与NOT FOUND是两种不同判定。
pub fn build_prompt(report: &AuditReport, input: &AuditInput) -> String {
    let domain = Url::parse(&input.website_url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_else(|| input.website_url.clone());

    let description = input
        .description
        .as_deref()
        .unwrap_or("Not provided")
        .to_string();
    let cities = if input.city.is_empty() {
        "N/A".to_string()
    } else {
        input.city.join(", ")
    };
    let countries = if input.country.is_empty() {
        "N/A".to_string()
    } else {
        input.country.join(", ")
    };

    let mut trusted: Vec<String> = Vec::new();
    let mut unverified: Vec<String> = Vec::new();

    for (platform, m) in report.social_media_presence.platforms.iter() {
        if m.url.is_empty() || m.url == NOT_FOUND_URL {
            continue;
        }

        let label = platform.name().to_uppercase();
        match m.source {
            Provenance::Website => trusted.push(format!("- {}: {}", label, m.url)),
            Provenance::Search => {
                unverified.push(format!("- {}: {} | Status: unverified", label, m.url))
            }
            Provenance::None => {}
        }
    }

    let trusted_block = if trusted.is_empty() {
        "- None\n".to_string()
    } else {
        format!("{}\n", trusted.join("\n"))
    };

    let unverified_block = if unverified.is_empty() {
        "- None\n".to_string()
    } else {
        format!("{}\n", unverified.join("\n"))
    };

    let gbp = &report.google_business_profile;
    let gbp_block = if gbp.is_found() && gbp.name != "N/A" {
        let rating = serde_json::to_string(&gbp.rating).unwrap_or_else(|_| "\"N/A\"".to_string());
        let reviews = serde_json::to_string(&gbp.reviews).unwrap_or_else(|_| "\"N/A\"".to_string());
        format!(
            "- {} ({}) | Phone: {} | Rating: {} ({} reviews)\n",
            gbp.name,
            gbp.address,
            gbp.phone,
            rating.trim_matches('"'),
            reviews.trim_matches('"'),
        )
    } else {
        "- None\n".to_string()
    };

    format!(
        r#"You verify whether discovered social profiles and Google Business listings truly belong to a business.

Business:
- Name: {business_name}
- Domain: {domain}
- Description: {description}
- Location: {cities}, {countries}

Trusted (linked from website – already verified):
{trusted_block}
Unverified social/GBP candidates:
{unverified_block}
Google Business Profile candidate:
{gbp_block}
Rules:
1. Profiles linked from the official website are VERIFIED automatically.
2. For every other record, compare the business name, description, domain, and location before deciding.
3. If the name or location clearly does not match, respond with "NOT OWNED".
4. If there is no confident match, respond with "NOT FOUND".
5. NEVER assume ownership without evidence.

Output:
- Provide one short verdict per record (e.g., "Instagram is verified via website", "TikTok page does not belong to this business", "No Google Business Profile exists").
- No explanations unless explicitly requested.
- Ignore all technical/SEO/performance data."#,
        business_name = input.business_name,
        domain = domain,
        description = description,
        cities = cities,
        countries = countries,
        trusted_block = trusted_block,
        unverified_block = unverified_block,
        gbp_block = gbp_block,
    )
}
