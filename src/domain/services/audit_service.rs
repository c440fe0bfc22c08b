// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument};

use crate::config::settings::Settings;
use crate::domain::models::audit_input::AuditInput;
use crate::domain::models::fetch_result::FetchResult;
use crate::domain::models::report::{
    AiRecommendations, AuditMetadata, AuditOutcome, AuditReport, CompetitiveInsights,
    ContentQuality, GoogleBusinessProfile, ImmediateAction, KeyFindings, PageSpeedEstimate,
    RecommendationPlan, SecurityTrust, SocialMediaPresence, TechnicalSeo, VisibilityScores,
    WebsiteAudit,
};
use crate::domain::models::social::{PlatformSet, Provenance};
use crate::domain::search::engine::SearchProvider;
use crate::domain::services::identity_tokenizer;
use crate::domain::services::listing_resolver::ListingResolver;
use crate::domain::services::recommendation::{RecommendationResult, RecommendationSynthesizer};
use crate::domain::services::scoring;
use crate::domain::services::signal_extractor::{self, ExtractedSignals};
use crate::domain::services::social_resolver::SocialProfileResolver;
use crate::engines::fetch_engine::FetchEngine;
use crate::engines::probe_runner::{OsatChecks, ProbeRunner};
use crate::infrastructure::completion::{self, CompletionProvider};
use crate::infrastructure::metrics;
use crate::infrastructure::places::GooglePlacesClient;
use crate::infrastructure::search::SerperSearchProvider;
use url::Url;

const AUDIT_METHOD: &str = "manual_fetch_with_osat_probes_and_ai_recommendations";

const PRIVACY_PATH_CANDIDATES: [&str; 4] = [
    "/privacy",
    "/privacy-policy",
    "/privacy.html",
    "/privacy-policy.html",
];

const TERMS_PATH_CANDIDATES: [&str; 12] = [
    "/terms",
    "/terms-of-service",
    "/terms-of-use",
    "/terms-and-conditions",
    "/terms-conditions",
    "/legal/terms",
    "/legal",
    "/terms.html",
    "/terms-of-service.html",
    "/terms-of-use.html",
    "/terms-and-conditions.html",
    "/terms-conditions.html",
];

/// 审计编排引擎
///
/// 串联抓取 → 信号提取 → 评分 → 社交/商家解析 → 深度探测 →
/// AI建议的完整流程。每次审计从输入构造全新状态，运行之间
/// 不共享可变数据。
pub struct AuditEngine {
    fetch_engine: Arc<FetchEngine>,
    probe_runner: Arc<ProbeRunner>,
    social_resolver: SocialProfileResolver,
    listing_resolver: ListingResolver,
    synthesizer: RecommendationSynthesizer,
}

impl AuditEngine {
    /// 根据配置装配全部组件
    pub fn new(settings: &Settings) -> Self {
        let fetch_engine = Arc::new(FetchEngine::new(&settings.fetch));
        let probe_runner = Arc::new(ProbeRunner::new(
            fetch_engine.clone(),
            settings.probes.clone(),
        ));
        let search: Arc<dyn SearchProvider> =
            Arc::new(SerperSearchProvider::new(&settings.serper));
        let places = Arc::new(GooglePlacesClient::new(&settings.google_places));
        let provider = completion::from_settings(&settings.completion);

        Self::with_components(fetch_engine, probe_runner, search, places, provider)
    }

    /// 注入自定义组件（测试与定制场景）
    pub fn with_components(
        fetch_engine: Arc<FetchEngine>,
        probe_runner: Arc<ProbeRunner>,
        search: Arc<dyn SearchProvider>,
        places: Arc<GooglePlacesClient>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            fetch_engine,
            probe_runner,
            social_resolver: SocialProfileResolver::new(search),
            listing_resolver: ListingResolver::new(places),
            synthesizer: RecommendationSynthesizer::new(provider),
        }
    }

    /// 运行一次完整审计
    #[instrument(skip(self, input), fields(website = %input.website_url))]
    pub async fn run_comprehensive_audit(&self, input: &AuditInput) -> AuditOutcome {
        metrics::record_audit_started();
        let started = Instant::now();

        let fetch = self.fetch_engine.fetch_website(&input.website_url).await;
        let signals = signal_extractor::extract(&fetch.html_preview);
        let tokens = identity_tokenizer::build_tokens(input);

        let mut report = self.build_manual_audit_results(input, &fetch, &signals, &tokens).await;

        // 深度探测：全部为附加信号，失败不影响支柱评分
        let osat = self.probe_runner.run(&input.website_url).await;

        report.website_audit.technical_seo.page_speed_estimate = PageSpeedEstimate {
            desktop_ms: osat
                .page_speed_ms("desktop")
                .or(fetch.response_time_ms_desktop),
            mobile_ms: osat
                .page_speed_ms("mobile")
                .or(fetch.response_time_ms_mobile),
        };
        report.website_audit.technical_seo.mobile_friendly =
            resolve_mobile_friendly(&osat, &fetch.html_preview, signals.has_viewport_meta);

        report.osat_checks = serde_json::to_value(&osat).ok();

        let ai = self.synthesizer.generate(&report, input).await;
        report.ai_recommendations = Some(AiRecommendations {
            content: Some(ai.recommendations.clone()),
            success: ai.success,
            model_used: ai.model_used.clone(),
            tokens_used: ai.tokens_used.clone(),
            note: ai.note.clone(),
            error: ai.error.clone(),
        });

        let elapsed = started.elapsed().as_secs_f64();
        metrics::record_audit_completed(elapsed);
        info!("Audit completed in {:.2}s", elapsed);

        AuditOutcome {
            success: true,
            audit_results: report,
            metadata: AuditMetadata {
                model_used: ai.model_used.clone(),
                tokens_used: ai.tokens_used.clone(),
                audit_method: AUDIT_METHOD.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                note: build_metadata_note(&ai),
            },
        }
    }

    /// 基于抓取内容构建手动审计结果
    async fn build_manual_audit_results(
        &self,
        input: &AuditInput,
        fetch: &FetchResult,
        signals: &ExtractedSignals,
        tokens: &[String],
    ) -> AuditReport {
        let mut technical_issues: Vec<String> = Vec::new();
        let mut technical_strengths: Vec<String> = Vec::new();

        if fetch.status_code != 200 {
            technical_issues.push(format!("Website returned status {}", fetch.status_code));
        }
        if fetch.has_ssl {
            technical_strengths.push("Valid SSL detected".to_string());
        } else {
            technical_issues.push("SSL not detected".to_string());
        }
        if fetch.has_robots {
            technical_strengths.push("robots.txt present".to_string());
        } else {
            technical_issues.push("robots.txt missing".to_string());
        }
        if fetch.has_sitemap {
            technical_strengths.push("sitemap.xml present".to_string());
        } else {
            technical_issues.push("sitemap.xml missing".to_string());
        }

        let mut content_issues: Vec<String> = Vec::new();
        let mut content_strengths: Vec<String> = Vec::new();

        let has_meta_title = signals.meta_title.is_some();
        let has_meta_description = signals.meta_description.is_some();

        if has_meta_title {
            content_strengths.push("Meta title found".to_string());
        } else {
            content_issues.push("Missing meta title".to_string());
        }
        if has_meta_description {
            content_strengths.push("Meta description found".to_string());
        } else {
            content_issues.push("Missing meta description".to_string());
        }

        let technical_score = scoring::technical_score(fetch);
        let keyword_usage = scoring::resolve_keyword_usage(&signals.text_content, &input.keywords);
        let content_score = scoring::content_score(
            has_meta_title,
            has_meta_description,
            signals.heading_structure,
            keyword_usage,
        );

        let security_trust = self
            .detect_trust_signals(fetch, signals, &input.website_url)
            .await;

        let platforms = self
            .social_resolver
            .resolve(input, &signals.social_links, tokens)
            .await;
        let social_score = scoring::social_score(&platforms);
        let total_platforms = scoring::count_detected_platforms(&platforms);
        let integration_quality = scoring::integration_quality(&platforms).to_string();
        let social_recommendations = build_social_recommendations(&platforms);

        let listing = self.listing_resolver.resolve(input, tokens).await;
        let mut google_business_profile = GoogleBusinessProfile::from_resolution(&listing);
        let local_score = scoring::local_presence_score(&google_business_profile);
        google_business_profile.score = Some(local_score);

        let overall_score = scoring::overall_score(&[
            Some(technical_score),
            Some(content_score),
            social_score,
            Some(local_score),
        ]);
        let grade = scoring::letter_grade(overall_score).to_string();
        let grade_description = scoring::describe_grade(&grade).to_string();

        let strengths: Vec<String> = technical_strengths
            .iter()
            .chain(content_strengths.iter())
            .take(5)
            .cloned()
            .collect();
        let weaknesses: Vec<String> = technical_issues
            .iter()
            .chain(content_issues.iter())
            .take(5)
            .cloned()
            .collect();

        AuditReport {
            website_audit: WebsiteAudit {
                technical_seo: TechnicalSeo {
                    score: technical_score,
                    ssl_valid: fetch.has_ssl,
                    robots_txt_present: fetch.has_robots,
                    sitemap_xml_present: fetch.has_sitemap,
                    page_speed_estimate: PageSpeedEstimate {
                        desktop_ms: fetch.response_time_ms_desktop,
                        mobile_ms: fetch.response_time_ms_mobile,
                    },
                    mobile_friendly: None,
                    issues: technical_issues,
                    strengths: technical_strengths,
                },
                content_quality: ContentQuality {
                    score: content_score,
                    has_meta_title,
                    has_meta_description,
                    meta_title: signals.meta_title.clone(),
                    meta_description: signals.meta_description.clone(),
                    keyword_usage,
                    issues: content_issues,
                    strengths: content_strengths,
                },
                security_trust,
            },
            social_media_presence: SocialMediaPresence {
                business_name: input.business_name.clone(),
                website: input.website_url.clone(),
                platforms,
                social_score,
                total_platforms,
                integration_quality,
                recommendations: social_recommendations,
            },
            google_business_profile,
            visibility_scores: VisibilityScores {
                website_audit: technical_score,
                content_quality: content_score,
                social_media_presence: social_score.unwrap_or(0),
                google_business_profile: local_score,
                overall_visibility_score: overall_score,
                grade,
                grade_description,
            },
            key_findings: KeyFindings {
                strengths,
                weaknesses,
                opportunities: vec![
                    "Use SERPER social matches and Google Places data to expand visibility signals"
                        .to_string(),
                ],
                threats: vec![],
            },
            recommendations: RecommendationPlan {
                immediate_actions: vec![ImmediateAction {
                    priority: "medium".to_string(),
                    category: "technical".to_string(),
                    action: "Resolve missing robots.txt/sitemap if absent".to_string(),
                    impact: "medium".to_string(),
                    effort: "low".to_string(),
                    description: "Ensure basic crawlability files exist to improve technical SEO."
                        .to_string(),
                }],
                short_term_strategy: vec![
                    "Link SERPER-detected social profiles across the website and verify GBP data."
                        .to_string(),
                ],
                long_term_strategy: vec![
                    "Decide which verified channels to promote and keep GBP reviews flowing."
                        .to_string(),
                ],
                quick_wins: vec![
                    "Add meta title and description if missing".to_string(),
                    "Increase on-page copy for key pages".to_string(),
                    "Add social icons that point to verified profiles".to_string(),
                ],
            },
            competitive_insights: CompetitiveInsights {
                market_position_estimate: "unknown".to_string(),
                differentiation_opportunities: vec![],
                competitive_advantages: vec![],
                areas_for_improvement: vec![
                    "Expand Google Business signals and cross-link social profiles".to_string(),
                ],
            },
            website_fetch: fetch.clone(),
            osat_checks: None,
            ai_recommendations: None,
        }
    }

    /// 信任信号检测
    ///
    /// 正则优先，未命中时按约定路径做存在性探测；条款最后还会
    /// 尝试从HTML中发现链接并跟进验证。
    async fn detect_trust_signals(
        &self,
        fetch: &FetchResult,
        signals: &ExtractedSignals,
        base_url: &str,
    ) -> SecurityTrust {
        if fetch.html_preview.is_empty() {
            return SecurityTrust {
                score: None,
                ssl_certificate: fetch.has_ssl,
                privacy_policy_found: None,
                terms_conditions_found: None,
                contact_info_visible: None,
                issues: vec![
                    "Trust signals not fully evaluated in manual fetch-only mode".to_string(),
                ],
            };
        }

        let base = Url::parse(base_url).ok();

        let mut privacy = signals.privacy_mentioned;
        if !privacy {
            if let Some(base) = &base {
                for path in PRIVACY_PATH_CANDIDATES {
                    if let Ok(candidate) = base.join(path) {
                        if self.fetch_engine.resource_exists(candidate.as_str()).await {
                            privacy = true;
                            break;
                        }
                    }
                }
            }
        }

        let mut terms = signals.terms_mentioned;
        if !terms {
            if let Some(base) = &base {
                for path in TERMS_PATH_CANDIDATES {
                    if let Ok(candidate) = base.join(path) {
                        if self.fetch_engine.resource_exists(candidate.as_str()).await {
                            terms = true;
                            break;
                        }
                    }
                }
            }
        }

        if !terms {
            if let Some(base) = &base {
                if let Some(href) = signal_extractor::extract_link_by_keyword(
                    &fetch.html_preview,
                    &["terms", "terms-of-service", "terms-and-conditions"],
                ) {
                    if let Some(resolved) = crate::utils::url_utils::resolve_href(base, &href) {
                        if self.fetch_engine.resource_exists(resolved.as_str()).await {
                            terms = true;
                        }
                    }
                }
            }
        }

        let contact = signals.contact_info_visible;
        let score = scoring::trust_score(fetch.has_ssl, privacy, terms, contact);

        let mut issues: Vec<String> = Vec::new();
        if !fetch.has_ssl {
            issues.push("SSL not detected".to_string());
        }
        if !privacy {
            issues.push("Privacy policy not detected in HTML".to_string());
        }
        if !terms {
            issues.push("Terms & conditions not detected in HTML".to_string());
        }
        if !contact {
            issues.push("Contact info (email/phone) not detected in HTML".to_string());
        }

        SecurityTrust {
            score,
            ssl_certificate: fetch.has_ssl,
            privacy_policy_found: Some(privacy),
            terms_conditions_found: Some(terms),
            contact_info_visible: Some(contact),
            issues,
        }
    }
}

/// 按平台来源生成社交建议
fn build_social_recommendations(platforms: &PlatformSet) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    for (platform, m) in platforms.iter() {
        let line = match m.source {
            Provenance::None => format!(
                "Claim and optimize your {} profile, then add it to your website.",
                platform.name()
            ),
            Provenance::Search => format!(
                "Link the {} profile from your website to strengthen trust signals.",
                platform.name()
            ),
            Provenance::Website => continue,
        };

        if !recommendations.contains(&line) {
            recommendations.push(line);
        }
    }

    if recommendations.is_empty() {
        recommendations.push("Maintain consistent posting on active social channels.".to_string());
    }

    recommendations
}

/// 移动端友好判定
///
/// lighthouse移动性能得分优先（≥0.5为友好），其次viewport标签，
/// 没有HTML时无法判定
fn resolve_mobile_friendly(
    osat: &OsatChecks,
    html_preview: &str,
    has_viewport_meta: bool,
) -> Option<bool> {
    if let Some(performance) = osat.mobile_performance_score() {
        return Some(performance >= 0.5);
    }

    if !html_preview.is_empty() {
        return Some(has_viewport_meta);
    }

    None
}

/// 构建元数据备注
fn build_metadata_note(ai: &RecommendationResult) -> String {
    let base = "Social media discovery leverages website parsing + SERPER; Google Business \
Profile detection via Places API. OSAT-style probes added \
(lighthouse/security/extractor/sitemap/internal/keywords). ";

    if ai.success {
        format!("{}AI recommendations generated via OpenAI.", base)
    } else {
        let fallback = ai
            .note
            .clone()
            .or_else(|| ai.error.clone())
            .unwrap_or_else(|| "AI recommendations unavailable.".to_string());
        format!("{}AI recommendations fallback: {}", base, fallback)
    }
}
