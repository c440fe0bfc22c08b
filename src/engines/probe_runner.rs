// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::config::settings::ProbeSettings;
use crate::engines::content_probe::{self, HeadingInventory, ImageInventory};
use crate::engines::fetch_engine::{FetchEngine, DESKTOP_USER_AGENT};
use crate::engines::keyword_probe::{self, KeywordEntry};
use crate::engines::link_graph_probe::{self, LinkGraph};
use crate::engines::pagespeed_probe::{self, LighthouseReport};
use crate::engines::security_probe::{self, SecurityScan};
use crate::engines::sitemap_probe::{self, SitemapEntry};

/// 探测失败的结构化表示
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProbeFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// 单项探测的结果
///
/// 失败从不中断审计，序列化为 `{error, output}` 对象
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProbeOutcome<T> {
    Ok(T),
    Failed(ProbeFailure),
}

impl<T> ProbeOutcome<T> {
    pub fn ok(&self) -> Option<&T> {
        match self {
            ProbeOutcome::Ok(value) => Some(value),
            ProbeOutcome::Failed(_) => None,
        }
    }
}

impl<T> From<Result<T, ProbeFailure>> for ProbeOutcome<T> {
    fn from(result: Result<T, ProbeFailure>) -> Self {
        match result {
            Ok(value) => ProbeOutcome::Ok(value),
            Err(failure) => ProbeOutcome::Failed(failure),
        }
    }
}

/// 两种渲染配置的性能报告
#[derive(Debug, Clone, Serialize)]
pub struct LighthousePair {
    pub mobile: ProbeOutcome<LighthouseReport>,
    pub desktop: ProbeOutcome<LighthouseReport>,
}

/// 页面结构提取结果
#[derive(Debug, Clone, Serialize)]
pub struct ExtractorChecks {
    pub headers: HeadingInventory,
    pub images: ImageInventory,
    pub links: BTreeMap<u16, Vec<String>>,
}

/// 探测用页面快照（不保留正文）
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub status_code: u16,
    pub url: String,
    pub html_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 深度探测结果集
///
/// 全部为报告的附加内容，缺失或失败不影响任何支柱评分
#[derive(Debug, Clone, Serialize)]
pub struct OsatChecks {
    pub lighthouse: LighthousePair,
    pub security: ProbeOutcome<SecurityScan>,
    pub extractor: ExtractorChecks,
    pub sitemap: ProbeOutcome<Vec<SitemapEntry>>,
    pub internal_links: ProbeOutcome<LinkGraph>,
    pub keywords: Vec<KeywordEntry>,
    pub summary: Option<String>,
    pub page: PageSnapshot,
}

impl OsatChecks {
    /// 提取指定渲染配置的页面速度（LCP优先，其次Speed Index）
    pub fn page_speed_ms(&self, preset: &str) -> Option<f64> {
        let report = match preset {
            "mobile" => self.lighthouse.mobile.ok(),
            "desktop" => self.lighthouse.desktop.ok(),
            _ => None,
        }?;

        report
            .metrics
            .largest_contentful_paint_ms
            .or(report.metrics.speed_index_ms)
    }

    /// 移动端性能得分（0.0-1.0）
    pub fn mobile_performance_score(&self) -> Option<f64> {
        self.lighthouse.mobile.ok()?.scores.performance
    }
}

/// 深度探测执行器
///
/// 对目标站点一次性运行性能、安全、结构、站点地图、内部链接
/// 和关键词探测。外部工具缺失或出错时产出结构化失败对象。
pub struct ProbeRunner {
    fetch_engine: Arc<FetchEngine>,
    psi_client: Client,
    settings: ProbeSettings,
}

impl ProbeRunner {
    pub fn new(fetch_engine: Arc<FetchEngine>, settings: ProbeSettings) -> Self {
        let psi_client = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(Duration::from_secs(180))
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            fetch_engine,
            psi_client,
            settings,
        }
    }

    /// 一次完整的探测运行
    pub async fn run(&self, url: &str) -> OsatChecks {
        info!("Running deep probes for {}", url);

        let (page_status, html) = self.fetch_engine.fetch_page(url).await;
        let page = PageSnapshot {
            status_code: page_status,
            url: url.to_string(),
            html_length: html.len(),
            error: if page_status == 0 {
                Some("Failed to fetch page".to_string())
            } else {
                None
            },
        };

        let base_url = Url::parse(url).ok();

        let robots_txt = match &base_url {
            Some(base) => match base.join("/robots.txt") {
                Ok(robots_url) => {
                    let (status, body) = self.fetch_engine.fetch_page(robots_url.as_str()).await;
                    if status == 200 && !body.is_empty() {
                        Some(body)
                    } else {
                        None
                    }
                }
                Err(_) => None,
            },
            None => None,
        };

        let lighthouse_mobile = self.run_lighthouse(url, "mobile").await;
        let lighthouse_desktop = self.run_lighthouse(url, "desktop").await;

        let security = security_probe::run_security_scan(url, self.settings.tool_timeout_secs)
            .await
            .into();

        let extractor = match &base_url {
            Some(base) => ExtractorChecks {
                headers: content_probe::extract_headers(&html),
                images: content_probe::extract_images(&html, base),
                links: content_probe::extract_link_status(
                    &self.fetch_engine,
                    &html,
                    base,
                    self.settings.outbound_link_limit,
                )
                .await,
            },
            None => ExtractorChecks {
                headers: content_probe::extract_headers(&html),
                images: ImageInventory::default(),
                links: BTreeMap::new(),
            },
        };

        let sitemap = sitemap_probe::extract_sitemap(&self.fetch_engine, url)
            .await
            .into();

        let internal_links = link_graph_probe::crawl_internal_links(
            &self.fetch_engine,
            url,
            self.settings.internal_link_limit,
            robots_txt.as_deref(),
        )
        .await
        .into();

        let keywords = keyword_probe::extract_keywords(&html, 3, self.settings.keyword_top);
        let summary = keyword_probe::summarize_page(&html);

        debug!("Deep probes completed for {}", url);

        OsatChecks {
            lighthouse: LighthousePair {
                mobile: lighthouse_mobile,
                desktop: lighthouse_desktop,
            },
            security,
            extractor,
            sitemap,
            internal_links,
            keywords,
            summary,
            page,
        }
    }

    /// 单个渲染配置的性能探测（PSI API优先，回退本地工具）
    async fn run_lighthouse(&self, url: &str, preset: &str) -> ProbeOutcome<LighthouseReport> {
        if let Some(report) = pagespeed_probe::run_pagespeed_api(
            &self.psi_client,
            self.settings.pagespeed_api_key.as_deref(),
            url,
            preset,
        )
        .await
        {
            return ProbeOutcome::Ok(report);
        }

        pagespeed_probe::run_lighthouse_local(url, preset, self.settings.tool_timeout_secs)
            .await
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::pagespeed_probe::{LighthouseMetrics, LighthouseScores};

    fn report_with_metrics(lcp: Option<f64>, speed_index: Option<f64>) -> LighthouseReport {
        LighthouseReport {
            preset: "mobile".to_string(),
            source: None,
            scores: LighthouseScores {
                performance: Some(0.6),
                ..Default::default()
            },
            metrics: LighthouseMetrics {
                largest_contentful_paint_ms: lcp,
                speed_index_ms: speed_index,
                ..Default::default()
            },
            timing: None,
            fetched_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn checks_with_mobile(outcome: ProbeOutcome<LighthouseReport>) -> OsatChecks {
        OsatChecks {
            lighthouse: LighthousePair {
                mobile: outcome,
                desktop: ProbeOutcome::Failed(ProbeFailure {
                    error: "Lighthouse failed".to_string(),
                    output: None,
                }),
            },
            security: ProbeOutcome::Failed(ProbeFailure {
                error: "HTTP Observatory failed".to_string(),
                output: None,
            }),
            extractor: ExtractorChecks {
                headers: BTreeMap::new(),
                images: ImageInventory::default(),
                links: BTreeMap::new(),
            },
            sitemap: ProbeOutcome::Failed(ProbeFailure {
                error: "No valid sitemap found".to_string(),
                output: None,
            }),
            internal_links: ProbeOutcome::Failed(ProbeFailure {
                error: "Invalid root URL".to_string(),
                output: None,
            }),
            keywords: Vec::new(),
            summary: None,
            page: PageSnapshot {
                status_code: 0,
                url: "https://example.com".to_string(),
                html_length: 0,
                error: Some("Failed to fetch page".to_string()),
            },
        }
    }

    #[test]
    fn test_page_speed_prefers_lcp_then_speed_index() {
        let checks =
            checks_with_mobile(ProbeOutcome::Ok(report_with_metrics(Some(2100.0), Some(1500.0))));
        assert_eq!(checks.page_speed_ms("mobile"), Some(2100.0));

        let checks = checks_with_mobile(ProbeOutcome::Ok(report_with_metrics(None, Some(1500.0))));
        assert_eq!(checks.page_speed_ms("mobile"), Some(1500.0));

        let checks = checks_with_mobile(ProbeOutcome::Failed(ProbeFailure {
            error: "Lighthouse failed".to_string(),
            output: None,
        }));
        assert_eq!(checks.page_speed_ms("mobile"), None);
        assert_eq!(checks.page_speed_ms("desktop"), None);
    }

    #[test]
    fn test_probe_failure_serialization_shape() {
        let outcome: ProbeOutcome<LighthouseReport> = ProbeOutcome::Failed(ProbeFailure {
            error: "Lighthouse failed".to_string(),
            output: Some("command not found".to_string()),
        });

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "Lighthouse failed");
        assert_eq!(json["output"], "command not found");
    }

    #[test]
    fn test_mobile_performance_score() {
        let checks = checks_with_mobile(ProbeOutcome::Ok(report_with_metrics(None, None)));
        assert_eq!(checks.mobile_performance_score(), Some(0.6));
    }
}
