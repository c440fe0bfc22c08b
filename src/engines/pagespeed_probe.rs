// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::{info, warn};

use crate::engines::probe_runner::ProbeFailure;

/// Lighthouse各类别得分（0.0-1.0）
#[derive(Debug, Clone, Serialize, Default)]
pub struct LighthouseScores {
    pub performance: Option<f64>,
    pub accessibility: Option<f64>,
    pub best_practices: Option<f64>,
    pub seo: Option<f64>,
    pub pwa: Option<f64>,
}

/// Lighthouse性能指标（毫秒）
#[derive(Debug, Clone, Serialize, Default)]
pub struct LighthouseMetrics {
    pub first_contentful_paint_ms: Option<f64>,
    pub largest_contentful_paint_ms: Option<f64>,
    pub speed_index_ms: Option<f64>,
    pub total_blocking_time_ms: Option<f64>,
    pub time_to_interactive_ms: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
}

/// 单个渲染配置的性能报告
#[derive(Debug, Clone, Serialize)]
pub struct LighthouseReport {
    pub preset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub scores: LighthouseScores,
    pub metrics: LighthouseMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Value>,
    pub fetched_at: String,
}

fn audit_numeric(audits: &Value, key: &str) -> Option<f64> {
    audits.get(key)?.get("numericValue")?.as_f64()
}

fn parse_lighthouse_payload(preset: &str, source: Option<&str>, lh: &Value) -> LighthouseReport {
    let categories = lh.get("categories").cloned().unwrap_or(Value::Null);
    let audits = lh.get("audits").cloned().unwrap_or(Value::Null);

    let category_score = |key: &str| -> Option<f64> {
        categories.get(key)?.get("score")?.as_f64()
    };

    LighthouseReport {
        preset: preset.to_string(),
        source: source.map(String::from),
        scores: LighthouseScores {
            performance: category_score("performance"),
            accessibility: category_score("accessibility"),
            best_practices: category_score("best-practices"),
            seo: category_score("seo"),
            pwa: category_score("pwa"),
        },
        metrics: LighthouseMetrics {
            first_contentful_paint_ms: audit_numeric(&audits, "first-contentful-paint"),
            largest_contentful_paint_ms: audit_numeric(&audits, "largest-contentful-paint"),
            speed_index_ms: audit_numeric(&audits, "speed-index"),
            total_blocking_time_ms: audit_numeric(&audits, "total-blocking-time"),
            time_to_interactive_ms: audit_numeric(&audits, "interactive"),
            cumulative_layout_shift: audits
                .get("cumulative-layout-shift")
                .and_then(|a| a.get("numericValue"))
                .and_then(Value::as_f64),
        },
        timing: lh.get("timing").cloned(),
        fetched_at: Utc::now().to_rfc3339(),
    }
}

/// 通过PageSpeed Insights API获取性能指标
///
/// 没有配置API密钥或任何失败时返回None，由调用方回退到本地工具
pub async fn run_pagespeed_api(
    client: &Client,
    api_key: Option<&str>,
    url: &str,
    strategy: &str,
) -> Option<LighthouseReport> {
    let api_key = api_key?;

    let endpoint = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
    let response = client
        .get(endpoint)
        .query(&[
            ("url", url),
            // PSI expects lowercase "mobile" or "desktop"
            ("strategy", strategy),
            ("category", "performance"),
            ("key", api_key),
        ])
        .timeout(Duration::from_secs(180))
        .send()
        .await
        .ok()?;

    if response.status().as_u16() != 200 {
        warn!(
            "PageSpeed API returned status {} for strategy {}",
            response.status(),
            strategy
        );
        return None;
    }

    let body: Value = response.json().await.ok()?;
    let lh = body.get("lighthouseResult")?;

    info!("PageSpeed API metrics fetched for strategy {}", strategy);
    Some(parse_lighthouse_payload(strategy, Some("psi_api"), lh))
}

/// 调用本地lighthouse工具
///
/// 工具缺失、超时或输出不可解析都转为结构化失败对象
pub async fn run_lighthouse_local(
    url: &str,
    preset: &str,
    timeout_secs: u64,
) -> Result<LighthouseReport, ProbeFailure> {
    let mut command = Command::new("lighthouse");
    command
        .arg("--chrome-flags=--headless --no-sandbox --disable-dev-shm-usage")
        .arg(url)
        .arg("--output=json")
        .arg("--output-path=stdout");

    if preset == "desktop" {
        command.arg("--preset=desktop");
    }

    let output = match tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        command.output(),
    )
    .await
    {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return Err(ProbeFailure {
                error: format!("Lighthouse failed to start: {}", err),
                output: None,
            });
        }
        Err(_) => {
            return Err(ProbeFailure {
                error: "Lighthouse timed out".to_string(),
                output: None,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        return Err(ProbeFailure {
            error: "Lighthouse failed".to_string(),
            output: Some(if stderr.is_empty() { stdout } else { stderr }),
        });
    }

    let decoded: Value = match serde_json::from_slice(&output.stdout) {
        Ok(value) => value,
        Err(_) => {
            return Err(ProbeFailure {
                error: "Unable to parse lighthouse output".to_string(),
                output: None,
            });
        }
    };

    Ok(parse_lighthouse_payload(preset, None, &decoded))
}
