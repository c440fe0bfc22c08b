// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let addr: SocketAddr = "0.0.0.0:9000".parse().expect("Invalid metrics address");

    // Start the exporter
    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
    }

    info!("Metrics exporter listening on {}", addr);
}

/// 记录一次审计开始
pub fn record_audit_started() {
    metrics::counter!("auditrs_audits_started_total").increment(1);
}

/// 记录一次审计完成
pub fn record_audit_completed(elapsed_secs: f64) {
    metrics::counter!("auditrs_audits_completed_total").increment(1);
    metrics::histogram!("auditrs_audit_duration_seconds").record(elapsed_secs);
}

/// 记录一次审计失败
pub fn record_audit_failed() {
    metrics::counter!("auditrs_audits_failed_total").increment(1);
}
