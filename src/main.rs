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

use std::sync::Arc;

use auditrs::config::settings::Settings;
use auditrs::domain::services::audit_service::AuditEngine;
use auditrs::presentation::routes;
use auditrs::utils::telemetry;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting auditrs...");

    // Initialize Prometheus Metrics
    auditrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.serper.api_key.is_none() {
        info!("SERPER API key not configured; social search degraded to website parsing only");
    }
    if settings.google_places.api_key.is_none() {
        info!("Google Places API key not configured; business listing detection disabled");
    }

    // 3. Assemble the audit engine
    let engine = Arc::new(AuditEngine::new(&settings));
    info!("Audit engine initialized");

    // 4. Start HTTP server
    let app = routes::api_routes(engine);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
