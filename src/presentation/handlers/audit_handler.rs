// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::application::dto::audit_request::AuditRequestDto;
use crate::domain::services::audit_service::AuditEngine;
use crate::infrastructure::metrics;
use crate::presentation::errors::ApiError;

/// 处理器共享状态
#[derive(Clone)]
pub struct AuditHandlerState {
    pub engine: Arc<AuditEngine>,
}

/// 运行商家可见度审计
///
/// POST /api/audit/run
///
/// 校验失败返回422；审计过程中的未预期错误被最外层边界捕获并
/// 转为500的通用失败响应；其余一切降级都包含在200的完整报告里。
pub async fn run_audit(
    State(state): State<AuditHandlerState>,
    Json(payload): Json<AuditRequestDto>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();

    let input = payload.into_audit_input().map_err(ApiError::from)?;

    let engine = state.engine.clone();
    let task_input = input.clone();
    let outcome = tokio::spawn(async move { engine.run_comprehensive_audit(&task_input).await })
        .await
        .map_err(|join_error| {
            metrics::record_audit_failed();
            error!("Audit task failed unexpectedly: {}", join_error);
            ApiError::Internal("Audit task failed unexpectedly".to_string())
        })?;

    let execution_time = format!("{:.2} seconds", started.elapsed().as_secs_f64());

    let mut metadata =
        serde_json::to_value(&outcome.metadata).unwrap_or_else(|_| json!({}));
    if let Some(object) = metadata.as_object_mut() {
        object.insert("execution_time".to_string(), json!(execution_time));
    }

    let message = if outcome.success {
        "AI-powered audit completed successfully"
    } else {
        "Audit completed with fallback data (OpenAI API key not configured)"
    };

    Ok(Json(json!({
        "success": outcome.success,
        "message": message,
        "input": input,
        "audit_results": outcome.audit_results,
        "metadata": metadata,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// 健康检查
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
