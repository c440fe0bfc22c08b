// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::domain::services::audit_service::AuditEngine;
use crate::presentation::handlers::audit_handler::{self, AuditHandlerState};

/// 构建API路由
pub fn api_routes(engine: Arc<AuditEngine>) -> Router {
    let state = AuditHandlerState { engine };

    Router::new()
        .route("/api/audit/run", post(audit_handler::run_audit))
        .route("/health", get(audit_handler::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
