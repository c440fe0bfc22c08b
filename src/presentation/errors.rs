// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::application::dto::audit_request::AuditRequestError;

/// API错误类型
///
/// 验证失败映射为422，其余未预期错误映射为500；
/// 两者都保持 `{success: false, message, ...}` 的响应形态
#[derive(Debug)]
pub enum ApiError {
    Validation(Value),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let body = Json(json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(json!({
                    "success": false,
                    "message": "Audit failed",
                    "error": message,
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<AuditRequestError> for ApiError {
    fn from(err: AuditRequestError) -> Self {
        match err {
            AuditRequestError::Rules(errors) => ApiError::Validation(
                serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
            ),
            AuditRequestError::MissingField(field) => {
                ApiError::Validation(json!({ field: [{ "code": "required" }] }))
            }
        }
    }
}
