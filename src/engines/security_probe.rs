// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::process::Command;

use crate::engines::probe_runner::ProbeFailure;

/// 响应头条目
#[derive(Debug, Clone, Serialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// 单项安全测试结果
#[derive(Debug, Clone, Serialize)]
pub struct SecurityTest {
    pub name: Option<String>,
    pub pass: Option<bool>,
    pub result: Option<String>,
    pub expectation: Option<String>,
    pub score_description: Option<String>,
}

/// HTTP Observatory安全扫描结果
#[derive(Debug, Clone, Serialize)]
pub struct SecurityScan {
    pub score: Option<i64>,
    pub grade: Option<String>,
    pub status_code: Option<i64>,
    pub tests_failed: Option<i64>,
    pub tests_passed: Option<i64>,
    pub tests_quantity: Option<i64>,
    pub response_headers: Vec<HeaderEntry>,
    pub tests: Vec<SecurityTest>,
    pub fetched_at: String,
}

/// 运行外部HTTP Observatory扫描
///
/// 工具缺失、超时或输出不可解析都转为结构化失败对象
pub async fn run_security_scan(url: &str, timeout_secs: u64) -> Result<SecurityScan, ProbeFailure> {
    let mut command = Command::new("httpobs-cli");
    command.arg("-d").arg(url);

    let output = match tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        command.output(),
    )
    .await
    {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return Err(ProbeFailure {
                error: format!("HTTP Observatory failed to start: {}", err),
                output: None,
            });
        }
        Err(_) => {
            return Err(ProbeFailure {
                error: "HTTP Observatory timed out".to_string(),
                output: None,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        return Err(ProbeFailure {
            error: "HTTP Observatory failed".to_string(),
            output: Some(if stderr.is_empty() { stdout } else { stderr }),
        });
    }

    let raw: Value = match serde_json::from_slice(&output.stdout) {
        Ok(value) => value,
        Err(_) => {
            return Err(ProbeFailure {
                error: "Unable to parse HTTP Observatory output".to_string(),
                output: None,
            });
        }
    };

    Ok(parse_observatory_payload(&raw))
}

fn parse_observatory_payload(raw: &Value) -> SecurityScan {
    let scan = raw.get("scan").cloned().unwrap_or(Value::Null);

    let mut response_headers = Vec::new();
    if let Some(headers) = scan.get("response_headers").and_then(Value::as_object) {
        for (name, value) in headers {
            response_headers.push(HeaderEntry {
                name: name.clone(),
                value: value.as_str().unwrap_or_default().to_string(),
            });
        }
    }

    let mut tests = Vec::new();
    if let Some(raw_tests) = raw.get("tests") {
        let entries: Vec<&Value> = match raw_tests {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            _ => Vec::new(),
        };
        for test in entries {
            tests.push(SecurityTest {
                name: test.get("name").and_then(Value::as_str).map(String::from),
                pass: test.get("pass").and_then(Value::as_bool),
                result: test.get("result").and_then(Value::as_str).map(String::from),
                expectation: test
                    .get("expectation")
                    .and_then(Value::as_str)
                    .map(String::from),
                score_description: test
                    .get("score_description")
                    .and_then(Value::as_str)
                    .map(String::from),
            });
        }
    }

    SecurityScan {
        score: scan.get("score").and_then(Value::as_i64),
        grade: scan.get("grade").and_then(Value::as_str).map(String::from),
        status_code: scan.get("status_code").and_then(Value::as_i64),
        tests_failed: scan.get("tests_failed").and_then(Value::as_i64),
        tests_passed: scan.get("tests_passed").and_then(Value::as_i64),
        tests_quantity: scan.get("tests_quantity").and_then(Value::as_i64),
        response_headers,
        tests,
        fetched_at: Utc::now().to_rfc3339(),
    }
}
