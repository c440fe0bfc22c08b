// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 外部服务客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Provider status: {0}")]
    ProviderStatus(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::NetworkError(err.to_string())
    }
}
