// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：审计输入、抓取结果、社交匹配、报告等核心实体
/// - 搜索（search）：外部搜索提供商的抽象接口
/// - 服务（services）：信号提取、身份分词、解析器、评分和编排逻辑
///
/// 领域层是系统的核心，不依赖于任何外部实现，
/// 体现了纯粹的业务逻辑和业务规则。
pub mod models;
pub mod search;
pub mod services;
