// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 审计服务（audit_service）：编排完整的审计流程
/// - 身份分词（identity_tokenizer）：商家身份令牌的归一化与构建
/// - 商家解析（listing_resolver）：本地商家列表的解析与验证
/// - 建议合成（recommendation）：AI验证判定的生成与降级
/// - 评分（scoring）：各支柱分数与总评的纯函数计算
/// - 信号提取（signal_extractor）：HTML页面信号的正则与DOM提取
/// - 社交解析（social_resolver）：社交平台档案的解析与验证
///
/// 领域服务与应用程序服务的区别在于：领域服务包含纯粹的业务逻辑，
/// 而应用程序服务负责协调和编排，可能包含技术实现细节。
pub mod audit_service;
pub mod identity_tokenizer;
pub mod listing_resolver;
pub mod recommendation;
pub mod scoring;
pub mod signal_extractor;
pub mod social_resolver;
