// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::utils::text_processing;

static TOKEN_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// 关键词条目
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordEntry {
    pub id: usize,
    pub ngram: String,
    pub score: usize,
}

/// 提取页面可见文本中的高频n-gram（1..=max_ngram）
///
/// 停用词被过滤后再组合，按频次降序取前 `top` 个
pub fn extract_keywords(html: &str, max_ngram: usize, top: usize) -> Vec<KeywordEntry> {
    let text = text_processing::strip_tags(html).to_lowercase();
    if text.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = TOKEN_SPLIT_REGEX
        .split(&text)
        .filter(|token| !token.is_empty() && !text_processing::is_stop_word(token))
        .collect();

    let mut scores: HashMap<String, usize> = HashMap::new();
    for n in 1..=max_ngram {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let ngram = window.join(" ");
            *scores.entry(ngram).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = scores.into_iter().collect();
    // Ties resolve alphabetically so output is deterministic
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);

    ranked
        .into_iter()
        .enumerate()
        .map(|(id, (ngram, score))| KeywordEntry { id, ngram, score })
        .collect()
}

/// 提取页面文本摘要（前三句）
pub fn summarize_page(html: &str) -> Option<String> {
    let text = text_processing::strip_tags(html);
    text_processing::summarize_text(&text, 3)
}
