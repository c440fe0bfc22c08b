// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static SCRIPT_STYLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "this", "that", "was", "were", "will", "would", "shall",
    "should", "can", "could", "has", "have", "had", "but", "not", "you", "your", "yours", "their",
    "there", "they", "them", "our", "ours", "his", "her", "hers", "its", "from", "into", "about",
    "after", "before", "over", "under", "again", "further", "then", "once", "here", "when",
    "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "only", "own", "same", "so", "than", "too", "very", "s", "t", "just",
    "don", "now",
];

/// 去除HTML标签，返回可见文本
///
/// 先整体移除script/style块，再剥离其余标签并折叠空白
pub fn strip_tags(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let without_blocks = SCRIPT_STYLE_REGEX.replace_all(html, " ");
    let without_tags = TAG_REGEX.replace_all(&without_blocks, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").to_string()
}

/// 判断是否为停用词
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// 提取文本的前N句作为摘要
pub fn summarize_text(text: &str, sentences: usize) -> Option<String> {
    let collapsed = WHITESPACE_REGEX.replace_all(text.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in collapsed.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            parts.push(current.trim().to_string());
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    let summary: Vec<String> = parts.into_iter().filter(|s| !s.is_empty()).take(sentences).collect();
    if summary.is_empty() {
        None
    } else {
        Some(summary.join(" "))
    }
}
