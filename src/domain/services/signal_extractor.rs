// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::models::report::HeadingStructure;
use crate::domain::models::social::SocialPlatform;
use crate::utils::text_processing;

static TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>([^<]*)</title>").unwrap());
static META_DESCRIPTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]+name=["']description["'][^>]+content=["']([^"']*)["']"#).unwrap()
});
static H1_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1[^>]*>").unwrap());
static H2_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h2[^>]*>").unwrap());
static VIEWPORT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<meta[^>]+name=["']viewport["'][^>]*>"#).unwrap());
static PRIVACY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)privacy\s*(policy|notice|statement)").unwrap());
static TERMS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)terms\s*(of\s*service|conditions|use)").unwrap());
static TERMS_LOOSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)terms").unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}").unwrap()
});
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());
static SOCIAL_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)https?://(www\.)?(facebook|instagram|linkedin|youtube|tiktok|x|twitter)\.com/[^"'<>\s]+"#,
    )
    .unwrap()
});

/// 从HTML中提取的页面信号
///
/// 正则预扫描与DOM遍历的结果统一通过该类型暴露，
/// 调用方不关心某个字段来自哪种技术。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSignals {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub has_h1: bool,
    pub has_h2: bool,
    pub heading_structure: HeadingStructure,
    pub has_viewport_meta: bool,
    pub privacy_mentioned: bool,
    pub terms_mentioned: bool,
    pub contact_info_visible: bool,
    pub social_links: HashMap<SocialPlatform, String>,
    pub text_content: String,
}

/// 提取页面信号（纯函数）
///
/// 空HTML时所有字段取空/false，从不失败
pub fn extract(html: &str) -> ExtractedSignals {
    if html.is_empty() {
        return ExtractedSignals::default();
    }

    let meta_title = TITLE_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| decode_trimmed(m.as_str()))
        .filter(|t| !t.is_empty());

    let meta_description = META_DESCRIPTION_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| decode_trimmed(m.as_str()))
        .filter(|d| !d.is_empty());

    let has_h1 = H1_REGEX.is_match(html);
    let has_h2 = H2_REGEX.is_match(html);
    let heading_structure = heading_structure(has_h1, has_h2);

    let terms_mentioned = TERMS_REGEX.is_match(html) || TERMS_LOOSE_REGEX.is_match(html);
    let contact_info_visible = PHONE_REGEX.is_match(html) || EMAIL_REGEX.is_match(html);

    ExtractedSignals {
        meta_title,
        meta_description,
        has_h1,
        has_h2,
        heading_structure,
        has_viewport_meta: VIEWPORT_REGEX.is_match(html),
        privacy_mentioned: PRIVACY_REGEX.is_match(html),
        terms_mentioned,
        contact_info_visible,
        social_links: extract_social_links(html),
        text_content: text_processing::strip_tags(html),
    }
}

/// 标题结构分级：h1+h2为good，仅h1为fair，否则poor
pub fn heading_structure(has_h1: bool, has_h2: bool) -> HeadingStructure {
    if has_h1 && has_h2 {
        HeadingStructure::Good
    } else if has_h1 {
        HeadingStructure::Fair
    } else {
        HeadingStructure::Poor
    }
}

/// 扫描HTML中的社交平台链接，每个平台记录第一个出现的URL
pub fn extract_social_links(html: &str) -> HashMap<SocialPlatform, String> {
    let mut found: HashMap<SocialPlatform, String> = HashMap::new();
    if html.is_empty() {
        return found;
    }

    for m in SOCIAL_URL_REGEX.find_iter(html) {
        let url = m.as_str().to_string();
        let lower = url.to_lowercase();

        let platform = if lower.contains("facebook.com") {
            SocialPlatform::Facebook
        } else if lower.contains("instagram.com") {
            SocialPlatform::Instagram
        } else if lower.contains("linkedin.com") {
            SocialPlatform::Linkedin
        } else if lower.contains("youtube.com") {
            SocialPlatform::Youtube
        } else if lower.contains("tiktok.com") {
            SocialPlatform::Tiktok
        } else if lower.contains("x.com") || lower.contains("twitter.com") {
            SocialPlatform::Twitter
        } else {
            continue;
        };

        found.entry(platform).or_insert(url);
    }

    found
}

/// DOM遍历：按锚文本或href关键词查找链接
///
/// 用于发现footer中未被正则命中的信任页面链接
pub fn extract_link_by_keyword(html: &str, keywords: &[&str]) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    for link in document.select(&selector) {
        let href = match link.value().attr("href") {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        let text = link.text().collect::<String>().trim().to_lowercase();
        let href_lower = href.to_lowercase();

        for keyword in keywords {
            let keyword = keyword.to_lowercase();
            if text.contains(&keyword) || href_lower.contains(&keyword) {
                return Some(href.to_string());
            }
        }
    }

    None
}

fn decode_trimmed(raw: &str) -> String {
    html_escape::decode_html_entities(raw.trim()).to_string()
}
