// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, HashSet};

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::engines::fetch_engine::FetchEngine;
use crate::utils::url_utils;

/// 单级标题清单
#[derive(Debug, Clone, Serialize, Default)]
pub struct HeadingGroup {
    pub count: usize,
    pub values: Vec<String>,
}

/// h1-h6标题清单
pub type HeadingInventory = BTreeMap<String, HeadingGroup>;

/// 图片条目
#[derive(Debug, Clone, Serialize)]
pub struct ImageEntry {
    pub url: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// 图片清单汇总
#[derive(Debug, Clone, Serialize, Default)]
pub struct ImageSummary {
    pub missing_title: usize,
    pub missing_alt: usize,
    pub duplicates: usize,
    pub total: usize,
}

/// 图片清单
#[derive(Debug, Clone, Serialize, Default)]
pub struct ImageInventory {
    pub images: Vec<ImageEntry>,
    pub summary: ImageSummary,
}

/// 提取h1-h6标题（数量与文本）
pub fn extract_headers(html: &str) -> HeadingInventory {
    let mut result: HeadingInventory = ["h1", "h2", "h3", "h4", "h5", "h6"]
        .iter()
        .map(|tag| (tag.to_string(), HeadingGroup::default()))
        .collect();

    if html.is_empty() {
        return result;
    }

    let document = Html::parse_document(html);
    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        let selector = Selector::parse(tag).unwrap();
        let group = result.get_mut(tag).unwrap();
        for element in document.select(&selector) {
            let text = element.text().collect::<String>().trim().to_string();
            group.values.push(text);
            group.count += 1;
        }
    }

    result
}

/// 提取图片清单
///
/// src缺失时回退data-src；统计缺失alt/title与重复URL
pub fn extract_images(html: &str, base_url: &Url) -> ImageInventory {
    let mut result = ImageInventory::default();
    if html.is_empty() {
        return result;
    }

    let document = Html::parse_document(html);
    let selector = Selector::parse("img").unwrap();
    let mut seen: HashSet<String> = HashSet::new();

    for img in document.select(&selector) {
        let src = img
            .value()
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| img.value().attr("data-src").filter(|s| !s.is_empty()))
            .or_else(|| img.value().attr("src-set").filter(|s| !s.is_empty()));

        let src = match src {
            Some(src) => src,
            None => continue,
        };

        let resolved = match url_utils::resolve_url(base_url, src) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        let alt = img
            .value()
            .attr("alt")
            .filter(|s| !s.is_empty())
            .map(String::from);
        let title = img
            .value()
            .attr("title")
            .filter(|s| !s.is_empty())
            .map(String::from);

        result.summary.total += 1;
        if alt.is_none() {
            result.summary.missing_alt += 1;
        }
        if title.is_none() {
            result.summary.missing_title += 1;
        }

        if !seen.insert(resolved.clone()) {
            result.summary.duplicates += 1;
            continue;
        }

        result.images.push(ImageEntry {
            url: resolved,
            alt,
            title,
        });
    }

    result
}

/// 按状态码分桶的出站链接检查
///
/// 对页面内前N个唯一链接逐个做HEAD/GET状态检查
pub async fn extract_link_status(
    engine: &FetchEngine,
    html: &str,
    base_url: &Url,
    max_links: usize,
) -> BTreeMap<u16, Vec<String>> {
    let mut buckets: BTreeMap<u16, Vec<String>> = BTreeMap::new();
    if html.is_empty() {
        return buckets;
    }

    let hrefs: Vec<String> = {
        let document = Html::parse_document(html);
        let selector = Selector::parse("a[href]").unwrap();
        document
            .select(&selector)
            .filter_map(|a| a.value().attr("href").map(String::from))
            .collect()
    };

    let mut visited: HashSet<String> = HashSet::new();
    for href in hrefs {
        if visited.len() >= max_links {
            break;
        }

        let resolved = match url_utils::resolve_href(base_url, &href) {
            Some(url) => url.to_string(),
            None => continue,
        };

        if !visited.insert(resolved.clone()) {
            continue;
        }

        let status = engine.status_code(&resolved).await;
        buckets.entry(status).or_default().push(resolved);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headers_counts_and_values() {
        let html = "<html><body><h1>Main</h1><h2>Sub A</h2><h2>Sub B</h2></body></html>";
        let inventory = extract_headers(html);

        assert_eq!(inventory["h1"].count, 1);
        assert_eq!(inventory["h1"].values, vec!["Main"]);
        assert_eq!(inventory["h2"].count, 2);
        assert_eq!(inventory["h3"].count, 0);
    }

    #[test]
    fn test_extract_headers_empty_html() {
        let inventory = extract_headers("");
        assert_eq!(inventory.len(), 6);
        assert_eq!(inventory["h1"].count, 0);
    }

    #[test]
    fn test_extract_images_summary() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"
            <img src="/a.png" alt="A" title="A image">
            <img src="/b.png">
            <img src="/a.png" alt="dup">
            <img data-src="/lazy.png" alt="Lazy">
        "#;

        let inventory = extract_images(html, &base);
        assert_eq!(inventory.summary.total, 4);
        assert_eq!(inventory.summary.missing_alt, 1);
        assert_eq!(inventory.summary.missing_title, 3);
        assert_eq!(inventory.summary.duplicates, 1);
        assert_eq!(inventory.images.len(), 3);
        assert_eq!(inventory.images[0].url, "https://example.com/a.png");
    }

    #[test]
    fn test_extract_images_empty() {
        let base = Url::parse("https://example.com/").unwrap();
        let inventory = extract_images("", &base);
        assert_eq!(inventory.summary.total, 0);
        assert!(inventory.images.is_empty());
    }
}
