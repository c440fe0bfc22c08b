// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use url::Url;

use crate::engines::fetch_engine::FetchEngine;
use crate::engines::probe_runner::ProbeFailure;

/// 站点地图条目
#[derive(Debug, Clone, Serialize)]
pub struct SitemapEntry {
    pub id: usize,
    pub url: String,
    pub last_modified: Option<String>,
}

/// 解析出的站点地图文档
enum SitemapDocument {
    /// urlset文档的 (loc, lastmod) 列表
    UrlSet(Vec<(String, Option<String>)>),
    /// sitemapindex文档引用的子地图loc列表
    Index(Vec<String>),
    Invalid,
}

/// 枚举站点地图
///
/// 依次尝试站点根URL与 /sitemap.xml，递归展开sitemapindex。
/// 没有任何有效地图时返回失败对象。
pub async fn extract_sitemap(
    engine: &FetchEngine,
    site_url: &str,
) -> Result<Vec<SitemapEntry>, ProbeFailure> {
    let mut candidates = vec![site_url.to_string()];
    if let Ok(base) = Url::parse(site_url) {
        if let Ok(sitemap_url) = base.join("/sitemap.xml") {
            candidates.push(sitemap_url.to_string());
        }
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut results: Vec<SitemapEntry> = Vec::new();
    let mut id = 0usize;

    for candidate in candidates {
        collect_sitemap(engine, candidate, &mut visited, &mut results, &mut id).await;
        if !results.is_empty() {
            break;
        }
    }

    if results.is_empty() {
        Err(ProbeFailure {
            error: "No valid sitemap found".to_string(),
            output: None,
        })
    } else {
        Ok(results)
    }
}

/// 迭代展开一个候选地图（含嵌套索引）
async fn collect_sitemap(
    engine: &FetchEngine,
    start: String,
    visited: &mut HashSet<String>,
    results: &mut Vec<SitemapEntry>,
    id: &mut usize,
) {
    let mut queue = vec![start];

    while let Some(url) = queue.pop() {
        if !visited.insert(url.clone()) {
            continue;
        }

        let (status, body) = engine.fetch_page(&url).await;
        if status != 200 || body.is_empty() {
            continue;
        }

        match parse_sitemap_document(&body) {
            SitemapDocument::UrlSet(entries) => {
                for (loc, lastmod) in entries {
                    results.push(SitemapEntry {
                        id: *id,
                        url: loc,
                        last_modified: lastmod,
                    });
                    *id += 1;
                }
            }
            SitemapDocument::Index(children) => {
                for child in children {
                    queue.push(child);
                }
            }
            SitemapDocument::Invalid => {}
        }
    }
}

fn parse_sitemap_document(xml: &str) -> SitemapDocument {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut root: Option<String> = None;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut in_lastmod = false;
    let mut current_loc = String::new();
    let mut current_lastmod = String::new();

    let mut urlset_entries: Vec<(String, Option<String>)> = Vec::new();
    let mut index_entries: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "urlset" | "sitemapindex" if root.is_none() => {
                        root = Some(name);
                    }
                    "url" | "sitemap" => {
                        in_entry = true;
                        current_loc.clear();
                        current_lastmod.clear();
                    }
                    "loc" if in_entry => in_loc = true,
                    "lastmod" if in_entry => in_lastmod = true,
                    _ => {}
                }
            }
            Ok(Event::Text(text)) => {
                if let Ok(value) = text.unescape() {
                    if in_loc {
                        current_loc.push_str(value.trim());
                    } else if in_lastmod {
                        current_lastmod.push_str(value.trim());
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "loc" => in_loc = false,
                    "lastmod" => in_lastmod = false,
                    "url" => {
                        in_entry = false;
                        if !current_loc.is_empty() {
                            let lastmod = if current_lastmod.is_empty() {
                                None
                            } else {
                                Some(current_lastmod.clone())
                            };
                            urlset_entries.push((current_loc.clone(), lastmod));
                        }
                    }
                    "sitemap" => {
                        in_entry = false;
                        if !current_loc.is_empty() {
                            index_entries.push(current_loc.clone());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return SitemapDocument::Invalid,
            _ => {}
        }
        buf.clear();
    }

    match root.as_deref() {
        Some("urlset") => SitemapDocument::UrlSet(urlset_entries),
        Some("sitemapindex") => SitemapDocument::Index(index_entries),
        _ => SitemapDocument::Invalid,
    }
}
