// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, HashSet, VecDeque};

use robotstxt::DefaultMatcher;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::engines::fetch_engine::{FetchEngine, DESKTOP_USER_AGENT};
use crate::engines::probe_runner::ProbeFailure;
use crate::utils::url_utils;

/// 链接图节点（路径 + 出入度之和）
#[derive(Debug, Clone, Serialize)]
pub struct LinkNode {
    pub url: String,
    pub degree: usize,
}

/// 链接图边（from路径 → to路径）
#[derive(Debug, Clone, Serialize)]
pub struct LinkEdge {
    pub from: String,
    pub to: String,
}

/// 链接图汇总
#[derive(Debug, Clone, Serialize)]
pub struct LinkGraphSummary {
    pub pages_crawled: usize,
    pub unique_nodes: usize,
}

/// 同域链接图
#[derive(Debug, Clone, Serialize)]
pub struct LinkGraph {
    pub nodes: Vec<LinkNode>,
    pub edges: Vec<LinkEdge>,
    pub summary: LinkGraphSummary,
}

/// 有界的同域广度优先爬取
///
/// 从根URL出发，最多访问 `maximum` 个页面，只跟进同一主机的链接。
/// robots.txt内容可用时，不允许的路径不再展开。
pub async fn crawl_internal_links(
    engine: &FetchEngine,
    root_url: &str,
    maximum: usize,
    robots_txt: Option<&str>,
) -> Result<LinkGraph, ProbeFailure> {
    let root = Url::parse(root_url).map_err(|_| ProbeFailure {
        error: "Invalid root URL".to_string(),
        output: None,
    })?;

    if root.host_str().is_none() {
        return Err(ProbeFailure {
            error: "Invalid root URL".to_string(),
            output: None,
        });
    }

    let mut queue: VecDeque<Url> = VecDeque::new();
    queue.push_back(root.clone());

    let mut visited: HashSet<String> = HashSet::new();
    let mut edges: Vec<LinkEdge> = Vec::new();
    let mut pages_crawled = 0usize;

    while let Some(current) = queue.pop_front() {
        if visited.len() >= maximum {
            break;
        }
        if !visited.insert(current.to_string()) {
            continue;
        }

        if let Some(robots) = robots_txt {
            let mut matcher = DefaultMatcher::default();
            if !matcher.one_agent_allowed_by_robots(DESKTOP_USER_AGENT, current.path(), robots) {
                continue;
            }
        }

        pages_crawled += 1;

        let (_, html) = engine.fetch_page(current.as_str()).await;
        if html.is_empty() {
            continue;
        }

        let hrefs: Vec<String> = {
            let document = Html::parse_document(&html);
            let selector = Selector::parse("a[href]").unwrap();
            document
                .select(&selector)
                .filter_map(|a| a.value().attr("href").map(String::from))
                .collect()
        };

        for href in hrefs {
            let resolved = match url_utils::resolve_href(&current, &href) {
                Some(url) => url,
                None => continue,
            };

            if !url_utils::is_same_host(&resolved, &root) {
                continue;
            }

            edges.push(LinkEdge {
                from: url_utils::extract_path(&current),
                to: url_utils::extract_path(&resolved),
            });

            let key = resolved.to_string();
            if !visited.contains(&key)
                && !queue.iter().any(|queued| queued.as_str() == key)
                && visited.len() + queue.len() < maximum
            {
                queue.push_back(resolved);
            }
        }
    }

    let mut degrees: BTreeMap<String, usize> = BTreeMap::new();
    for edge in &edges {
        *degrees.entry(edge.from.clone()).or_insert(0) += 1;
        *degrees.entry(edge.to.clone()).or_insert(0) += 1;
    }

    let nodes: Vec<LinkNode> = degrees
        .into_iter()
        .map(|(url, degree)| LinkNode { url, degree })
        .collect();

    let unique_nodes = nodes.len();

    Ok(LinkGraph {
        nodes,
        edges,
        summary: LinkGraphSummary {
            pages_crawled,
            unique_nodes,
        },
    })
}
