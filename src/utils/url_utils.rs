// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 解析超链接为绝对URL
///
/// 过滤掉锚点、mailto和tel链接
pub fn resolve_href(base_url: &Url, href: &str) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with("tel:")
        || trimmed.starts_with("javascript:")
    {
        return None;
    }

    base_url.join(trimmed).ok().filter(|resolved| {
        resolved.scheme() == "http" || resolved.scheme() == "https"
    })
}

/// 提取URL的路径部分（空路径归一化为 "/"）
pub fn extract_path(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// 判断两个URL是否属于同一主机
pub fn is_same_host(a: &Url, b: &Url) -> bool {
    a.host_str().is_some() && a.host_str() == b.host_str()
}
