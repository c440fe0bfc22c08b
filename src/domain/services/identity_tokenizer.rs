// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::audit_input::AuditInput;

static CORPORATE_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(ltd|limited|inc|llc|company)\b").unwrap());
static NON_ALNUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9 ]").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 将文本归一化为匹配令牌
///
/// 小写化、转写非ASCII字符、剔除公司后缀与非字母数字字符后分词。
/// 保留长度≥4的词，并在多词时追加全词拼接（匹配 "acmecorp" 这类
/// 由 "Acme Corp" 拼合而成的句柄）。
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = deunicode::deunicode(text).to_lowercase();
    let without_suffixes = CORPORATE_SUFFIX_REGEX.replace_all(&lowered, " ");
    let alnum_only = NON_ALNUM_REGEX.replace_all(&without_suffixes, " ");
    let collapsed = WHITESPACE_REGEX
        .replace_all(alnum_only.trim(), " ")
        .to_string();

    if collapsed.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = collapsed.split(' ').collect();
    let mut tokens: Vec<String> = Vec::new();

    for part in &parts {
        if part.len() >= 4 {
            tokens.push((*part).to_string());
        }
    }

    if parts.len() > 1 {
        tokens.push(parts.concat());
    }

    tokens
}

/// 由审计输入构建身份令牌集合
///
/// 合并商家名称、描述、城市、国家和关键词的令牌，保序去重。
/// 空集合表示"无法验证"，调用方需按文档行为降级。
pub fn build_tokens(input: &AuditInput) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    if !input.business_name.trim().is_empty() {
        sources.push(input.business_name.clone());
    }

    if let Some(description) = &input.description {
        if !description.trim().is_empty() {
            sources.push(description.clone());
        }
    }

    let cities = input
        .city
        .iter()
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if !cities.is_empty() {
        sources.push(cities);
    }

    let countries = input
        .country
        .iter()
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if !countries.is_empty() {
        sources.push(countries);
    }

    if !input.keywords.is_empty() {
        sources.push(input.keywords.join(" "));
    }

    let mut tokens: Vec<String> = Vec::new();
    for source in sources {
        for token in tokenize(&source) {
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }

    tokens
}

/// 令牌包含检查：干草堆中出现任一令牌即通过
pub fn matches_any_token(haystack: &str, tokens: &[String]) -> bool {
    let lowered = haystack.to_lowercase();
    tokens
        .iter()
        .any(|token| !token.is_empty() && lowered.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> AuditInput {
        AuditInput {
            website_url: "https://acmetech.ng".to_string(),
            business_name: "Acme Tech Ltd".to_string(),
            industry: "Technology".to_string(),
            country: vec!["Nigeria".to_string()],
            city: vec!["Lagos".to_string()],
            target_audience: "SMEs".to_string(),
            description: None,
            competitors: vec![],
            keywords: vec![],
        }
    }

    #[test]
    fn test_tokenize_strips_corporate_suffixes() {
        let tokens = tokenize("Acme Tech Ltd");
        assert!(tokens.contains(&"acme".to_string()));
        assert!(tokens.contains(&"tech".to_string()));
        assert!(!tokens.iter().any(|t| t == "ltd"));
    }

    #[test]
    fn test_tokenize_adds_compound_token() {
        let tokens = tokenize("Acme Corp");
        assert_eq!(
            tokens,
            vec![
                "acme".to_string(),
                "corp".to_string(),
                "acmecorp".to_string()
            ]
        );
    }

    #[test]
    fn test_tokenize_short_words_dropped() {
        let tokens = tokenize("Joe & Co");
        // Single words under 4 chars produce only the compound
        assert_eq!(tokens, vec!["joeco".to_string()]);
    }

    #[test]
    fn test_tokenize_empty_and_symbol_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ***").is_empty());
    }

    #[test]
    fn test_build_tokens_unions_sources() {
        let mut input = base_input();
        input.description = Some("Branding studio in Lagos".to_string());
        input.keywords = vec!["artisan software".to_string()];

        let tokens = build_tokens(&input);
        assert!(tokens.contains(&"acme".to_string()));
        assert!(tokens.contains(&"lagos".to_string()));
        assert!(tokens.contains(&"nigeria".to_string()));
        assert!(tokens.contains(&"branding".to_string()));
        assert!(tokens.contains(&"artisan".to_string()));

        // 保序去重
        let unique: std::collections::HashSet<&String> = tokens.iter().collect();
        assert_eq!(unique.len(), tokens.len());
    }

    #[test]
    fn test_build_tokens_string_or_list_equivalence() {
        // "Lagos" and ["Lagos"] normalize identically upstream; both shapes
        // must therefore produce identical token sets here
        let single = base_input();
        let mut listed = base_input();
        listed.city = vec!["Lagos".to_string()];

        assert_eq!(build_tokens(&single), build_tokens(&listed));
    }

    #[test]
    fn test_matches_any_token() {
        let tokens = vec!["acme".to_string(), "acmetech".to_string()];
        assert!(matches_any_token("Acme Tech Nigeria, 12 Marina Rd", &tokens));
        assert!(!matches_any_token("Unrelated Store, 99 Elm St", &tokens));
        assert!(!matches_any_token("", &tokens));
    }
}
