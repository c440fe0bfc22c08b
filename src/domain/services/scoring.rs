// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::fetch_result::FetchResult;
use crate::domain::models::report::{GoogleBusinessProfile, HeadingStructure, KeywordUsage, NumberOrNa};
use crate::domain::models::social::{PlatformSet, Provenance};

/// 技术SEO评分
///
/// 状态200记40分，SSL、robots.txt、sitemap.xml各记20分，上限100
pub fn technical_score(fetch: &FetchResult) -> i32 {
    let mut score = 0;

    if fetch.status_code == 200 {
        score += 40;
    }
    if fetch.has_ssl {
        score += 20;
    }
    if fetch.has_robots {
        score += 20;
    }
    if fetch.has_sitemap {
        score += 20;
    }

    score.min(100)
}

/// 内容质量评分
///
/// 标题与描述各25分，标题结构good=20/fair=10，
/// 关键词使用good=30/fair=15（poor与unknown都记0），上限100
pub fn content_score(
    has_meta_title: bool,
    has_meta_description: bool,
    heading: HeadingStructure,
    keyword_usage: KeywordUsage,
) -> i32 {
    let mut score = 0;

    if has_meta_title {
        score += 25;
    }
    if has_meta_description {
        score += 25;
    }

    score += match heading {
        HeadingStructure::Good => 20,
        HeadingStructure::Fair => 10,
        HeadingStructure::Poor => 0,
    };

    score += match keyword_usage {
        KeywordUsage::Good => 30,
        KeywordUsage::Fair => 15,
        KeywordUsage::Poor | KeywordUsage::Unknown => 0,
    };

    score.min(100)
}

/// 关键词使用分级
///
/// 未提供关键词 ⇒ unknown；0命中 ⇒ poor；1-2命中 ⇒ fair；3+命中 ⇒ good
pub fn resolve_keyword_usage(text: &str, keywords: &[String]) -> KeywordUsage {
    if keywords.is_empty() {
        return KeywordUsage::Unknown;
    }

    let text_lower = text.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .filter(|kw| text_lower.contains(&kw.to_lowercase()))
        .count();

    match hits {
        0 => KeywordUsage::Poor,
        1..=2 => KeywordUsage::Fair,
        _ => KeywordUsage::Good,
    }
}

/// 信任评分
///
/// SSL、隐私政策、条款、联系方式各25分；
/// 零信号时返回None表示"无法评分"，区别于"零分"
pub fn trust_score(has_ssl: bool, privacy: bool, terms: bool, contact: bool) -> Option<i32> {
    let score = [has_ssl, privacy, terms, contact]
        .iter()
        .filter(|present| **present)
        .count() as i32
        * 25;

    if score > 0 {
        Some(score)
    } else {
        None
    }
}

/// 社交评分
///
/// 每个找到的平台记12分，网站来源加3分、搜索来源加2分，
/// 相对理论满分（平台数×15）归一化到0-100。
/// 一个平台都没找到时返回None而非0。
pub fn social_score(platforms: &PlatformSet) -> Option<i32> {
    let mut raw_score = 0i32;
    let mut found_any = false;
    let max_raw_score = 6 * (12 + 3);

    for (_, platform) in platforms.iter() {
        if platform.source == Provenance::None {
            continue;
        }

        found_any = true;
        raw_score += 12;
        raw_score += if platform.source == Provenance::Website {
            3
        } else {
            2
        };
    }

    if !found_any {
        return None;
    }

    let normalized = (f64::from(raw_score) / f64::from(max_raw_score)) * 100.0;
    Some((normalized.min(100.0)).round() as i32)
}

/// 统计解析成功的平台数
pub fn count_detected_platforms(platforms: &PlatformSet) -> usize {
    platforms.iter().filter(|(_, m)| m.is_found()).count()
}

/// 社交整合质量分级
///
/// 按网站内链接的占比分级：≥0.75 excellent，≥0.5 good，≥0.25 fair
pub fn integration_quality(platforms: &PlatformSet) -> &'static str {
    let mut found = 0usize;
    let mut linked = 0usize;

    for (_, platform) in platforms.iter() {
        match platform.source {
            Provenance::None => continue,
            Provenance::Website => {
                found += 1;
                linked += 1;
            }
            Provenance::Search => found += 1,
        }
    }

    if found == 0 {
        return "poor";
    }

    let ratio = linked as f64 / found as f64;
    if ratio >= 0.75 {
        "excellent"
    } else if ratio >= 0.5 {
        "good"
    } else if ratio >= 0.25 {
        "fair"
    } else {
        "poor"
    }
}

/// 本地商家评分
///
/// 未找到记0分；评分按 rating/5×60 折算，评论量阶梯加成
/// （≥50→40，≥10→25，>0→15，其余→10），上限100
pub fn local_presence_score(profile: &GoogleBusinessProfile) -> i32 {
    if !profile.is_found() {
        return 0;
    }

    let rating = match &profile.rating {
        NumberOrNa::Number(rating) => *rating,
        NumberOrNa::Na(_) => 4.0,
    };
    let rating_score = (rating / 5.0) * 60.0;

    let review_score = match &profile.reviews {
        NumberOrNa::Number(reviews) => {
            let count = *reviews as i64;
            if count >= 50 {
                40.0
            } else if count >= 10 {
                25.0
            } else if count > 0 {
                15.0
            } else {
                10.0
            }
        }
        NumberOrNa::Na(_) => 10.0,
    };

    (rating_score + review_score).min(100.0).round() as i32
}

/// 总体评分
///
/// null记0，各项先钳制到[0,100]再取算术平均，四舍五入
pub fn overall_score(scores: &[Option<i32>]) -> i32 {
    if scores.is_empty() {
        return 0;
    }

    let sum: i32 = scores
        .iter()
        .map(|score| score.unwrap_or(0).clamp(0, 100))
        .sum();

    (f64::from(sum) / scores.len() as f64).round() as i32
}

/// 字母等级：固定阈值阶梯，不可配置
pub fn letter_grade(score: i32) -> &'static str {
    match score {
        s if s >= 90 => "A",
        s if s >= 80 => "B",
        s if s >= 70 => "C",
        s if s >= 60 => "D",
        s if s >= 50 => "E",
        _ => "F",
    }
}

/// 等级的文字描述
pub fn describe_grade(grade: &str) -> &'static str {
    match grade {
        "A" => "Excellent visibility across all pillars",
        "B" => "Strong visibility with minor gaps",
        "C" => "Average visibility with room to grow",
        "D" => "Below-average visibility; needs attention",
        "E" => "Weak visibility across channels",
        _ => "Critical visibility gaps detected",
    }
}
