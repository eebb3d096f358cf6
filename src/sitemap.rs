//! Sitemap and robots.txt generation.
//!
//! Both are derived from the same posts, pages and category buckets the
//! assembler renders, so every listed URL exists in the output.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.org/</loc>
//!     <lastmod>2024-06-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! | URL | changefreq | priority | lastmod |
//! |---|---|---|---|
//! | index | daily | 1.0 | newest post |
//! | post | monthly | 0.8 | post date |
//! | page | yearly | 0.6 | page date |
//! | category | weekly | 0.4 | newest post in the category |
//!
//! The sitemap needs a canonical `site_url`; without one it is skipped
//! entirely. robots.txt is always produced.

use crate::config::{RobotsConfig, SiteConfig};
use crate::taxonomy::CategoryIndex;
use crate::types::Entry;
use std::collections::BTreeMap;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Sitemap
// ============================================================================

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    /// Last modification date (YYYY-MM-DD)
    pub lastmod: Option<String>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Build the sitemap, or `None` when no canonical site URL is configured.
pub fn build_sitemap(
    config: &SiteConfig,
    posts: &[Entry],
    pages: &BTreeMap<String, Entry>,
    categories: &CategoryIndex,
) -> Option<String> {
    let site_url = config.site_url()?;
    let urls = sitemap_urls(site_url, &config.base_url, posts, pages, categories);
    Some(into_xml(&urls))
}

/// URL inventory in output order: index, posts, pages, categories.
pub fn sitemap_urls(
    site_url: &str,
    base_url: &str,
    posts: &[Entry],
    pages: &BTreeMap<String, Entry>,
    categories: &CategoryIndex,
) -> Vec<UrlEntry> {
    let root = format!(
        "{}{}",
        site_url.trim_end_matches('/'),
        base_url.trim_end_matches('/')
    );
    let mut urls = vec![UrlEntry {
        loc: format!("{root}/"),
        lastmod: posts.iter().max_by_key(|p| p.date).map(Entry::date_str),
        changefreq: "daily",
        priority: "1.0",
    }];

    urls.extend(posts.iter().map(|post| UrlEntry {
        loc: format!("{root}/{}.html", post.slug),
        lastmod: Some(post.date_str()),
        changefreq: "monthly",
        priority: "0.8",
    }));

    urls.extend(pages.iter().map(|(key, page)| UrlEntry {
        loc: format!("{root}/{key}.html"),
        lastmod: Some(page.date_str()),
        changefreq: "yearly",
        priority: "0.6",
    }));

    urls.extend(categories.iter().filter_map(|category| {
        let newest = category.posts.iter().map(|&i| &posts[i]).max_by_key(|p| p.date)?;
        Some(UrlEntry {
            loc: format!("{root}/category/{}.html", category.slug),
            lastmod: Some(newest.date_str()),
            changefreq: "weekly",
            priority: "0.4",
        })
    }));

    urls
}

/// Generate sitemap XML string.
fn into_xml(urls: &[UrlEntry]) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// robots.txt
// ============================================================================

/// robots.txt for the configured policy.
///
/// Without a `[robots]` section, or with an empty one, every agent may crawl
/// everything. An explicit policy is written as comments, `User-agent`,
/// `Allow` rules, `Disallow` rules, `Crawl-delay`, then the sitemap line.
/// Comments keep the order they are listed in.
///
/// The sitemap line is only written when a `site_url` is configured.
pub fn robots_txt(config: &SiteConfig) -> String {
    let sitemap_line = config.site_url().map(|site_url| {
        format!(
            "Sitemap: {}{}/sitemap.xml",
            site_url.trim_end_matches('/'),
            config.base_url.trim_end_matches('/')
        )
    });

    let empty = RobotsConfig::default();
    let Some(policy) = config.robots.as_ref().filter(|policy| **policy != empty) else {
        let mut lines = vec!["User-agent: *".to_string(), "Allow: /".to_string()];
        if let Some(sitemap) = sitemap_line {
            lines.push(String::new());
            lines.push(sitemap);
        }
        return lines.join("\n");
    };

    let mut lines: Vec<String> = policy.comments.iter().map(|c| format!("# {c}")).collect();
    lines.push(format!("User-agent: {}", policy.user_agent));
    lines.extend(policy.allow.iter().map(|rule| format!("Allow: {rule}")));
    lines.extend(policy.disallow.iter().map(|rule| format!("Disallow: {rule}")));
    if let Some(delay) = policy.crawl_delay {
        lines.push(format!("Crawl-delay: {delay}"));
    }
    if let Some(sitemap) = sitemap_line.filter(|_| policy.sitemap) {
        lines.push(String::new());
        lines.push(sitemap);
    }
    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
