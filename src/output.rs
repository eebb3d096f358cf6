//! CLI output formatting for every command.
//!
//! Core stages never print. They return data (skipped files, budget reports,
//! a [`WriteReport`]) and this module turns it into lines.
//!
//! # Build Output
//!
//! Every line starts with a status tag:
//!
//! ```text
//! [SKIP] example.md (example file, not built)
//! [SKIP] index.md (/index.html is the home page)
//! [SKIP] notes.md (/notes.html already taken by Notes.md)
//! [OK]   index.html = 9120 bytes
//! [WARN] long-post.html = 31200 bytes > 30720 bytes (recommended size exceeded)
//! [OK]   sitemap.xml generated with 10 URLs
//! [SKIP] sitemap.xml - no site_url defined
//! [OK]   robots.txt generated
//! [MIN]  Minified CSS: css/extra.css
//! [GEN]  Generated minified theme CSS: build/assets/css/theme.css
//! [DONE] 4 post(s), 3 category page(s) + index @ 2024-06-01 12:00:00
//! ```
//!
//! # Check Output
//!
//! Information-first inventory: each entity leads with its positional index
//! and title, with the source file as indented context.
//!
//! ```text
//! Posts
//! 001 Hello World (2024-06-01)
//!     Source: hello.md
//!     Categories: News, Rust
//!
//! Pages
//! 001 About → about.html
//!     Source: about.md
//!
//! Categories
//! 001 News (2 posts)
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::budget::BudgetReport;
use crate::scan::RouteClash;
use crate::site::{Content, Site, WriteReport};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Status tag padded so messages line up.
fn tag(status: &str) -> String {
    format!("{:<6} ", format!("[{status}]"))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

// ============================================================================
// Build
// ============================================================================

/// Reserved example files that were not built.
pub fn format_skipped(skipped: &[String]) -> Vec<String> {
    skipped
        .iter()
        .map(|name| format!("{}{name} (example file, not built)", tag("SKIP")))
        .collect()
}

/// Documents left out because their route was taken.
pub fn format_clashes(clashes: &[RouteClash]) -> Vec<String> {
    clashes
        .iter()
        .map(|c| match &c.taken_by {
            Some(owner) => format!(
                "{}{} ({} already taken by {owner})",
                tag("SKIP"),
                c.source,
                c.route
            ),
            None => format!("{}{} ({} is the home page)", tag("SKIP"), c.source, c.route),
        })
        .collect()
}

/// One line per document with its size against the threshold.
pub fn format_budgets(reports: &[BudgetReport]) -> Vec<String> {
    reports
        .iter()
        .map(|r| {
            if r.exceeded() {
                format!(
                    "{}{} = {} bytes > {} bytes (recommended size exceeded)",
                    tag("WARN"),
                    r.file_name(),
                    r.bytes,
                    r.threshold
                )
            } else {
                format!("{}{} = {} bytes", tag("OK"), r.file_name(), r.bytes)
            }
        })
        .collect()
}

/// Everything a build printed after collection, in write order.
pub fn format_build_output(site: &Site, report: &WriteReport, finished_at: &str) -> Vec<String> {
    let mut lines = format_budgets(&report.budgets);

    match report.sitemap_urls {
        Some(count) => lines.push(format!(
            "{}sitemap.xml generated with {count} URLs",
            tag("OK")
        )),
        None => lines.push(format!("{}sitemap.xml - no site_url defined", tag("SKIP"))),
    }
    lines.push(format!("{}robots.txt generated", tag("OK")));

    for rel in &report.minified {
        lines.push(format!("{}Minified CSS: {rel}", tag("MIN")));
    }
    if let Some(path) = &report.generated_theme {
        lines.push(format!(
            "{}Generated minified theme CSS: {}",
            tag("GEN"),
            path.display()
        ));
    }

    lines.push(format!(
        "{}{} post(s), {} category page(s) + index @ {finished_at}",
        tag("DONE"),
        site.content.posts.len(),
        site.content.categories.len(),
    ));
    lines
}

/// Print the lines for every document that was not built.
pub fn print_skipped(content: &Content) {
    let lines = format_skipped(&content.skipped)
        .into_iter()
        .chain(format_clashes(&content.clashes));
    for line in lines {
        println!("{}", line);
    }
}

/// Print build output to stdout.
pub fn print_build_output(site: &Site, report: &WriteReport, finished_at: &str) {
    for line in format_build_output(site, report, finished_at) {
        println!("{}", line);
    }
}

// ============================================================================
// Serve
// ============================================================================

/// Banner shown when the development server starts.
pub fn format_serve_banner(host: &str, port: u16, public: &Path) -> Vec<String> {
    vec![format!(
        "{}http://{host}:{port}  (HTML from memory; static from {}/ at /assets/)",
        tag("SERVE"),
        public.display()
    )]
}

/// Access log line for one request.
pub fn format_request(method: &str, url: &str, status: u16) -> String {
    format!("{}{status} {method} {url}", indent(1))
}

pub fn print_serve_banner(host: &str, port: u16, public: &Path) {
    for line in format_serve_banner(host, port, public) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of collected content.
pub fn format_check_output(content: &Content) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    for (i, post) in content.posts.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            post.title,
            post.date_str()
        ));
        lines.push(format!("{}Source: {}", indent(1), post.source));
        if !post.categories.is_empty() {
            lines.push(format!(
                "{}Categories: {}",
                indent(1),
                post.categories.join(", ")
            ));
        }
    }

    if !content.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, (key, page)) in content.pages.iter().enumerate() {
            lines.push(format!("{} {} → {key}.html", format_index(i + 1), page.title));
            lines.push(format!("{}Source: {}", indent(1), page.source));
        }
    }

    if !content.categories.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        for (i, category) in content.categories.sorted().into_iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                category.name,
                plural(category.posts.len(), "post")
            ));
        }
    }

    lines.extend(format_skipped(&content.skipped));
    lines.extend(format_clashes(&content.clashes));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(content: &Content) {
    for line in format_check_output(content) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::PageClass;
    use crate::site::load_content;
    use crate::test_helpers::setup_fixtures;

    #[test]
    fn format_index_padding() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn tags_are_aligned() {
        assert_eq!(tag("OK"), "[OK]   ");
        assert_eq!(tag("WARN"), "[WARN] ");
        assert_eq!(tag("SERVE"), "[SERVE] ");
    }

    #[test]
    fn budget_lines() {
        let reports = vec![
            BudgetReport {
                route: "/index.html".into(),
                class: PageClass::Index,
                bytes: 900,
                threshold: 1000,
            },
            BudgetReport {
                route: "/category/rust.html".into(),
                class: PageClass::Other,
                bytes: 1200,
                threshold: 1000,
            },
        ];
        assert_eq!(
            format_budgets(&reports),
            [
                "[OK]   index.html = 900 bytes",
                "[WARN] rust.html = 1200 bytes > 1000 bytes (recommended size exceeded)",
            ]
        );
    }

    #[test]
    fn skipped_lines() {
        assert_eq!(
            format_skipped(&["example.md".to_string()]),
            ["[SKIP] example.md (example file, not built)"]
        );
    }

    #[test]
    fn clash_lines() {
        let clashes = vec![
            RouteClash {
                source: "index.md".into(),
                route: "/index.html".into(),
                taken_by: None,
            },
            RouteClash {
                source: "notes.md".into(),
                route: "/notes.html".into(),
                taken_by: Some("Notes.md".into()),
            },
        ];
        assert_eq!(
            format_clashes(&clashes),
            [
                "[SKIP] index.md (/index.html is the home page)",
                "[SKIP] notes.md (/notes.html already taken by Notes.md)",
            ]
        );
    }

    #[test]
    fn serve_banner_and_request() {
        assert_eq!(
            format_serve_banner("127.0.0.1", 8080, Path::new("public")),
            ["[SERVE] http://127.0.0.1:8080  (HTML from memory; static from public/ at /assets/)"]
        );
        assert_eq!(format_request("GET", "/", 200), "    200 GET /");
    }

    #[test]
    fn check_output_inventory() {
        let tmp = setup_fixtures();
        let content = load_content(tmp.path()).unwrap();
        let lines = format_check_output(&content);

        assert_eq!(lines[0], "Posts");
        assert!(lines.contains(&"002 Hello World (2024-06-01)".to_string()));
        assert!(lines.contains(&"    Source: hello.md".to_string()));
        assert!(lines.contains(&"    Categories: News, Rust".to_string()));
        assert!(lines.contains(&"001 About → about.html".to_string()));
        assert!(lines.contains(&"002 Contact → contact.html".to_string()));
        assert!(lines.contains(&"001 News (2 posts)".to_string()));
        assert!(lines.contains(&"003 Uncategorized (1 post)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "[SKIP] example.md (example file, not built)"
        );
    }
}
