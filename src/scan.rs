//! Content discovery and classification.
//!
//! Stage 1 of the TinyBlog build pipeline. Reads every top-level markdown file
//! of the content directory and turns it into an [`Entry`], classified as a
//! post or a page.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── about.md              # Page (reserved name)
//! ├── contact.md            # Page (`page: true` in its header)
//! ├── hello-world.md        # Post
//! ├── notes.md              # Post, no header: title from first heading, date from mtime
//! ├── example.md            # Template, never built
//! └── drafts/               # Subdirectories are ignored
//! ```
//!
//! Files are processed in file-name order so everything downstream is
//! deterministic.
//!
//! ## Classification
//!
//! A document is a **page** when its `page` header is one of `about`, `page`,
//! `true`, `1`, `yes` (any case), or when its stem is `about`. Everything else
//! is a **post**. Nothing is ever rejected for lack of metadata.
//!
//! Pages are keyed by lower-cased stem. Posts keep their stem as slug.
//!
//! ## Routes
//!
//! Every entry is written to `/<slug>.html`. Routes are compared without
//! regard to case, and the first file (in file-name order) to claim one keeps
//! it; later claimants are left out and reported as a [`RouteClash`].
//! `/index.html` belongs to the home listing, so `index.md` is never built.
//!
//! ## Dates
//!
//! The `date` header is tried against [`DATE_FORMATS`] in order, then RFC 3339.
//! Anything else (including no header at all) falls back to the file's
//! modification time in local time.

use crate::metadata::{self, FrontMatter};
use crate::naming;
use crate::types::Entry;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Content directory not found: {0}")]
    ContentDirMissing(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted explicit date formats, tried in order before RFC 3339.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Maximum excerpt length in characters, ellipsis included.
pub const EXCERPT_LIMIT: usize = 160;

const PAGE_KINDS: &[&str] = &["about", "page", "true", "1", "yes"];

/// Route of the home listing.
pub const INDEX_ROUTE: &str = "/index.html";

/// A document left out because another one already owns its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteClash {
    /// File name of the document that was left out
    pub source: String,
    pub route: String,
    /// File that owns the route, `None` for the home listing
    pub taken_by: Option<String>,
}

/// Everything found in the content directory.
#[derive(Debug, Default)]
pub struct Collection {
    /// Posts in file-name order
    pub posts: Vec<Entry>,
    /// Pages keyed by lower-cased stem
    pub pages: BTreeMap<String, Entry>,
    /// File names of reserved example documents that were not built
    pub skipped: Vec<String>,
    /// Documents whose route was already taken
    pub clashes: Vec<RouteClash>,
}

/// Collect and classify every document in `content_dir`.
pub fn collect(content_dir: &Path) -> Result<Collection, ScanError> {
    if !content_dir.is_dir() {
        return Err(ScanError::ContentDirMissing(content_dir.to_path_buf()));
    }

    let mut collection = Collection::default();
    let mut owners: HashMap<String, String> = HashMap::new();
    for path in markdown_files(content_dir)? {
        let stem = naming::file_stem(&path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| stem.clone());

        if naming::is_example_stem(&stem) {
            collection.skipped.push(file_name);
            continue;
        }

        let raw = fs::read_to_string(&path).map_err(|source| ScanError::Read {
            path: path.clone(),
            source,
        })?;
        let modified = modified_time(&path)?;
        let entry = build_entry(&stem, &file_name, raw.trim(), modified);

        let route = entry.route();
        let key = route.to_lowercase();
        if key == INDEX_ROUTE {
            collection.clashes.push(RouteClash {
                source: file_name,
                route,
                taken_by: None,
            });
            continue;
        }
        if let Some(owner) = owners.get(&key) {
            collection.clashes.push(RouteClash {
                source: file_name,
                route,
                taken_by: Some(owner.clone()),
            });
            continue;
        }
        owners.insert(key, file_name);

        if entry.is_page {
            collection.pages.insert(naming::page_key(&stem), entry);
        } else {
            collection.posts.push(entry);
        }
    }
    Ok(collection)
}

/// Top-level `*.md` files, sorted by file name.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(files)
}

fn modified_time(path: &Path) -> Result<NaiveDateTime, ScanError> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

/// Build an entry from already-trimmed document text.
///
/// `modified` is the fallback date when the header has none (or an unparsable one).
pub fn build_entry(stem: &str, source: &str, raw: &str, modified: NaiveDateTime) -> Entry {
    let (meta, body) = metadata::split_front_matter(raw);

    let title = metadata::resolve(&[
        meta.get("title"),
        metadata::first_heading(body),
        Some(stem),
    ])
    .unwrap_or_else(|| stem.to_string());

    let is_page = is_page(&meta, stem);
    let categories = meta.categories().to_vec();
    let category_slugs = categories.iter().map(|c| naming::category_slug(c)).collect();

    Entry {
        slug: if is_page {
            naming::page_key(stem)
        } else {
            stem.to_string()
        },
        title,
        subtitle: meta.get("subtitle").unwrap_or_default().to_string(),
        body: body.to_string(),
        categories,
        category_slugs,
        excerpt: excerpt(body),
        date: meta.get("date").and_then(parse_date).unwrap_or(modified),
        thumbnail: metadata::resolve(&[meta.get("thumbnail")]),
        thumbnail_on_article: meta.flag("thumbnail_on_article"),
        is_page,
        author: metadata::resolve(&[meta.get("author")]),
        reading_minutes: metadata::resolve(&[meta.get("min_read"), meta.get("reading_time")])
            .and_then(|m| m.parse().ok()),
        source: source.to_string(),
    }
}

fn is_page(meta: &FrontMatter, stem: &str) -> bool {
    let declared = meta
        .get("page")
        .map(|kind| kind.trim().to_lowercase())
        .is_some_and(|kind| PAGE_KINDS.contains(&kind.as_str()));
    declared || naming::is_about_stem(stem)
}

/// Parse an explicit header date.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Summary line for listings and meta descriptions.
///
/// First line that is neither blank nor a heading, inline-code back-ticks
/// removed, cut to [`EXCERPT_LIMIT`] characters with a trailing `…`.
pub fn excerpt(body: &str) -> String {
    let Some(line) = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
    else {
        return String::new();
    };

    let text = strip_code_ticks(line);
    if text.chars().count() <= EXCERPT_LIMIT {
        return text;
    }
    let mut cut: String = text.chars().take(EXCERPT_LIMIT - 1).collect();
    cut.push('…');
    cut
}

/// `` `x` `` → `x` for closed spans; a lone back-tick is kept.
fn strip_code_ticks(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixed_mtime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn entry(stem: &str, raw: &str) -> Entry {
        build_entry(stem, &format!("{stem}.md"), raw, fixed_mtime())
    }

    // =========================================================================
    // build_entry
    // =========================================================================

    #[test]
    fn header_scenario() {
        let e = entry("hello", "---\ntitle: Hello\ncategories: A, B\n---\n# Hi\n\nWorld");
        assert_eq!(e.title, "Hello");
        assert_eq!(e.categories, ["A", "B"]);
        assert_eq!(e.category_slugs, ["a", "b"]);
        assert_eq!(e.body, "# Hi\n\nWorld");
        assert!(!e.is_page);
    }

    #[test]
    fn title_from_first_heading() {
        let e = entry("notes", "Some intro\n# Real Title\nbody");
        assert_eq!(e.title, "Real Title");
    }

    #[test]
    fn title_from_stem() {
        let e = entry("plain-file", "just text");
        assert_eq!(e.title, "plain-file");
    }

    #[test]
    fn no_categories_stays_empty() {
        let e = entry("x", "---\ntitle: X\n---\nbody");
        assert!(e.categories.is_empty());
        assert!(e.category_slugs.is_empty());
    }

    #[test]
    fn category_slugs_parallel_to_names() {
        let e = entry("x", "---\ncategories: Rust & Go, Café\n---\n");
        assert_eq!(e.category_slugs, ["rust-go", "cafe"]);
        assert_eq!(e.categories.len(), e.category_slugs.len());
    }

    #[test]
    fn page_flag_values() {
        for kind in ["about", "page", "true", "1", "yes", "YES", "Page"] {
            let e = entry("contact", &format!("---\npage: {kind}\n---\nbody"));
            assert!(e.is_page, "page: {kind} should classify as page");
        }
        for kind in ["no", "false", "0", ""] {
            let e = entry("contact", &format!("---\npage: {kind}\n---\nbody"));
            assert!(!e.is_page, "page: {kind} should classify as post");
        }
    }

    #[test]
    fn about_stem_is_page_without_header() {
        assert!(entry("About", "hi").is_page);
        assert_eq!(entry("About", "hi").slug, "about");
    }

    #[test]
    fn post_keeps_stem_casing() {
        assert_eq!(entry("My-Post", "body").slug, "My-Post");
    }

    #[test]
    fn explicit_date_used() {
        let e = entry("x", "---\ndate: 2024-05-01 09:15\n---\n");
        assert_eq!(e.date_str(), "2024-05-01");
        assert_eq!(e.date.format("%H:%M").to_string(), "09:15");
    }

    #[test]
    fn bad_date_falls_back_to_mtime() {
        let e = entry("x", "---\ndate: next tuesday\n---\n");
        assert_eq!(e.date, fixed_mtime());
    }

    #[test]
    fn optional_fields() {
        let e = entry(
            "x",
            "---\nsubtitle: Sub\nauthor: Sam\nmin_read: 4\nthumbnail: /t.png\nthumbnail_on_article: yes\n---\n",
        );
        assert_eq!(e.subtitle, "Sub");
        assert_eq!(e.author.as_deref(), Some("Sam"));
        assert_eq!(e.reading_minutes, Some(4));
        assert_eq!(e.thumbnail.as_deref(), Some("/t.png"));
        assert!(e.thumbnail_on_article);
    }

    #[test]
    fn reading_time_alias_and_garbage() {
        assert_eq!(entry("x", "---\nreading_time: 7\n---\n").reading_minutes, Some(7));
        assert_eq!(entry("x", "---\nmin_read: lots\n---\n").reading_minutes, None);
    }

    #[test]
    fn empty_optional_fields_are_none() {
        let e = entry("x", "---\nauthor:\nthumbnail:  \n---\n");
        assert_eq!(e.author, None);
        assert_eq!(e.thumbnail, None);
    }

    // =========================================================================
    // dates
    // =========================================================================

    #[test]
    fn all_date_formats_accepted() {
        for value in [
            "2024-05-01",
            "2024-05-01 10:20",
            "2024-05-01T10:20",
            "2024-05-01T10:20:30",
            "2024-05-01 10:20:30",
            "2024-05-01T10:20:30+02:00",
        ] {
            let parsed = parse_date(value).unwrap_or_else(|| panic!("{value} should parse"));
            assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        }
    }

    #[test]
    fn date_only_is_midnight() {
        let dt = parse_date("2024-05-01").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn unparsable_dates_rejected() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("01/05/2024"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    // =========================================================================
    // excerpt
    // =========================================================================

    #[test]
    fn excerpt_skips_headings_and_blanks() {
        assert_eq!(excerpt("# Title\n\nFirst real line.\nSecond."), "First real line.");
    }

    #[test]
    fn excerpt_strips_code_ticks() {
        assert_eq!(excerpt("Run `cargo build` now"), "Run cargo build now");
        assert_eq!(excerpt("a lone ` tick"), "a lone ` tick");
    }

    #[test]
    fn excerpt_truncated_with_ellipsis() {
        let long = "é".repeat(300);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), EXCERPT_LIMIT);
        assert!(e.ends_with('…'));
    }

    #[test]
    fn excerpt_exact_limit_untouched() {
        let text = "a".repeat(EXCERPT_LIMIT);
        assert_eq!(excerpt(&text), text);
    }

    #[test]
    fn excerpt_empty_body() {
        assert_eq!(excerpt("# only a heading"), "");
    }

    // =========================================================================
    // collect
    // =========================================================================

    #[test]
    fn missing_content_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = collect(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::ContentDirMissing(_))));
    }

    #[test]
    fn fixture_classification() {
        let tmp = setup_fixtures();
        let collection = collect(tmp.path()).unwrap();

        assert_eq!(post_slugs(&collection), ["fenced", "hello", "news-roundup", "notes"]);
        assert_eq!(page_keys(&collection), ["about", "contact"]);
        assert_eq!(collection.skipped, ["example.md"]);
    }

    #[test]
    fn fixture_post_fields() {
        let tmp = setup_fixtures();
        let collection = collect(tmp.path()).unwrap();

        let hello = find_post(&collection, "hello");
        assert_eq!(hello.title, "Hello World");
        assert_eq!(hello.categories, ["News", "Rust"]);
        assert_eq!(hello.author.as_deref(), Some("Sam"));

        let notes = find_post(&collection, "notes");
        assert_eq!(notes.title, "Loose notes");
        assert!(notes.categories.is_empty());
    }

    #[test]
    fn example_variants_skipped() {
        let tmp = TempDir::new().unwrap();
        for name in ["_Example.md", "exemple.md", "real.md"] {
            fs::write(tmp.path().join(name), "body").unwrap();
        }
        let collection = collect(tmp.path()).unwrap();
        assert_eq!(collection.skipped, ["_Example.md", "exemple.md"]);
        assert_eq!(post_slugs(&collection), ["real"]);
    }

    #[test]
    fn non_markdown_and_subdirs_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(tmp.path().join("drafts")).unwrap();
        fs::write(tmp.path().join("drafts/hidden.md"), "x").unwrap();
        fs::write(tmp.path().join("post.md"), "x").unwrap();
        let collection = collect(tmp.path()).unwrap();
        assert_eq!(post_slugs(&collection), ["post"]);
    }

    #[test]
    fn page_stem_collision_first_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("About.md"), "---\ntitle: First\n---\n").unwrap();
        fs::write(tmp.path().join("about.md"), "---\ntitle: Second\n---\n").unwrap();
        let collection = collect(tmp.path()).unwrap();
        assert_eq!(collection.pages.len(), 1);
        assert_eq!(find_page(&collection, "about").title, "First");
        assert_eq!(
            collection.clashes,
            [RouteClash {
                source: "about.md".into(),
                route: "/about.html".into(),
                taken_by: Some("About.md".into()),
            }]
        );
    }

    #[test]
    fn index_stem_never_built() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.md"), "---\ntitle: Home?\n---\nbody").unwrap();
        fs::write(tmp.path().join("other.md"), "body").unwrap();
        let collection = collect(tmp.path()).unwrap();
        assert_eq!(post_slugs(&collection), ["other"]);
        assert_eq!(
            collection.clashes,
            [RouteClash {
                source: "index.md".into(),
                route: INDEX_ROUTE.into(),
                taken_by: None,
            }]
        );
    }

    #[test]
    fn page_and_post_on_same_route() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Notes.md"), "---\npage: yes\n---\npage body").unwrap();
        fs::write(tmp.path().join("notes.md"), "---\ntitle: Post\n---\npost body").unwrap();
        let collection = collect(tmp.path()).unwrap();
        assert_eq!(find_page(&collection, "notes").body, "page body");
        assert!(collection.posts.is_empty());
        assert_eq!(collection.clashes.len(), 1);
        assert_eq!(collection.clashes[0].source, "notes.md");
        assert_eq!(collection.clashes[0].route, "/notes.html");
        assert_eq!(collection.clashes[0].taken_by.as_deref(), Some("Notes.md"));
    }

    #[test]
    fn surrounding_whitespace_trimmed_before_header() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.md"), "\n\n---\ntitle: Padded\n---\nbody\n\n").unwrap();
        let collection = collect(tmp.path()).unwrap();
        let post = find_post(&collection, "x");
        assert_eq!(post.title, "Padded");
        assert_eq!(post.body, "body");
    }
}
