//! Centralized naming rules: slugs and reserved file names.
//!
//! Slugs are the URL-safe identifiers used for category pages and page keys.
//! They are derived the same way everywhere:
//!
//! - transliterate to ASCII (`Café` → `Cafe`)
//! - lower-case
//! - every run of characters outside `[a-z0-9]` becomes a single `-`
//! - leading and trailing `-` are trimmed
//!
//! ```text
//! "Rust & Systems"  → "rust-systems"
//! "  News  "        → "news"
//! "C++"             → "c"
//! "!!!"             → ""
//! ```
//!
//! Category slugs go through [`category_slug`], which never yields the
//! reserved [`UNCATEGORIZED`] slug: that one belongs to the implicit bucket.
//!
//! File names carry two reserved meanings: `example.md` (and its variants) is
//! a template left in the content directory and is never built, and `about.md`
//! is always a page.

use deunicode::deunicode;
use std::path::Path;

/// Slug of the implicit bucket for posts without categories.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Display name of the implicit bucket.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Slug of an explicit category whose name has no slug characters.
pub const FALLBACK_CATEGORY: &str = "category";

/// Stems (lower-cased, leading `_` removed) of example files that are skipped.
const EXAMPLE_STEMS: &[&str] = &["example", "exemple"];

/// Stem that always classifies a document as a page.
const ABOUT_STEM: &str = "about";

/// Normalize a display name into a URL-safe slug. May be empty.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug of an explicit category.
///
/// Names without slug characters (`???`, `+`) get [`FALLBACK_CATEGORY`], and
/// a name that slugs to `uncategorized` is moved off the reserved slug.
///
/// ```text
/// "Rust"           → "rust"
/// "???"            → "category"
/// "Uncategorized"  → "category-uncategorized"
/// ```
pub fn category_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_CATEGORY.to_string()
    } else if slug == UNCATEGORIZED {
        format!("{FALLBACK_CATEGORY}-{UNCATEGORIZED}")
    } else {
        slug
    }
}

/// File stem as an owned string (`posts/hello.md` → `hello`).
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether the stem marks an example document that must not be built.
///
/// Matches case-insensitively and ignores one leading underscore, so
/// `Example`, `_example` and `_EXEMPLE` are all reserved.
pub fn is_example_stem(stem: &str) -> bool {
    let lower = stem.to_lowercase();
    let bare = lower.strip_prefix('_').unwrap_or(&lower);
    EXAMPLE_STEMS.contains(&bare)
}

/// Whether the stem is the reserved `about` page name.
pub fn is_about_stem(stem: &str) -> bool {
    stem.eq_ignore_ascii_case(ABOUT_STEM)
}

/// Key under which a page is stored and routed (`About.md` → `about`).
pub fn page_key(stem: &str) -> String {
    stem.to_lowercase()
}
