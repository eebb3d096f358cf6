//! Shared test utilities for the tinyblog test suite.
//!
//! Provides fixture setup and lookup helpers that work with collection-phase
//! data (`Collection`, `Entry`, `CategoryIndex`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let collection = collect(tmp.path()).unwrap();
//!
//! let hello = find_post(&collection, "hello");
//! assert_eq!(hello.title, "Hello World");
//! assert_eq!(page_keys(&collection), ["about", "contact"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Collection;
use crate::taxonomy::{Category, CategoryIndex};
use crate::types::Entry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures. Copied files get a fresh modification time.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups: panic with the available names on a miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(collection: &'a Collection, slug: &str) -> &'a Entry {
    collection
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("post '{slug}' not found. Available: {:?}", post_slugs(collection)))
}

/// Find a page by key. Panics if not found.
pub fn find_page<'a>(collection: &'a Collection, key: &str) -> &'a Entry {
    collection.pages.get(key).unwrap_or_else(|| {
        panic!("page '{key}' not found. Available: {:?}", page_keys(collection))
    })
}

/// Find a category bucket by slug. Panics if not found.
pub fn find_category<'a>(index: &'a CategoryIndex, slug: &str) -> &'a Category {
    index.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = index.iter().map(|c| c.slug.as_str()).collect();
        panic!("category '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All post slugs in collection order.
pub fn post_slugs(collection: &Collection) -> Vec<&str> {
    collection.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// All page keys in key order.
pub fn page_keys(collection: &Collection) -> Vec<&str> {
    collection.pages.keys().map(String::as_str).collect()
}

/// Category display names in navigation order.
pub fn category_names(index: &CategoryIndex) -> Vec<&str> {
    index.sorted().into_iter().map(|c| c.name.as_str()).collect()
}
