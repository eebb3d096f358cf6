//! Category indexing.
//!
//! Groups posts into [`Category`] buckets keyed by slug. Buckets live in an
//! arena (`Vec<Category>`) with a slug → position map; each bucket stores
//! indices into the post slice it was built from, never copies of entries.
//!
//! ```text
//! posts (date-sorted)            buckets
//! 0 hello   [News, Rust]   →    news          "News"          [0, 1]
//! 1 roundup [news]         →    rust          "Rust"          [0, 2]
//! 2 fenced  [Rust]         →    uncategorized "Uncategorized" [3]
//! 3 notes   []
//! ```
//!
//! The display name of a bucket is the spelling seen first; a later post using
//! `news` for the `news` slug joins the `News` bucket without renaming it.
//! A post with no categories lands in the implicit uncategorized bucket, and
//! only then.

use crate::naming::{UNCATEGORIZED, UNCATEGORIZED_NAME};
use crate::types::Entry;
use std::collections::HashMap;

/// One category bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// Indices into the indexed post slice, in visit order
    pub posts: Vec<usize>,
}

impl Category {
    /// Route of the listing page, e.g. `/category/rust.html`.
    pub fn route(&self) -> String {
        format!("/category/{}.html", self.slug)
    }

    /// Posts of this bucket, newest first.
    ///
    /// `posts` must be the slice the index was built from.
    pub fn listing<'a>(&self, posts: &'a [Entry]) -> Vec<&'a Entry> {
        let mut listed: Vec<&Entry> = self.posts.iter().map(|&i| &posts[i]).collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date));
        listed
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    by_slug: HashMap<String, usize>,
}

impl CategoryIndex {
    /// Index `posts` in slice order.
    pub fn build(posts: &[Entry]) -> Self {
        let mut index = Self::default();
        for (i, post) in posts.iter().enumerate() {
            if post.categories.is_empty() {
                index.add(UNCATEGORIZED_NAME, UNCATEGORIZED, i);
            } else {
                for (name, slug) in post.category_pairs() {
                    index.add(name, slug, i);
                }
            }
        }
        index
    }

    fn add(&mut self, name: &str, slug: &str, post: usize) {
        let pos = match self.by_slug.get(slug) {
            Some(&pos) => pos,
            None => {
                self.categories.push(Category {
                    name: name.to_string(),
                    slug: slug.to_string(),
                    posts: Vec::new(),
                });
                self.by_slug
                    .insert(slug.to_string(), self.categories.len() - 1);
                self.categories.len() - 1
            }
        };
        let bucket = &mut self.categories[pos];
        // A post listing the same category twice appears once.
        if bucket.posts.last() != Some(&post) {
            bucket.posts.push(post);
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&pos| &self.categories[pos])
    }

    /// Buckets in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Buckets ordered for navigation: by display name, case-insensitive.
    pub fn sorted(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.slug.cmp(&b.slug))
        });
        sorted
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Stable newest-first sort; equal dates keep their current order.
pub fn sort_newest_first(posts: &mut [Entry]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
