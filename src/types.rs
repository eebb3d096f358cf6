//! Shared types used across pipeline stages.
//!
//! An [`Entry`] is created once per source file by [`crate::scan`] and is
//! read-only afterwards: the renderer, indexer and assembler only project it
//! into HTML. A [`RenderedSite`] holds every generated document in memory,
//! in generation order, before anything touches the output directory.

use chrono::NaiveDateTime;

/// Display format for entry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One source document, either a post or a page.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Route stem: `/<slug>.html`
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    /// Raw body text after the header
    pub body: String,
    /// Category display names in header order
    pub categories: Vec<String>,
    /// `category_slugs[i]` is the slug of `categories[i]`
    pub category_slugs: Vec<String>,
    /// First paragraph line, at most 160 characters
    pub excerpt: String,
    pub date: NaiveDateTime,
    pub thumbnail: Option<String>,
    /// Show the thumbnail above the article body, not only in listings
    pub thumbnail_on_article: bool,
    pub is_page: bool,
    pub author: Option<String>,
    pub reading_minutes: Option<u32>,
    /// Source file name, for reporting
    pub source: String,
}

impl Entry {
    /// `YYYY-MM-DD` form of the entry date.
    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Route of the rendered document, e.g. `/hello-world.html`.
    pub fn route(&self) -> String {
        format!("/{}.html", self.slug)
    }

    /// `(name, slug)` pairs in header order.
    pub fn category_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.category_slugs.iter().map(String::as_str))
    }
}

/// A generated document and the route it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output path with leading slash, e.g. `/category/rust.html`
    pub route: String,
    pub html: String,
}

/// Ordered route → document mapping.
///
/// Iteration follows insertion order (index, pages, posts, categories).
/// Inserting an existing route replaces the document in place.
#[derive(Debug, Clone, Default)]
pub struct RenderedSite {
    pages: Vec<RenderedPage>,
}

impl RenderedSite {
    pub fn insert(&mut self, route: impl Into<String>, html: String) {
        let route = route.into();
        match self.pages.iter_mut().find(|p| p.route == route) {
            Some(existing) => existing.html = html,
            None => self.pages.push(RenderedPage { route, html }),
        }
    }

    pub fn get(&self, route: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.route == route)
            .map(|p| p.html.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedPage> {
        self.pages.iter()
    }

    pub fn routes(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.route.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_site_keeps_insertion_order() {
        let mut site = RenderedSite::default();
        site.insert("/index.html", "i".into());
        site.insert("/about.html", "a".into());
        site.insert("/category/x.html", "c".into());
        assert_eq!(
            site.routes(),
            vec!["/index.html", "/about.html", "/category/x.html"]
        );
    }

    #[test]
    fn rendered_site_replaces_in_place() {
        let mut site = RenderedSite::default();
        site.insert("/index.html", "first".into());
        site.insert("/hello.html", "page".into());
        site.insert("/index.html", "second".into());
        assert_eq!(site.len(), 2);
        assert_eq!(site.get("/index.html"), Some("second"));
        assert_eq!(site.routes()[0], "/index.html");
    }

    #[test]
    fn rendered_site_missing_route() {
        let site = RenderedSite::default();
        assert!(site.is_empty());
        assert_eq!(site.get("/nope.html"), None);
    }
}
