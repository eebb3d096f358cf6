//! # TinyBlog
//!
//! A small static blog generator. A directory of markdown files with short
//! `key: value` headers becomes a set of linked HTML documents grouped by
//! category, plus `sitemap.xml` and `robots.txt`.
//!
//! # Architecture: Render, Then Write
//!
//! ```text
//! 1. Collect   content/         →  posts + pages       (scan, metadata, naming)
//! 2. Index     posts            →  category buckets    (taxonomy)
//! 3. Render    entries + chrome →  documents in memory (render, generate, compact)
//! 4. Check     documents        →  size reports        (budget)
//! 5. Write     documents        →  out/                (site, sitemap)
//! ```
//!
//! Every document is rendered into memory before the first file is written,
//! so a failing build never leaves a half-written output directory. The same
//! in-memory site backs the development server.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Header/body split, header parsing, first-non-empty resolution |
//! | [`naming`] | Slugs and reserved file names (`example.md`, `about.md`) |
//! | [`scan`] | Walks the content directory, builds and classifies entries |
//! | [`taxonomy`] | Category buckets and listing order |
//! | [`render`] | Body renderers: rich (pulldown-cmark) and the built-in fallback |
//! | [`generate`] | Maud templates: chrome, navigation, cards, full documents |
//! | [`compact`] | Inter-tag whitespace removal and CSS minification |
//! | [`budget`] | Per-page byte budgets |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`site`] | Build orchestration and asset mirroring |
//! | [`serve`] | In-memory development server |
//! | [`config`] | `site.toml` / `site.json` loading, validation, stock config |
//! | [`types`] | Shared data: `Entry`, `RenderedSite` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Renderers, One Interface
//!
//! Bodies go through a [`render::BodyRenderer`] chosen once per build. The
//! rich renderer is compiled in with the default `rich-markdown` feature;
//! without it, or with `renderer = "fallback"`, a small line-based renderer
//! handles headings, paragraphs, fenced code, emphasis, images and links.
//! Nothing downstream knows which one ran.
//!
//! ## Chrome Is Data
//!
//! The embedded stylesheet and scripts live in `static/` and reach the
//! templates through a [`generate::ChromeAssets`] value passed to
//! [`generate::Chrome`]. Tests swap in tiny stand-ins.
//!
//! ## Budgets Warn By Default
//!
//! Oversized pages are reported and written. `budget.mode = "strict"` (or
//! `--strict-budget`) turns any overage into an error raised before writing.

pub mod budget;
pub mod compact;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod serve;
pub mod site;
pub mod sitemap;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
