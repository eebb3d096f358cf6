//! Build orchestration.
//!
//! A build runs in two phases:
//!
//! ```text
//! render_site   content/ + site config  →  Site (everything in memory)
//! write_site    Site                    →  out/ (documents, sitemap, robots, assets)
//! ```
//!
//! Nothing touches the output directory until every document has been
//! rendered, so a build that fails while collecting or rendering leaves the
//! previous output untouched. In strict budget mode the size check also runs
//! before the first write.
//!
//! ## Output Structure
//!
//! ```text
//! out/
//! ├── index.html
//! ├── about.html               # Pages, keyed by stem
//! ├── hello-world.html         # Posts, by slug
//! ├── category/
//! │   └── rust.html
//! ├── sitemap.xml              # Only with site_url
//! ├── robots.txt
//! └── assets/                  # Mirror of public/, CSS minified
//!     └── css/theme.css        # Built-in theme when public/ has none
//! ```
//!
//! Serve mode uses [`render_site`] alone and answers requests from the
//! in-memory [`Site`].

use crate::budget::{self, BudgetMode, BudgetReport};
use crate::compact::{compact_html, minify_css};
use crate::config::{ConfigError, SiteConfig};
use crate::generate::{self, Chrome, ChromeAssets, ThemeRef};
use crate::render::select_renderer;
use crate::scan::{self, RouteClash, ScanError};
use crate::sitemap;
use crate::taxonomy::{self, CategoryIndex};
use crate::types::{Entry, RenderedSite};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Size budget exceeded: {0}")]
    BudgetExceeded(String),
}

/// Input and output locations of a build.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub content: PathBuf,
    /// Static files mirrored to `out/assets/`
    pub public: PathBuf,
    pub out: PathBuf,
    /// Theme stylesheet used when the config names none
    pub theme_css: String,
}

/// Collected content, posts newest first.
#[derive(Debug, Default)]
pub struct Content {
    pub posts: Vec<Entry>,
    pub pages: BTreeMap<String, Entry>,
    pub categories: CategoryIndex,
    /// Example files that were not built
    pub skipped: Vec<String>,
    /// Documents left out because their route was taken
    pub clashes: Vec<RouteClash>,
}

/// Collect, sort and index the content directory.
pub fn load_content(content_dir: &Path) -> Result<Content, ScanError> {
    let collection = scan::collect(content_dir)?;
    let mut posts = collection.posts;
    taxonomy::sort_newest_first(&mut posts);
    let categories = CategoryIndex::build(&posts);
    Ok(Content {
        posts,
        pages: collection.pages,
        categories,
        skipped: collection.skipped,
        clashes: collection.clashes,
    })
}

/// Built-in stylesheet standing in for a missing local theme file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTheme {
    /// Path below `assets/`
    pub rel: String,
    pub css: String,
}

impl GeneratedTheme {
    pub fn route(&self) -> String {
        format!("/assets/{}", self.rel)
    }
}

/// A fully rendered site, not yet written.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub content: Content,
    /// Documents in generation order: index, pages, posts, categories
    pub rendered: RenderedSite,
    pub sitemap: Option<String>,
    pub robots: String,
    pub theme: ThemeRef,
    pub generated_theme: Option<GeneratedTheme>,
    /// Name of the body renderer that was used
    pub renderer: &'static str,
}

/// Render every document of the site into memory.
pub fn render_site(
    config: SiteConfig,
    paths: &SitePaths,
    assets: ChromeAssets,
) -> Result<Site, SiteError> {
    let content = load_content(&paths.content)?;
    let renderer = select_renderer(config.markdown.renderer);

    let theme = ThemeRef::resolve(&config, &paths.theme_css);
    let generated_theme = theme
        .local_path()
        .filter(|rel| !paths.public.join(rel).exists())
        .map(|rel| GeneratedTheme {
            rel: rel.to_string(),
            css: minify_css(assets.base_css),
        });

    let rendered = {
        let chrome = Chrome::new(&config, assets, &theme, &content.pages, &content.categories);
        let mut rendered = RenderedSite::default();

        let index = generate::render_index(&chrome, &content.posts);
        rendered.insert(scan::INDEX_ROUTE, compact_html(&index.into_string()));

        for page in content.pages.values() {
            let html = generate::render_page(&chrome, page, renderer.as_ref());
            rendered.insert(page.route(), compact_html(&html.into_string()));
        }
        for post in &content.posts {
            let html = generate::render_post(&chrome, post, renderer.as_ref());
            rendered.insert(post.route(), compact_html(&html.into_string()));
        }
        for category in content.categories.iter() {
            let html = generate::render_category(&chrome, category, &content.posts);
            rendered.insert(category.route(), compact_html(&html.into_string()));
        }
        rendered
    };

    let sitemap = sitemap::build_sitemap(
        &config,
        &content.posts,
        &content.pages,
        &content.categories,
    );
    let robots = sitemap::robots_txt(&config);

    Ok(Site {
        config,
        content,
        rendered,
        sitemap,
        robots,
        theme,
        generated_theme,
        renderer: renderer.name(),
    })
}

/// What [`write_site`] did, for reporting.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// One report per written document, in generation order
    pub budgets: Vec<BudgetReport>,
    /// Number of URLs in the written sitemap
    pub sitemap_urls: Option<usize>,
    /// Stylesheets minified while mirroring, relative to `public/`
    pub minified: Vec<String>,
    /// Other files copied verbatim
    pub copied: usize,
    /// Where the built-in theme was written, if it was
    pub generated_theme: Option<PathBuf>,
}

/// Write a rendered site to `paths.out`.
///
/// In strict budget mode any overage fails the build before the first write.
pub fn write_site(site: &Site, paths: &SitePaths) -> Result<WriteReport, SiteError> {
    let budgets = budget::check(&site.rendered, &site.config.budget);
    if site.config.budget.mode == BudgetMode::Strict {
        let over = budget::overages(&budgets);
        if !over.is_empty() {
            let detail: Vec<String> = over
                .iter()
                .map(|r| format!("{} ({} > {} bytes)", r.route, r.bytes, r.threshold))
                .collect();
            return Err(SiteError::BudgetExceeded(detail.join(", ")));
        }
    }

    let out = &paths.out;
    for page in site.rendered.iter() {
        write_file(&out.join(page.route.trim_start_matches('/')), &page.html)?;
    }

    let mut report = WriteReport {
        budgets,
        ..WriteReport::default()
    };

    if let Some(xml) = &site.sitemap {
        write_file(&out.join("sitemap.xml"), xml)?;
        report.sitemap_urls = Some(xml.matches("<url>").count());
    }
    write_file(&out.join("robots.txt"), &site.robots)?;

    let assets_dir = out.join("assets");
    fs::create_dir_all(&assets_dir)?;
    if paths.public.is_dir() {
        mirror_assets(&paths.public, &assets_dir, &mut report)?;
    }

    if let Some(theme) = &site.generated_theme {
        let path = assets_dir.join(&theme.rel);
        write_file(&path, &theme.css)?;
        report.generated_theme = Some(path);
    }

    Ok(report)
}

fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Copy `public/**` into `assets/`, minifying stylesheets on the way.
fn mirror_assets(public: &Path, assets_dir: &Path, report: &mut WriteReport) -> Result<(), SiteError> {
    for entry in WalkDir::new(public).sort_by_file_name() {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: public.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(public) else {
            continue;
        };
        let dst = assets_dir.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }

        let is_css = rel
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));
        if is_css {
            let css = fs::read_to_string(entry.path())?;
            fs::write(&dst, minify_css(&css))?;
            report.minified.push(rel.to_string_lossy().replace('\\', "/"));
        } else {
            fs::copy(entry.path(), &dst)?;
            report.copied += 1;
        }
    }
    Ok(())
}
