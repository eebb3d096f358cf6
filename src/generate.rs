//! HTML page assembly.
//!
//! Turns entries and category buckets into complete documents. Every document
//! shares the same [`Chrome`]: navigation bar, theme stylesheet, palette CSS,
//! boot and navigation scripts. The chrome is built once per build from the
//! [`SiteConfig`] and a [`ChromeAssets`] value, then passed to each renderer.
//!
//! ## Generated Documents
//!
//! - **Index** (`/index.html`): optional presentation block, then every post as a card
//! - **Pages** (`/<key>.html`): the rendered body under the page title
//! - **Posts** (`/<slug>.html`): meta line, optional thumbnail, rendered body
//! - **Categories** (`/category/<slug>.html`): the bucket's posts as cards, newest first
//!
//! ## Document Layout
//!
//! ```text
//! <head>   title, description, viewport, favicon, fonts, theme, boot script, palette
//! <body>   navbar
//!          <main> <header>heading</header> body <footer></footer> </main>
//!          highlight.js, navigation script
//! ```
//!
//! ## Asset URLs
//!
//! Configured references (favicon, thumbnails, presentation photo) go through
//! [`asset_url`]: absolute `http(s)` URLs and `data:` URIs pass through, a
//! leading `/` is resolved against the base URL, anything else is appended to
//! it.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated title, name and URL is escaped.

use crate::compact::minify_css;
use crate::config::{self, PresentationConfig, SiteConfig};
use crate::naming::slugify;
use crate::render::BodyRenderer;
use crate::taxonomy::{Category, CategoryIndex};
use crate::types::Entry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeMap;

/// Stylesheet path used when neither `theme` nor `theme_css` is configured.
pub const DEFAULT_THEME_CSS: &str = "assets/css/theme.css";

const FONTS_URL: &str = "https://fonts.googleapis.com/css2?family=EB+Garamond:ital,wght@0,400..800;1,400..800&family=Geist:wght@100..900&family=Ubuntu+Mono:ital,wght@0,400;0,700;1,400;1,700&display=swap";
const HLJS_SCRIPT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.11.1/highlight.min.js";

/// Heading of the index listing.
const INDEX_HEADING: &str = "All posts";

/// Static CSS and scripts embedded in every document.
#[derive(Debug, Clone, Copy)]
pub struct ChromeAssets {
    /// Stock stylesheet, written out when the configured theme file is missing
    pub base_css: &'static str,
    /// Inline head script: applies the stored or preferred color scheme
    pub boot_js: &'static str,
    /// Inline body script: theme toggle, menu toggle, category select
    pub nav_js: &'static str,
}

impl Default for ChromeAssets {
    fn default() -> Self {
        Self {
            base_css: include_str!("../static/theme.css"),
            boot_js: include_str!("../static/boot.js"),
            nav_js: include_str!("../static/nav.js"),
        }
    }
}

// ============================================================================
// Asset and theme resolution
// ============================================================================

/// Resolve a configured asset reference against the base URL.
///
/// Returns `None` for a blank reference.
pub fn asset_url(reference: &str, base_url: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    if ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| reference.starts_with(scheme))
    {
        return Some(reference.to_string());
    }
    if reference.starts_with('/') {
        return Some(format!("{}{reference}", base_url.trim_end_matches('/')));
    }
    Some(format!("{base_url}{reference}"))
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Where the theme stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    /// Linked as-is
    Remote(String),
    /// Path below the assets directory (`css/theme.css` → `/assets/css/theme.css`)
    Local(String),
}

impl ThemeRef {
    /// Resolve by precedence: `theme`, then `theme_css`, then `fallback_css`.
    ///
    /// A `theme` value is a URL, a `.css` path, or a name looked up as
    /// `themes/<slug>.css`; a name without slug characters is ignored. Paths
    /// lose a leading `/` and `assets/` prefix.
    pub fn resolve(config: &SiteConfig, fallback_css: &str) -> Self {
        let theme = config
            .theme
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(theme) = theme {
            if is_remote(theme) {
                return ThemeRef::Remote(theme.to_string());
            }
            if theme.ends_with(".css") {
                return ThemeRef::Local(assets_relative(theme));
            }
            let name = slugify(theme);
            if !name.is_empty() {
                return ThemeRef::Local(format!("themes/{name}.css"));
            }
        }

        let explicit = config
            .theme_css
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback_css);
        if is_remote(explicit) {
            ThemeRef::Remote(explicit.to_string())
        } else {
            ThemeRef::Local(assets_relative(explicit))
        }
    }

    /// URL of the stylesheet as linked from documents.
    pub fn url(&self, base_url: &str) -> String {
        match self {
            ThemeRef::Remote(url) => url.clone(),
            ThemeRef::Local(rel) => format!("{}/assets/{rel}", base_url.trim_end_matches('/')),
        }
    }

    /// Path below the public directory, for local stylesheets.
    pub fn local_path(&self) -> Option<&str> {
        match self {
            ThemeRef::Remote(_) => None,
            ThemeRef::Local(rel) => Some(rel),
        }
    }
}

fn assets_relative(path: &str) -> String {
    let path = path.trim_start_matches('/');
    path.strip_prefix("assets/").unwrap_or(path).to_string()
}

// ============================================================================
// Chrome
// ============================================================================

/// Site-wide pieces shared by every document of one build.
pub struct Chrome<'a> {
    config: &'a SiteConfig,
    assets: ChromeAssets,
    nav: Markup,
    palette_css: String,
    theme_url: String,
    favicon_url: Option<String>,
    default_thumbnail: Option<String>,
}

impl<'a> Chrome<'a> {
    pub fn new(
        config: &'a SiteConfig,
        assets: ChromeAssets,
        theme: &ThemeRef,
        pages: &BTreeMap<String, Entry>,
        categories: &CategoryIndex,
    ) -> Self {
        let base = &config.base_url;
        let palette_css = minify_css(&config::palette_css(
            config.palette.as_ref(),
            config.palette_dark.as_ref(),
        ));
        Self {
            config,
            assets,
            nav: render_nav(config, pages, categories),
            palette_css,
            theme_url: theme.url(base),
            favicon_url: config.favicon.as_deref().and_then(|f| asset_url(f, base)),
            default_thumbnail: config
                .default_thumbnail
                .as_deref()
                .and_then(|t| asset_url(t, base)),
        }
    }

    fn base(&self) -> &str {
        &self.config.base_url
    }

    /// `"<title> - <site title>"`
    fn page_title(&self, title: &str) -> String {
        format!("{title} - {}", self.config.index_title())
    }

    /// Wrap a header and body fragment into a complete document.
    fn document(&self, title: &str, description: &str, header: Markup, body: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(self.config.lang) {
                head {
                    meta charset="utf-8";
                    title { (title) }
                    @if !description.is_empty() {
                        meta name="description" content=(description);
                    }
                    meta name="viewport" content="width=device-width,initial-scale=1";
                    meta name="generator" content="TinyBlog";
                    @if let Some(favicon) = &self.favicon_url {
                        link rel="icon" href=(favicon);
                    }
                    link rel="preconnect" href="https://fonts.googleapis.com";
                    link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                    link rel="stylesheet" href=(FONTS_URL);
                    link rel="stylesheet" href=(self.theme_url);
                    script { (PreEscaped(self.assets.boot_js)) }
                    @if !self.palette_css.is_empty() {
                        style { (PreEscaped(&self.palette_css)) }
                    }
                }
                body {
                    (self.nav)
                    main {
                        header { (header) }
                        (body)
                        footer {}
                    }
                    script src=(HLJS_SCRIPT_URL) {}
                    script { "hljs.highlightAll();" }
                    script { (PreEscaped(self.assets.nav_js)) }
                }
            }
        }
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Navbar: brand, toggles, page links, category select, social links.
pub fn render_nav(
    config: &SiteConfig,
    pages: &BTreeMap<String, Entry>,
    categories: &CategoryIndex,
) -> Markup {
    let base = &config.base_url;
    let mut pages_by_title: Vec<(&String, &Entry)> = pages.iter().collect();
    pages_by_title.sort_by(|a, b| a.1.title.cmp(&b.1.title));

    html! {
        div.navbar {
            div.navwrap {
                a.brand.navlink href={ (base) "index.html" } { (config.title) }
                span.spacer {}
                button.btn id="menuToggle" aria-label="Menu" title="Menu" { "☰" }
                button.btn id="themeToggle" aria-label="Toggle theme" title="Toggle theme" { "🌙" }
            }
            div.navwrap.menu-panel {
                a.navlink href={ (base) "index.html" } { "Home" }
                @for (key, page) in &pages_by_title {
                    a.navlink href={ (base) (key) ".html" } { (page.title) }
                }
                @if !categories.is_empty() {
                    select.catselect id="categorySelect" aria-label="Categories" {
                        option value="" { "Categories" }
                        option value={ (base) "index.html" } { "All" }
                        @for category in categories.sorted() {
                            option value={ (base) "category/" (category.slug) ".html" } {
                                (category.name)
                            }
                        }
                    }
                }
                (render_social(&config.social, base))
            }
        }
    }
}

/// Icon file name for a social platform.
fn social_icon(platform: &str) -> String {
    match platform.to_lowercase().as_str() {
        "x" => "twitter-x".to_string(),
        other => other.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Icon links to social profiles; entries with an empty URL are skipped.
pub fn render_social(social: &BTreeMap<String, String>, base: &str) -> Markup {
    let links: Vec<(&String, &str)> = social
        .iter()
        .map(|(platform, url)| (platform, url.trim()))
        .filter(|(_, url)| !url.is_empty())
        .collect();

    html! {
        @if !links.is_empty() {
            div.social-links {
                @for (platform, url) in &links {
                    @let label = capitalize(platform);
                    a.social-link href=(url) title=(label) target="_blank" rel="noopener" {
                        img.social-icon
                            src={ (base) "assets/icons/" (social_icon(platform)) ".svg" }
                            alt=(label);
                    }
                }
            }
        }
    }
}

/// Author block above the index listing, if enabled and non-empty.
pub fn render_presentation(presentation: &PresentationConfig, base: &str) -> Option<Markup> {
    if !presentation.enabled {
        return None;
    }
    let photo = presentation
        .photo
        .as_deref()
        .and_then(|p| asset_url(p, base));
    let title = presentation.title.trim();
    let text = presentation.text.trim();
    if photo.is_none() && title.is_empty() && text.is_empty() {
        return None;
    }

    Some(html! {
        div.header-content {
            div.presentation {
                @if let Some(photo) = &photo {
                    img.presentation-photo src=(photo) alt="Profile photo" loading="lazy";
                }
                @if !title.is_empty() {
                    h1.presentation-title { (title) }
                }
                @if !text.is_empty() {
                    h2.presentation-text { (text) }
                }
            }
        }
    })
}

// ============================================================================
// Listings
// ============================================================================

/// Date, author, reading time; `chips` renders the category chips.
fn post_meta(entry: &Entry, chips: Markup) -> Markup {
    html! {
        div.postmeta {
            span { (entry.date_str()) }
            @if let Some(author) = &entry.author {
                span { "👤 By " (author) }
            }
            @if let Some(minutes) = entry.reading_minutes {
                span { "⌛ " (minutes) " min read" }
            }
            (chips)
        }
    }
}

/// Ordered list of post cards.
///
/// Each card shows, in order: thumbnail (own, else the default thumbnail,
/// else a placeholder glyph), title, subtitle, date, author and reading time,
/// category chips.
pub fn render_cards<'e>(
    entries: impl IntoIterator<Item = &'e Entry>,
    base: &str,
    default_thumbnail: Option<&str>,
) -> Markup {
    html! {
        ol.postlist {
            @for entry in entries {
                @let thumbnail = entry
                    .thumbnail
                    .as_deref()
                    .and_then(|t| asset_url(t, base))
                    .or_else(|| default_thumbnail.map(String::from));
                li {
                    a.postcard href={ (base) (entry.slug) ".html" } {
                        div.postcontent {
                            div.postthumbnail {
                                @if let Some(src) = &thumbnail {
                                    img src=(src) alt={ "Thumbnail for " (entry.title) } loading="lazy";
                                } @else {
                                    div.postthumbnail-placeholder { "📄" }
                                }
                            }
                            div.postinfo {
                                h3.posttitle { (entry.title) }
                                @if !entry.subtitle.is_empty() {
                                    h4.postsubtitle { (entry.subtitle) }
                                }
                                (post_meta(entry, html! {
                                    @for name in &entry.categories {
                                        span.chip { (name) }
                                    }
                                }))
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// `/index.html`: presentation block and every post, newest first.
pub fn render_index(chrome: &Chrome, posts: &[Entry]) -> Markup {
    let config = chrome.config;
    let header = match render_presentation(&config.presentation, chrome.base()) {
        Some(presentation) => html! {
            (presentation)
            h2 { (INDEX_HEADING) }
        },
        None => html! { h1 { (INDEX_HEADING) } },
    };
    let body = render_cards(posts, chrome.base(), chrome.default_thumbnail.as_deref());
    chrome.document(config.index_title(), &config.description, header, body)
}

/// A standalone page: title heading and rendered body.
pub fn render_page(chrome: &Chrome, page: &Entry, renderer: &dyn BodyRenderer) -> Markup {
    let body = html! { (PreEscaped(renderer.render(&page.body))) };
    chrome.document(
        &chrome.page_title(&page.title),
        &chrome.config.description,
        html! { h1 { (page.title) } },
        body,
    )
}

/// A post: meta line with linked chips, optional thumbnail, rendered body.
///
/// The excerpt is the description, falling back to the site description.
pub fn render_post(chrome: &Chrome, post: &Entry, renderer: &dyn BodyRenderer) -> Markup {
    let base = chrome.base();
    let chips = html! {
        @for (name, slug) in post.category_pairs() {
            a.chip href={ (base) "category/" (slug) ".html" } { (name) }
        }
    };
    let article_thumbnail = post
        .thumbnail
        .as_deref()
        .filter(|_| post.thumbnail_on_article)
        .and_then(|t| asset_url(t, base));

    let body = html! {
        (post_meta(post, chips))
        @if let Some(src) = &article_thumbnail {
            div.article-thumbnail {
                img src=(src) alt={ "Thumbnail for " (post.title) } loading="lazy";
            }
        }
        (PreEscaped(renderer.render(&post.body)))
    };

    let description = if post.excerpt.is_empty() {
        chrome.config.description.as_str()
    } else {
        post.excerpt.as_str()
    };
    chrome.document(
        &chrome.page_title(&post.title),
        description,
        html! { h1 { (post.title) } },
        body,
    )
}

/// `/category/<slug>.html`: the bucket's posts, newest first.
///
/// `posts` must be the slice the category index was built from.
pub fn render_category(chrome: &Chrome, category: &Category, posts: &[Entry]) -> Markup {
    let heading = format!("Category · {}", category.name);
    let body = render_cards(
        category.listing(posts),
        chrome.base(),
        chrome.default_thumbnail.as_deref(),
    );
    chrome.document(
        &chrome.page_title(&heading),
        &chrome.config.description,
        html! { h1 { (heading) } },
        body,
    )
}

// ============================================================================
// Tests
// ============================================================================
