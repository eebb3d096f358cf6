//! Site configuration module.
//!
//! Handles loading and validating the site file (`site.toml` by default).
//! The file is read once at the start of a build; nothing mutates the result
//! afterwards except the explicit CLI [`Overrides`].
//!
//! ## Formats
//!
//! The file format follows the extension: `.json` is parsed as JSON, anything
//! else as TOML. Keys are snake_case; the camelCase spellings of older
//! `site.json` files (`siteUrl`, `paletteDark`, `defaultThumbnail`, `themeCss`,
//! `robotsTxt`, `userAgent`, `crawlDelay`, `cardBorder`, `siteTitle`) are
//! accepted as aliases.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "TinyBlog"           # Brand text in the navbar
//! # site_title = "..."         # <title> of the index (defaults to `title`)
//! description = ""             # <meta name="description">
//! lang = "en"                  # <html lang>
//! base_url = "/"               # URL prefix of every generated link
//! # site_url = "https://..."   # Canonical origin; enables sitemap.xml
//! # favicon = "/favicon.png"
//! # default_thumbnail = "/img/default.png"
//! # theme = "paper"            # URL, .css path, or theme name (themes/<name>.css)
//! # theme_css = "assets/css/theme.css"
//!
//! [palette]                    # Light palette override (html[data-theme=light])
//! bg = "#fff"
//! fg = "#111"
//! muted = "#666"
//! link = "#0a6cff"
//! accent = "#3b82f6"
//! card = "#f8fafc"
//! card_border = "#e5e7eb"
//!
//! [palette_dark]               # Dark palette override (html[data-theme=dark])
//!
//! [presentation]               # Author block on the index
//! enabled = false
//! title = ""
//! text = ""
//! # photo = "/img/me.jpg"
//!
//! [social]                     # platform = URL
//! # github = "https://github.com/me"
//!
//! [robots]                     # Explicit robots.txt policy
//! user_agent = "*"
//! allow = ["/"]                # string or list
//! disallow = []                # string or list
//! # crawl_delay = 10
//! sitemap = true
//! comments = []                # string or list
//!
//! [budget]
//! index = 14336
//! article = 30720
//! default = 14336
//! mode = "warn"                # or "strict"
//!
//! [markdown]
//! renderer = "rich"            # or "fallback"
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing file is not an
//! error: the stock defaults are used.

use crate::budget::{BudgetMode, DEFAULT_ARTICLE_BYTES, DEFAULT_INDEX_BYTES, DEFAULT_OTHER_BYTES};
use crate::render::RendererKind;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration.
///
/// All fields have defaults; a site file only specifies what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand text, and the suffix of every page `<title>`.
    pub title: String,
    /// `<title>` of the index page. Falls back to `title`.
    #[serde(alias = "siteTitle")]
    pub site_title: Option<String>,
    pub description: String,
    pub lang: String,
    /// Canonical origin (`https://example.org`). Sitemap is skipped without it.
    #[serde(alias = "siteUrl")]
    pub site_url: Option<String>,
    /// Prefix of every generated link. Must end with `/`.
    #[serde(alias = "baseUrl")]
    pub base_url: String,
    pub favicon: Option<String>,
    #[serde(alias = "defaultThumbnail")]
    pub default_thumbnail: Option<String>,
    /// Theme URL, `.css` path, or theme name.
    pub theme: Option<String>,
    /// Explicit stylesheet path or URL, used when `theme` is unset.
    #[serde(alias = "themeCss")]
    pub theme_css: Option<String>,
    pub palette: Option<Palette>,
    #[serde(alias = "paletteDark")]
    pub palette_dark: Option<Palette>,
    pub presentation: PresentationConfig,
    /// Platform name → profile URL.
    pub social: BTreeMap<String, String>,
    /// Explicit robots policy. `None` means allow everything.
    #[serde(alias = "robotsTxt")]
    pub robots: Option<RobotsConfig>,
    pub budget: BudgetConfig,
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "TinyBlog".to_string(),
            site_title: None,
            description: String::new(),
            lang: "en".to_string(),
            site_url: None,
            base_url: "/".to_string(),
            favicon: None,
            default_thumbnail: None,
            theme: None,
            theme_css: None,
            palette: None,
            palette_dark: None,
            presentation: PresentationConfig::default(),
            social: BTreeMap::new(),
            robots: None,
            budget: BudgetConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lang.trim().is_empty() {
            return Err(ConfigError::Validation("lang must not be empty".into()));
        }
        if !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base_url must end with '/' (got {:?})",
                self.base_url
            )));
        }
        if let Some(url) = self.site_url() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "site_url must start with http:// or https:// (got {url:?})"
                )));
            }
        }
        if self.budget.index == 0 || self.budget.article == 0 || self.budget.default == 0 {
            return Err(ConfigError::Validation(
                "budget values must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Canonical origin, if configured and non-blank.
    pub fn site_url(&self) -> Option<&str> {
        non_blank(self.site_url.as_deref())
    }

    /// `<title>` of the index page, and the suffix of every other title.
    pub fn index_title(&self) -> &str {
        non_blank(self.site_title.as_deref()).unwrap_or(&self.title)
    }

    /// Apply CLI overrides, then re-validate.
    pub fn apply(&mut self, overrides: &Overrides) -> Result<(), ConfigError> {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(max_bytes) = overrides.max_bytes {
            self.budget.default = max_bytes;
        }
        if let Some(renderer) = overrides.renderer {
            self.markdown.renderer = renderer;
        }
        if overrides.strict_budget {
            self.budget.mode = BudgetMode::Strict;
        }
        self.validate()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build parameters given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub max_bytes: Option<u64>,
    pub renderer: Option<RendererKind>,
    pub strict_budget: bool,
}

/// Color palette, emitted as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub link: String,
    pub accent: String,
    pub card: String,
    #[serde(alias = "cardBorder")]
    pub card_border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: "#fff".to_string(),
            fg: "#111".to_string(),
            muted: "#666".to_string(),
            link: "#0a6cff".to_string(),
            accent: "#3b82f6".to_string(),
            card: "#f8fafc".to_string(),
            card_border: "#e5e7eb".to_string(),
        }
    }
}

/// Author block shown above the index listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresentationConfig {
    pub enabled: bool,
    pub title: String,
    pub text: String,
    pub photo: Option<String>,
}

/// Explicit robots.txt policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotsConfig {
    #[serde(alias = "userAgent")]
    pub user_agent: String,
    #[serde(deserialize_with = "one_or_many")]
    pub allow: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub disallow: Vec<String>,
    #[serde(alias = "crawlDelay")]
    pub crawl_delay: Option<u32>,
    /// Reference the sitemap (only when `site_url` is set).
    pub sitemap: bool,
    /// Free-text lines prepended as `# ...` comments.
    #[serde(deserialize_with = "one_or_many")]
    pub comments: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            user_agent: "*".to_string(),
            allow: Vec::new(),
            disallow: Vec::new(),
            crawl_delay: None,
            sitemap: true,
            comments: Vec::new(),
        }
    }
}

/// Accept either `"x"` or `["x", "y"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Byte thresholds per page class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    /// Top-level `index.html`.
    pub index: u64,
    /// Post and page documents.
    pub article: u64,
    /// Everything else (category listings). `--max-bytes` overrides it.
    pub default: u64,
    pub mode: BudgetMode,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX_BYTES,
            article: DEFAULT_ARTICLE_BYTES,
            default: DEFAULT_OTHER_BYTES,
            mode: BudgetMode::Warn,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub renderer: RendererKind,
}

// =============================================================================
// Loading
// =============================================================================

/// Parse config text; `json` selects the JSON parser.
pub fn parse_config(content: &str, json: bool, path: &Path) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = if json {
        serde_json::from_str(content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Load the site file at `path`.
///
/// Returns the stock defaults when the file does not exist. Rejects unknown
/// keys and validates the result.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_config(&content, json, path)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# TinyBlog Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Brand text in the navbar, and the suffix of every page <title>.
title = "TinyBlog"

# <title> of the index page. Defaults to `title`.
# site_title = "TinyBlog - notes and experiments"

# <meta name="description"> for pages without their own excerpt.
description = ""

# <html lang="...">
lang = "en"

# Prefix of every generated link. Use "/blog/" when the site lives in a
# subdirectory. Must end with "/".
base_url = "/"

# Canonical origin. When set, sitemap.xml is generated and referenced from
# robots.txt.
# site_url = "https://example.org"

# Asset references: absolute URLs and data: URIs are used as-is, "/x" is
# resolved against base_url, anything else is appended to base_url.
# favicon = "/favicon.png"
# default_thumbnail = "/img/default.png"

# Theme stylesheet, in order of precedence:
#   theme     = "https://..."       remote stylesheet
#   theme     = "css/paper.css"     file under the public directory
#   theme     = "Paper"             public/themes/paper.css
#   theme_css = "assets/css/x.css"  explicit path (or URL)
# Without either, --theme-css (default assets/css/theme.css) is used. A missing
# local stylesheet is replaced by the built-in one.
# theme = "paper"
# theme_css = "assets/css/theme.css"

# ---------------------------------------------------------------------------
# Palettes (CSS custom properties). Omitted keys use the values shown.
# ---------------------------------------------------------------------------
# [palette]
# bg = "#fff"
# fg = "#111"
# muted = "#666"
# link = "#0a6cff"
# accent = "#3b82f6"
# card = "#f8fafc"
# card_border = "#e5e7eb"

# [palette_dark]
# bg = "#0b0f14"
# fg = "#e5e7eb"

# ---------------------------------------------------------------------------
# Presentation block above the index listing
# ---------------------------------------------------------------------------
[presentation]
enabled = false
title = ""
text = ""
# photo = "/img/me.jpg"

# ---------------------------------------------------------------------------
# Social links (platform = URL). Icons are read from assets/icons/<platform>.svg
# ---------------------------------------------------------------------------
[social]
# github = "https://github.com/me"
# x = "https://x.com/me"

# ---------------------------------------------------------------------------
# robots.txt. Without this section every agent is allowed everything.
# ---------------------------------------------------------------------------
# [robots]
# user_agent = "*"
# allow = ["/"]
# disallow = ["/drafts/"]
# crawl_delay = 10
# sitemap = true
# comments = ["Hello, crawlers"]

# ---------------------------------------------------------------------------
# Per-page size budgets in bytes
# ---------------------------------------------------------------------------
[budget]
index = 14336     # index.html
article = 30720   # posts and pages
default = 14336   # everything else; --max-bytes overrides it
mode = "warn"     # "strict" stops the build before writing

# ---------------------------------------------------------------------------
# Markdown
# ---------------------------------------------------------------------------
[markdown]
# "rich" (full markdown) or "fallback" (small built-in subset)
renderer = "rich"
"##
}

/// CSS for the configured palettes; empty when neither is set.
pub fn palette_css(light: Option<&Palette>, dark: Option<&Palette>) -> String {
    let mut css = String::new();
    for (theme, palette) in [("light", light), ("dark", dark)] {
        if let Some(p) = palette {
            css.push_str(&format!(
                "html[data-theme={theme}]{{--bg:{};--fg:{};--muted:{};--link:{};--accent:{};--card:{};--card-border:{}}}",
                p.bg, p.fg, p.muted, p.link, p.accent, p.card, p.card_border,
            ));
        }
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "TinyBlog");
        assert_eq!(config.lang, "en");
        assert_eq!(config.base_url, "/");
        assert_eq!(config.site_url(), None);
        assert_eq!(config.budget.index, 14 * 1024);
        assert_eq!(config.budget.article, 30 * 1024);
        assert_eq!(config.budget.mode, BudgetMode::Warn);
        assert_eq!(config.markdown.renderer, RendererKind::Rich);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
title = "My Blog"

[palette]
bg = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "My Blog");
        let palette = config.palette.unwrap();
        // Overridden value
        assert_eq!(palette.bg, "#fafafa");
        // Default values preserved
        assert_eq!(palette.fg, "#111");
        assert_eq!(config.palette_dark, None);
        assert_eq!(config.lang, "en");
    }

    #[test]
    fn index_title_prefers_site_title() {
        let mut config = SiteConfig::default();
        assert_eq!(config.index_title(), "TinyBlog");
        config.site_title = Some("TinyBlog - notes".into());
        assert_eq!(config.index_title(), "TinyBlog - notes");
        config.site_title = Some("  ".into());
        assert_eq!(config.index_title(), "TinyBlog");
    }

    #[test]
    fn blank_site_url_is_none() {
        let config: SiteConfig = toml::from_str("site_url = \"\"").unwrap();
        assert_eq!(config.site_url(), None);
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // robots
    // =========================================================================

    #[test]
    fn robots_accepts_string_or_list() {
        let toml = r#"
[robots]
allow = "/"
disallow = ["/a", "/b"]
comments = "hi"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let robots = config.robots.unwrap();
        assert_eq!(robots.user_agent, "*");
        assert_eq!(robots.allow, ["/"]);
        assert_eq!(robots.disallow, ["/a", "/b"]);
        assert_eq!(robots.comments, ["hi"]);
        assert!(robots.sitemap);
    }

    // =========================================================================
    // JSON and aliases
    // =========================================================================

    #[test]
    fn json_with_camel_case_aliases() {
        let json = r##"{
            "title": "Old Blog",
            "siteTitle": "Old Blog Home",
            "siteUrl": "https://example.org",
            "defaultThumbnail": "/img/d.png",
            "themeCss": "assets/css/x.css",
            "paletteDark": {"bg": "#000", "cardBorder": "#222"},
            "robotsTxt": {"userAgent": "bot", "crawlDelay": 5},
            "social": {"github": "https://github.com/x"}
        }"##;
        let config = parse_config(json, true, Path::new("site.json")).unwrap();
        assert_eq!(config.index_title(), "Old Blog Home");
        assert_eq!(config.site_url(), Some("https://example.org"));
        assert_eq!(config.default_thumbnail.as_deref(), Some("/img/d.png"));
        assert_eq!(config.theme_css.as_deref(), Some("assets/css/x.css"));
        let dark = config.palette_dark.unwrap();
        assert_eq!(dark.bg, "#000");
        assert_eq!(dark.card_border, "#222");
        let robots = config.robots.unwrap();
        assert_eq!(robots.user_agent, "bot");
        assert_eq!(robots.crawl_delay, Some(5));
        assert_eq!(config.social["github"], "https://github.com/x");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "title = \"Notes\"\nlang = \"fr\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.lang, "fr");
        // Unspecified values should be defaults
        assert_eq!(config.base_url, "/");
    }

    #[test]
    fn load_config_reads_json_by_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.json");
        fs::write(&path, r#"{"title": "From JSON"}"#).unwrap();
        assert_eq!(load_config(&path).unwrap().title, "From JSON");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn load_config_invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("titel = \"typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[palette]\nbackground = \"#fff\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // validation and overrides
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_url_trailing_slash() {
        let config = SiteConfig {
            base_url: "/blog".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_site_url_scheme() {
        let config = SiteConfig {
            site_url: Some("example.org".into()),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_lang() {
        let config = SiteConfig {
            lang: " ".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_budget() {
        let mut config = SiteConfig::default();
        config.budget.article = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "base_url = \"/blog\"").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn overrides_applied() {
        let mut config = SiteConfig::default();
        config
            .apply(&Overrides {
                base_url: Some("/blog/".into()),
                max_bytes: Some(2048),
                renderer: Some(RendererKind::Fallback),
                strict_budget: true,
            })
            .unwrap();
        assert_eq!(config.base_url, "/blog/");
        assert_eq!(config.budget.default, 2048);
        assert_eq!(config.markdown.renderer, RendererKind::Fallback);
        assert_eq!(config.budget.mode, BudgetMode::Strict);
    }

    #[test]
    fn overrides_revalidated() {
        let mut config = SiteConfig::default();
        let result = config.apply(&Overrides {
            base_url: Some("blog".into()),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = SiteConfig::default();
        config.apply(&Overrides::default()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[palette]",
            "[palette_dark]",
            "[presentation]",
            "[social]",
            "[robots]",
            "[budget]",
            "[markdown]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    // =========================================================================
    // palette CSS
    // =========================================================================

    #[test]
    fn palette_css_empty_without_palettes() {
        assert_eq!(palette_css(None, None), "");
    }

    #[test]
    fn palette_css_light_and_dark() {
        let dark = Palette {
            bg: "#000".into(),
            ..Palette::default()
        };
        let css = palette_css(Some(&Palette::default()), Some(&dark));
        assert!(css.starts_with(
            "html[data-theme=light]{--bg:#fff;--fg:#111;--muted:#666;--link:#0a6cff;--accent:#3b82f6;--card:#f8fafc;--card-border:#e5e7eb}"
        ));
        assert!(css.contains("html[data-theme=dark]{--bg:#000;"));
    }
}
