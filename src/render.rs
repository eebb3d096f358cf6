//! Body renderers: markdown text → HTML fragment.
//!
//! The [`BodyRenderer`] trait has two implementations:
//!
//! | Renderer | Coverage |
//! |---|---|
//! | [`RichRenderer`] | CommonMark + tables, strikethrough, task lists, footnotes (pulldown-cmark) |
//! | [`FallbackRenderer`] | A small documented subset, no dependencies |
//!
//! The renderer is chosen once per build by [`select_renderer`]; nothing
//! downstream looks at which one it got. `RichRenderer` only exists when the
//! `rich-markdown` feature is compiled in, so asking for it in a build without
//! the feature quietly falls back.
//!
//! ## Fallback subset
//!
//! Line-oriented, two states (normal, inside a fenced block):
//!
//! ```text
//! ```lang        fenced block, content escaped as one unit, no inline transforms
//! # Title        <h1>
//! ## Title       <h2>
//! ---            <hr>
//! blank line     paragraph break
//! anything else  paragraph text
//! ```
//!
//! Paragraph lines are escaped as they are buffered, joined with spaces, then
//! run through the inline passes in this fixed order: `**bold**`, `*italic*`,
//! `` `code` ``, `![alt](src)`, `[text](href)`. Each pass only sees the output
//! of the previous ones, so the image pass consumes `![..](..)` before the link
//! pass could match its `[..](..)` tail. An unterminated fence is closed at end
//! of input.

use maud::html;
use serde::Deserialize;

/// Converts a document body to an HTML fragment.
pub trait BodyRenderer {
    /// Short name for output lines.
    fn name(&self) -> &'static str;

    fn render(&self, body: &str) -> String;
}

/// Which renderer a build asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Rich,
    Fallback,
}

/// Pick the renderer for a build.
///
/// `Rich` resolves to [`RichRenderer`] when the `rich-markdown` feature is
/// compiled in and to [`FallbackRenderer`] otherwise.
pub fn select_renderer(preference: RendererKind) -> Box<dyn BodyRenderer> {
    match preference {
        #[cfg(feature = "rich-markdown")]
        RendererKind::Rich => Box::new(RichRenderer::default()),
        _ => Box::new(FallbackRenderer),
    }
}

/// HTML-escape text through maud's auto-escaping.
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

// ============================================================================
// Rich renderer
// ============================================================================

/// Full markdown through pulldown-cmark.
#[cfg(feature = "rich-markdown")]
#[derive(Debug, Clone)]
pub struct RichRenderer {
    options: pulldown_cmark::Options,
}

#[cfg(feature = "rich-markdown")]
impl Default for RichRenderer {
    fn default() -> Self {
        use pulldown_cmark::Options;
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_SMART_PUNCTUATION,
        }
    }
}

#[cfg(feature = "rich-markdown")]
impl BodyRenderer for RichRenderer {
    fn name(&self) -> &'static str {
        "rich"
    }

    fn render(&self, body: &str) -> String {
        let parser = pulldown_cmark::Parser::new_ext(body, self.options);
        let mut out = String::with_capacity(body.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut out, parser);
        out
    }
}

// ============================================================================
// Fallback renderer
// ============================================================================

const FENCE: &str = "```";

/// Dependency-free renderer for the documented subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackRenderer;

impl BodyRenderer for FallbackRenderer {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn render(&self, body: &str) -> String {
        let mut state = FallbackState::default();
        for line in body.lines() {
            state.feed(line);
        }
        state.finish()
    }
}

enum Mode {
    Normal,
    Fenced { lang: String, lines: Vec<String> },
}

struct FallbackState {
    mode: Mode,
    /// Escaped paragraph lines waiting for a flush
    paragraph: Vec<String>,
    out: String,
}

impl Default for FallbackState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            paragraph: Vec::new(),
            out: String::new(),
        }
    }
}

impl FallbackState {
    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Mode::Fenced { lines, .. } = &mut self.mode {
            if trimmed.starts_with(FENCE) {
                self.close_fence();
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        if let Some(tag) = trimmed.strip_prefix(FENCE) {
            self.flush_paragraph();
            self.mode = Mode::Fenced {
                lang: tag.trim().to_lowercase(),
                lines: Vec::new(),
            };
        } else if trimmed.is_empty() {
            self.flush_paragraph();
        } else if let Some(text) = line.strip_prefix("# ") {
            self.flush_paragraph();
            self.push_heading(1, text);
        } else if let Some(text) = line.strip_prefix("## ") {
            self.flush_paragraph();
            self.push_heading(2, text);
        } else if trimmed == "---" {
            self.flush_paragraph();
            self.out.push_str("<hr>");
        } else {
            self.paragraph.push(escape(line));
        }
    }

    fn finish(mut self) -> String {
        self.flush_paragraph();
        if matches!(self.mode, Mode::Fenced { .. }) {
            self.close_fence();
        }
        self.out
    }

    fn push_heading(&mut self, level: u8, text: &str) {
        self.out
            .push_str(&format!("<h{level}>{}</h{level}>", escape(text.trim())));
    }

    fn close_fence(&mut self) {
        let Mode::Fenced { lang, lines } = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        let code = escape(&lines.join("\n"));
        if lang.is_empty() {
            self.out.push_str(&format!("<pre><code>{code}</code></pre>"));
        } else {
            self.out.push_str(&format!(
                "<pre><code class=\"language-{}\">{code}</code></pre>",
                escape(&lang)
            ));
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.paragraph.clear();
        let text = joined.trim();
        if !text.is_empty() {
            self.out.push_str(&format!("<p>{}</p>", apply_inline(text)));
        }
    }
}

// ============================================================================
// Inline passes
// ============================================================================

/// Run the inline passes over already-escaped paragraph text.
fn apply_inline(escaped: &str) -> String {
    let text = wrap_spans(escaped, "**", "b");
    let text = wrap_spans(&text, "*", "i");
    let text = wrap_spans(&text, "`", "code");
    let text = replace_images(&text);
    replace_links(&text)
}

/// Replace `marker content marker` with `<tag>content</tag>`.
///
/// Content is at least one character and the closing marker is the nearest
/// one after it. Matches never overlap.
fn wrap_spans(text: &str, marker: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(marker) {
        let content_start = open + marker.len();
        let Some(first) = rest[content_start..].chars().next() else {
            break;
        };
        let search_from = content_start + first.len_utf8();
        let Some(close) = rest[search_from..].find(marker).map(|i| search_from + i) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&format!("<{tag}>{}</{tag}>", &rest[content_start..close]));
        rest = &rest[close + marker.len()..];
    }

    out.push_str(rest);
    out
}

/// A parsed `[label](target)` starting at some offset.
struct Bracketed<'a> {
    label: &'a str,
    target: &'a str,
    /// Byte length of the whole construct, from `[` through `)`
    len: usize,
}

/// Parse `[label](target)` at the start of `s`.
fn parse_bracketed(s: &str, allow_empty_label: bool) -> Option<Bracketed<'_>> {
    let inner = s.strip_prefix('[')?;
    let label_end = inner.find(']')?;
    let label = &inner[..label_end];
    if label.is_empty() && !allow_empty_label {
        return None;
    }
    let after = inner[label_end + 1..].strip_prefix('(')?;
    let target_end = after.find(')')?;
    let target = &after[..target_end];
    if target.is_empty() {
        return None;
    }
    Some(Bracketed {
        label,
        target,
        len: 1 + label_end + 2 + target_end + 1,
    })
}

fn replace_images(text: &str) -> String {
    replace_bracketed(text, "![", |rest| {
        parse_bracketed(&rest[1..], true).map(|b| {
            (
                format!("<img alt=\"{}\" src=\"{}\">", b.label, b.target),
                b.len + 1,
            )
        })
    })
}

fn replace_links(text: &str) -> String {
    replace_bracketed(text, "[", |rest| {
        parse_bracketed(rest, false)
            .map(|b| (format!("<a href=\"{}\">{}</a>", b.target, b.label), b.len))
    })
}

/// Scan for `start`, let `parse` try a construct there, and either splice in
/// its replacement or move one character on.
fn replace_bracketed<F>(text: &str, start: &str, parse: F) -> String
where
    F: Fn(&str) -> Option<(String, usize)>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(start) {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match parse(candidate) {
            Some((html, consumed)) => {
                out.push_str(&html);
                rest = &candidate[consumed..];
            }
            None => {
                let step = candidate.chars().next().map_or(1, char::len_utf8);
                out.push_str(&candidate[..step]);
                rest = &candidate[step..];
            }
        }
    }

    out.push_str(rest);
    out
}
