//! Output compaction: HTML inter-tag whitespace and CSS.
//!
//! ## HTML
//!
//! Three passes over an arena of segments:
//!
//! 1. **Extract** every whitespace-significant region (`pre`, `code`,
//!    `textarea`, `script`, `style`, from the opening tag through the first
//!    matching close tag, names matched case-insensitively) into a side table,
//!    leaving a [`Segment::Preserved`] index in the segment list.
//! 2. **Collapse** whitespace in the remaining text segments: a run is dropped
//!    when it sits between `>` and `<`, or at the very start or end of the
//!    document. A preserved region counts as `<` on its left edge and `>` on
//!    its right edge. Whitespace anywhere else is left alone.
//! 3. **Restore** regions by index, byte-for-byte.
//!
//! The result is stable: `compact_html(compact_html(x)) == compact_html(x)`.
//!
//! ```text
//! <ul>\n  <li>a</li>\n</ul>\n<pre>  x\n  y</pre>
//! → <ul><li>a</li></ul><pre>  x\n  y</pre>
//! ```
//!
//! ## CSS
//!
//! [`minify_css`] strips comments, removes whitespace around `{ } : ; ,`,
//! collapses other runs to one space and drops the `;` before `}`. Quoted
//! strings pass through untouched.

/// Elements whose content is copied verbatim.
const PRESERVED_TAGS: &[&str] = &["pre", "code", "textarea", "script", "style"];

/// A piece of the document between extraction and restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    /// Index into the preserved-region table
    Preserved(usize),
}

/// Remove insignificant inter-tag whitespace.
pub fn compact_html(html: &str) -> String {
    let (segments, regions) = extract_regions(html);

    let mut out = String::with_capacity(html.len());
    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            Segment::Preserved(idx) => out.push_str(regions[idx]),
            Segment::Text(text) => {
                let next_is_region = matches!(segments.get(i + 1), Some(Segment::Preserved(_)));
                let next_edge = if next_is_region { Some('<') } else { None };
                collapse_into(&mut out, text, next_edge);
            }
        }
    }
    out
}

/// Pass 1: split the document into text and preserved regions.
fn extract_regions(html: &str) -> (Vec<Segment<'_>>, Vec<&str>) {
    let mut segments = Vec::new();
    let mut regions = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(offset) = html[cursor..].find('<') {
        let open = cursor + offset;
        match region_end(html, open) {
            Some(end) => {
                if text_start < open {
                    segments.push(Segment::Text(&html[text_start..open]));
                }
                segments.push(Segment::Preserved(regions.len()));
                regions.push(&html[open..end]);
                text_start = end;
                cursor = end;
            }
            None => cursor = open + 1,
        }
    }
    if text_start < html.len() {
        segments.push(Segment::Text(&html[text_start..]));
    }
    (segments, regions)
}

/// If a preserved element opens at `open`, the byte offset just past its close tag.
fn region_end(html: &str, open: usize) -> Option<usize> {
    let after_lt = &html[open + 1..];
    let tag = PRESERVED_TAGS.iter().find(|tag| {
        after_lt
            .get(..tag.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && after_lt[tag.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
    })?;

    let open_tag_end = open + 1 + after_lt.find('>')? + 1;
    let body = &html[open_tag_end..];

    let mut from = 0;
    while let Some(found) = body[from..].find("</") {
        let name_start = from + found + 2;
        let name_end = name_start + tag.len();
        let same_name = body
            .get(name_start..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag));
        if same_name {
            let after_name = &body[name_end..];
            let rest = after_name.trim_start();
            if rest.starts_with('>') {
                let gt = name_end + (after_name.len() - rest.len());
                return Some(open_tag_end + gt + 1);
            }
        }
        from = name_start;
    }
    None
}

/// Pass 2 for one text segment, appending to `out`.
///
/// The left neighbour is whatever `out` ends with; `next_edge` is the first
/// character after this segment, `None` at end of document.
fn collapse_into(out: &mut String, text: &str, next_edge: Option<char>) {
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_whitespace() {
            out.push(c);
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            end = i + w.len_utf8();
            chars.next();
        }

        let prev = out.chars().next_back();
        let next = match chars.peek() {
            Some(&(_, n)) => Some(n),
            None => next_edge,
        };
        let droppable = match (prev, next) {
            (None, _) | (_, None) => true,
            (Some(p), Some(n)) => p == '>' && n == '<',
        };
        if !droppable {
            out.push_str(&text[start..end]);
        }
    }
}

/// Minify a stylesheet.
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
                pending_space = true;
            }
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
                let mut escaped = false;
                for inner in chars.by_ref() {
                    out.push(inner);
                    if escaped {
                        escaped = false;
                    } else if inner == '\\' {
                        escaped = true;
                    } else if inner == c {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => pending_space = true,
            '{' | '}' | ':' | ';' | ',' => {
                pending_space = false;
                if c == '}' && out.ends_with(';') {
                    out.pop();
                }
                out.push(c);
            }
            _ => {
                flush_space(&mut out, &mut pending_space);
                out.push(c);
            }
        }
    }
    out
}

/// Emit a deferred space unless it would touch a delimiter or the start.
fn flush_space(out: &mut String, pending: &mut bool) {
    if *pending && !out.is_empty() && !out.ends_with(['{', '}', ':', ';', ',']) {
        out.push(' ');
    }
    *pending = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // HTML
    // =========================================================================

    #[test]
    fn drops_whitespace_between_tags() {
        assert_eq!(
            compact_html("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"),
            "<ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn keeps_whitespace_inside_text() {
        assert_eq!(
            compact_html("<p>hello   world</p> <p> x </p>"),
            "<p>hello   world</p><p> x </p>"
        );
    }

    #[test]
    fn trims_document_edges() {
        assert_eq!(compact_html("\n  <p>x</p>\n"), "<p>x</p>");
        assert_eq!(compact_html("  text  "), "text");
    }

    #[test]
    fn preserves_pre_verbatim() {
        let pre = "<pre><code class=\"language-py\">def f():\n    return 1\n\n</code></pre>";
        let html = format!("<div>\n  {pre}\n</div>");
        assert_eq!(compact_html(&html), format!("<div>{pre}</div>"));
    }

    #[test]
    fn preserves_all_region_kinds() {
        for tag in PRESERVED_TAGS {
            let region = format!("<{tag}>  a \n  <b> </b>  </{tag}>");
            let html = format!("<p>x</p>\n{region}\n<p>y</p>");
            let out = compact_html(&html);
            assert!(out.contains(&region), "{tag} region altered: {out}");
            assert_eq!(out, format!("<p>x</p>{region}<p>y</p>"));
        }
    }

    #[test]
    fn region_names_case_insensitive() {
        let html = "<div> <PRE>  a  </Pre > </div>";
        assert_eq!(compact_html(html), "<div><PRE>  a  </Pre ></div>");
    }

    #[test]
    fn region_with_attributes() {
        let html = "<script src=\"x.js\"> </script> <style media=\"print\">a { b: c }</style>";
        assert_eq!(
            compact_html(html),
            "<script src=\"x.js\"> </script><style media=\"print\">a { b: c }</style>"
        );
    }

    #[test]
    fn lookalike_tags_not_regions() {
        // `<preview>` and `<codex>` are ordinary tags
        assert_eq!(
            compact_html("<preview> <b>x</b> </preview>"),
            "<preview><b>x</b></preview>"
        );
        assert_eq!(compact_html("<codex> <i>y</i> </codex>"), "<codex><i>y</i></codex>");
    }

    #[test]
    fn unclosed_region_is_plain_text() {
        assert_eq!(compact_html("<pre> <b>x</b>"), "<pre><b>x</b>");
    }

    #[test]
    fn close_tag_prefix_not_matched() {
        let html = "<code>a</codex> b</code> <p>x</p>";
        assert_eq!(compact_html(html), "<code>a</codex> b</code><p>x</p>");
    }

    #[test]
    fn close_search_skips_non_ascii_and_mixed_case() {
        let html = "<code>x </€€> y</CoDe\n> <p>z</p>";
        assert_eq!(compact_html(html), "<code>x </€€> y</CoDe\n><p>z</p>");
    }

    #[test]
    fn many_inline_code_spans() {
        let span = "<p>see <code> a </code> and <code>b</code></p>\n";
        let html = span.repeat(500);
        let expected = "<p>see <code> a </code> and <code>b</code></p>".repeat(500);
        assert_eq!(compact_html(&html), expected);
    }

    #[test]
    fn idempotent() {
        let samples = [
            "<html>\n<body>\n  <p>a  b</p>\n  <pre>\n x \n</pre>\n</body>\n</html>\n",
            "  <script>\n var a = 1;\n</script>  <div> </div>",
            "<pre> unclosed <b> </b>",
            "plain text with  spaces",
            "",
            "<a>\u{a0}<b>",
        ];
        for sample in samples {
            let once = compact_html(sample);
            assert_eq!(compact_html(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn preserved_regions_byte_identical() {
        let html = "<main>\n<pre>\t tab\n\n  </pre>\n<textarea>  keep\n</textarea>\n</main>";
        let out = compact_html(html);
        assert!(out.contains("<pre>\t tab\n\n  </pre>"));
        assert!(out.contains("<textarea>  keep\n</textarea>"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(compact_html(""), "");
        assert_eq!(compact_html("   \n"), "");
    }

    // =========================================================================
    // CSS
    // =========================================================================

    #[test]
    fn css_whitespace_and_semicolons() {
        let css = "body {\n  color: red;\n  margin: 0 auto;\n}\n\na, b { x: y; }";
        assert_eq!(minify_css(css), "body{color:red;margin:0 auto}a,b{x:y}");
    }

    #[test]
    fn css_comments_removed() {
        assert_eq!(minify_css("/* header */ a { /* inner */ b: c }"), "a{b:c}");
    }

    #[test]
    fn css_descendant_space_kept() {
        assert_eq!(
            minify_css("html[data-theme=dark]   .nav  a { x: y }"),
            "html[data-theme=dark] .nav a{x:y}"
        );
    }

    #[test]
    fn css_strings_untouched() {
        assert_eq!(
            minify_css("a::before { content: \"a  ;  b\" }"),
            "a::before{content:\"a  ;  b\"}"
        );
    }

    #[test]
    fn css_unterminated_comment_drops_rest() {
        assert_eq!(minify_css("a{b:c} /* open"), "a{b:c}");
    }

    #[test]
    fn css_minify_idempotent() {
        let css = "@media (max-width: 600px) {\n  .a { b: c; }\n}\n";
        let once = minify_css(css);
        assert_eq!(minify_css(&once), once);
    }
}
