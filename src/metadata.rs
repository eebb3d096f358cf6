//! Document metadata extraction and resolution.
//!
//! Every content file may open with a small header block delimited by a
//! `---` line, followed by the body:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-05-01
//! categories: Rust, Notes
//! ---
//! # Hi
//!
//! World
//! ```
//!
//! ## Parsing rules
//!
//! - No leading delimiter: no metadata, the whole text is the body.
//! - No closing delimiter: same as above. An unterminated header is not an error.
//! - Header lines split on the first `:`. Keys are trimmed and lower-cased,
//!   values trimmed. Lines without `:` are skipped.
//! - `categories` is split on `,`; pieces are trimmed and empties dropped.
//! - Leading blank lines of the body are stripped.
//!
//! ## Resolution priority
//!
//! Derived fields (title, thumbnail) are resolved with [`resolve`]: the first
//! non-empty source wins.
//!
//! ```text
//! title: resolve(&[header_title, first_heading, filename_stem])
//! ```

use std::collections::BTreeMap;

/// Marker line that opens and closes the header block.
pub const DELIMITER: &str = "---";

/// Key/value pairs parsed from a document header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
    categories: Vec<String>,
}

impl FrontMatter {
    /// Raw value for a lower-case key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Category display names in header order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `key` holds a truthy flag (`true`, `1`, `yes`).
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    fn insert(&mut self, key: String, value: String) {
        if key == "categories" {
            self.categories = split_categories(&value);
        }
        self.fields.insert(key, value);
    }
}

/// Split a document into its header and body.
///
/// Returns an empty [`FrontMatter`] and the full text when the document has
/// no header or the header is never closed.
pub fn split_front_matter(raw: &str) -> (FrontMatter, &str) {
    let Some(rest) = raw.strip_prefix(DELIMITER) else {
        return (FrontMatter::default(), raw);
    };
    let closing = format!("\n{DELIMITER}");
    let Some(end) = rest.find(&closing) else {
        return (FrontMatter::default(), raw);
    };

    let header = rest[..end].trim();
    let body = rest[end + closing.len()..].trim_start_matches(['\n', '\r']);

    let mut meta = FrontMatter::default();
    for line in header.lines() {
        if let Some((key, value)) = line.split_once(':') {
            meta.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
    (meta, body)
}

fn split_categories(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

/// Flag values accepted as "on".
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Resolve a field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Text of the first `#`-heading line in a body, without the hashes.
pub fn first_heading(body: &str) -> Option<&str> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim())
        .filter(|text| !text.is_empty())
}
