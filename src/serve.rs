//! In-memory development server.
//!
//! Serves a [`Site`] straight from memory with `tiny_http`; nothing is
//! written to disk. Static files are read from the public directory on each
//! request, so edits to stylesheets and images show up without a rebuild.
//!
//! # Request Resolution
//!
//! ```text
//! /, .../                  →  /index.html
//! //x                      →  /x
//! rendered route           →  document (text/html)
//! /sitemap.xml, /robots.txt
//! /assets/<built-in theme> →  generated stylesheet
//! /assets/<rel>            →  public/<rel>  (no traversal outside public/)
//! anything else            →  404
//! ```
//!
//! Every response carries `cache-control: no-store, max-age=0`.

use crate::site::Site;
use std::fs;
use std::io;
use std::path::{Component, Path};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

const NO_STORE: &str = "no-store, max-age=0";

/// A response ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.into(),
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: "text/plain; charset=utf-8",
            body: b"404".to_vec(),
        }
    }

    fn method_not_allowed() -> Self {
        Self {
            status: 405,
            content_type: "text/plain; charset=utf-8",
            body: b"405".to_vec(),
        }
    }
}

/// Normalize a request URL into a route.
pub fn route_for(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = match path.strip_prefix("//") {
        Some(rest) => format!("/{rest}"),
        None => path.to_string(),
    };
    if path.is_empty() || path.ends_with('/') {
        "/index.html".to_string()
    } else {
        path
    }
}

/// Answer a `GET` for `url` from the site and the public directory.
pub fn resolve(site: &Site, public: &Path, url: &str) -> Reply {
    let route = route_for(url);

    if let Some(html) = site.rendered.get(&route) {
        return Reply::ok("text/html; charset=utf-8", html);
    }
    match route.as_str() {
        "/robots.txt" => return Reply::ok("text/plain; charset=utf-8", site.robots.as_str()),
        "/sitemap.xml" => {
            if let Some(xml) = &site.sitemap {
                return Reply::ok("application/xml; charset=utf-8", xml.as_str());
            }
        }
        _ => {}
    }

    let Some(rel) = route.strip_prefix("/assets/") else {
        return Reply::not_found();
    };
    if let Some(theme) = &site.generated_theme {
        if theme.rel == rel {
            return Reply::ok("text/css; charset=utf-8", theme.css.as_str());
        }
    }
    match read_public(public, rel) {
        Some(body) => Reply::ok(guess_content_type(Path::new(rel)), body),
        None => Reply::not_found(),
    }
}

/// Read `public/<rel>`, refusing anything that escapes `public`.
fn read_public(public: &Path, rel: &str) -> Option<Vec<u8>> {
    let rel = Path::new(rel);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    let root = public.canonicalize().ok()?;
    let file = root.join(rel).canonicalize().ok()?;
    if !file.starts_with(&root) || !file.is_file() {
        return None;
    }
    fs::read(file).ok()
}

/// Serve `site` until the process is stopped.
///
/// `on_request` is called after each response with the method, URL and
/// status code.
pub fn serve(
    site: &Site,
    public: &Path,
    host: &str,
    port: u16,
    mut on_request: impl FnMut(&str, &str, u16),
) -> Result<(), ServeError> {
    let addr = format!("{host}:{port}");
    let server = Server::http(addr.as_str()).map_err(|e| ServeError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    for request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let reply = match request.method() {
            Method::Get | Method::Head => resolve(site, public, &url),
            _ => Reply::method_not_allowed(),
        };
        let status = reply.status;
        respond(request, reply)?;
        on_request(&method, &url, status);
    }
    Ok(())
}

fn respond(request: Request, reply: Reply) -> io::Result<()> {
    let mut response = Response::from_data(reply.body).with_status_code(reply.status);
    let headers = [
        Header::from_bytes("Content-Type", reply.content_type),
        Header::from_bytes("Cache-Control", NO_STORE),
    ];
    for header in headers.into_iter().flatten() {
        response.add_header(header);
    }
    request.respond(response)
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        _ => "application/octet-stream",
    }
}
