//! Filesystem serving pipeline.
//!
//! This module maps request targets onto a configured root directory and
//! produces the matching response: a streamed file, a rendered directory
//! listing, or an error page.

pub mod listing;
pub mod resolve;
pub mod stream;
pub mod style;

pub use resolve::{Entry, Resolved};
pub use stream::StreamedFile;

use std::path::{Path, PathBuf};

use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// Per-process serving state, constructed once at startup and shared by
/// every connection. Never mutated afterwards.
pub struct ServeContext {
    root: PathBuf,
    asset_route: String,
}

impl ServeContext {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            asset_route: style::route(),
        }
    }

    /// The directory tree this server exposes. Never shown to clients;
    /// responses only ever carry paths relative to it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn asset_route(&self) -> &str {
        &self.asset_route
    }
}

/// What the pipeline decided to send for one request.
pub enum Outcome {
    /// A fully buffered response (listing, stylesheet, or error page).
    Response(Response),
    /// A file to be streamed; the 200 head is not committed yet.
    File(StreamedFile),
}

/// Runs one request through the pipeline: method check, stylesheet
/// short-circuit, path resolution, classification, then delegation.
///
/// Every filesystem failure is converted to a response here; exactly one
/// outcome is produced per request and nothing propagates further up.
pub async fn serve(ctx: &ServeContext, req: &Request) -> Outcome {
    if req.method != Method::GET {
        return Outcome::Response(Response::method_not_allowed());
    }

    // The stylesheet is embedded and takes precedence over resolution.
    let raw_path = req.target.split(['?', '#']).next().unwrap_or("");
    if raw_path == ctx.asset_route() {
        return Outcome::Response(Response::css(style::STYLESHEET));
    }

    // Escape attempts and decode failures are deliberately
    // indistinguishable from absent files.
    let resolved = match resolve::resolve(ctx.root(), &req.target) {
        Some(r) => r,
        None => {
            tracing::debug!("Rejected request target {:?}", req.target);
            return Outcome::Response(Response::not_found());
        }
    };

    match resolve::classify(&resolved.path).await {
        Entry::Missing => Outcome::Response(Response::not_found()),

        Entry::Dir => match listing::render(&resolved.path, &resolved.uri, ctx.asset_route()).await
        {
            Ok(html) => Outcome::Response(Response::html(html)),
            Err(e) => {
                tracing::error!("Failed to list {}: {}", resolved.uri, e);
                Outcome::Response(Response::internal_error(&e.to_string()))
            }
        },

        Entry::File => match StreamedFile::open(&resolved.path).await {
            Ok(file) => Outcome::File(file),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", resolved.uri, e);
                Outcome::Response(Response::internal_error(&e.to_string()))
            }
        },
    }
}
