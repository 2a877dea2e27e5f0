//! Directory listings.
//!
//! Enumerates a directory's immediate children, gathers their metadata
//! concurrently, and renders an HTML table once all of it has arrived.

use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use futures::future::try_join_all;
use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that cannot appear raw inside a link's path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Renders the listing for `dir`, whose public form is `uri`.
///
/// Child names are collected with one batch readdir, then every child
/// gets an independent metadata lookup, all in flight at once.
/// `try_join_all` is the completion barrier: results come back in the
/// order the names were read, no matter which lookup finishes first, and
/// the first failed lookup fails the whole listing; a partial table is
/// never rendered.
pub async fn render(dir: &Path, uri: &str, stylesheet: &str) -> io::Result<String> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut names: Vec<OsString> = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        names.push(entry.file_name());
    }

    let lookups = names.iter().map(|name| tokio::fs::metadata(dir.join(name)));
    let metas: Vec<Metadata> = try_join_all(lookups).await?;

    Ok(render_table(uri, stylesheet, &names, &metas))
}

fn render_table(uri: &str, stylesheet: &str, names: &[OsString], metas: &[Metadata]) -> String {
    let title = encode_text(uri);
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <link rel=\"stylesheet\" href=\"{css}\"></head><body>\n<h1>{title}</h1>\n<table>\n\
         <tr><th>Name</th><th>Size</th><th>Created</th><th>Modified</th></tr>\n",
        css = encode_double_quoted_attribute(stylesheet),
    );

    // Navigation row, absent only at the served root.
    if uri != "/" {
        let _ = writeln!(
            html,
            "<tr><td><a href=\"{}\">..</a></td><td></td><td></td><td></td></tr>",
            encode_double_quoted_attribute(parent_uri(uri)),
        );
    }

    for (name, meta) in names.iter().zip(metas) {
        let display = name.to_string_lossy();
        let href = child_href(uri, &display);
        let size = if meta.is_dir() {
            "directory".to_string()
        } else {
            meta.len().to_string()
        };

        let _ = writeln!(
            html,
            "<tr><td><a href=\"{href}\">{name}{suffix}</a></td>\
             <td>{size}</td><td>{created}</td><td>{modified}</td></tr>",
            href = encode_double_quoted_attribute(&href),
            name = encode_text(&display),
            suffix = if meta.is_dir() { "/" } else { "" },
            created = timestamp(meta.created()),
            modified = timestamp(meta.modified()),
        );
    }

    html.push_str("</table></body></html>\n");
    html
}

fn child_href(uri: &str, name: &str) -> String {
    let encoded = utf8_percent_encode(name, SEGMENT);
    if uri == "/" {
        format!("/{encoded}")
    } else {
        format!("{uri}/{encoded}")
    }
}

fn parent_uri(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &uri[..i],
    }
}

fn timestamp(t: io::Result<SystemTime>) -> String {
    match t {
        Ok(t) => httpdate::fmt_http_date(t),
        // Not every platform reports a creation time.
        Err(_) => "-".to_string(),
    }
}
