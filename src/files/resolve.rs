//! Request path resolution and classification.
//!
//! Turns an untrusted request target into a filesystem location confined
//! to the served root, then decides what that location is.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// A request path pinned inside the root.
#[derive(Debug)]
pub struct Resolved {
    /// Absolute filesystem location, root prefix included.
    pub path: PathBuf,
    /// The decoded, normalized public form ("/", "/sub/file.txt", ...),
    /// used for listing titles and links.
    pub uri: String,
}

/// What a resolved location turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Missing,
    File,
    Dir,
}

/// Resolves `target` against `root`, or `None` if the target is malformed
/// or tries to escape.
///
/// The query/fragment suffix is dropped and the remainder percent-decoded.
/// Normalization collapses `.` and `..` segments on the request path in
/// isolation, BEFORE joining onto the root: a `..` that would climb above
/// the path's own top is a rejection, so the joined result cannot leave
/// the root regardless of filesystem semantics. A final prefix check
/// guards the invariant anyway.
pub fn resolve(root: &Path, target: &str) -> Option<Resolved> {
    let raw = target.split(['?', '#']).next().unwrap_or("");
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for seg in decoded.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            seg => segments.push(seg),
        }
    }

    let mut path = root.to_path_buf();
    for seg in &segments {
        path.push(seg);
    }

    if !path.starts_with(root) {
        return None;
    }

    let uri = format!("/{}", segments.join("/"));
    Some(Resolved { path, uri })
}

/// Classifies a resolved location with a single metadata lookup.
///
/// Any lookup failure (absence, permission, other OS errors) counts as
/// `Missing`. There is no separate existence check beforehand: one call
/// both checks and classifies, so a concurrent filesystem change cannot
/// slip between the two.
pub async fn classify(path: &Path) -> Entry {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Entry::Dir,
        Ok(_) => Entry::File,
        Err(_) => Entry::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotdot_collapses_within_the_path() {
        let r = resolve(Path::new("/srv"), "/a/../b").unwrap();
        assert_eq!(r.path, PathBuf::from("/srv/b"));
        assert_eq!(r.uri, "/b");
    }

    #[test]
    fn ascent_above_the_top_is_rejected() {
        assert!(resolve(Path::new("/srv"), "/../etc/passwd").is_none());
        assert!(resolve(Path::new("/srv"), "/a/../../b").is_none());
    }
}
