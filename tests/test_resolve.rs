use std::path::{Path, PathBuf};

use dirserve::files::resolve::{Entry, classify, resolve};

const ROOT: &str = "/srv/pub";

#[test]
fn test_resolve_root() {
    let r = resolve(Path::new(ROOT), "/").unwrap();
    assert_eq!(r.path, PathBuf::from(ROOT));
    assert_eq!(r.uri, "/");
}

#[test]
fn test_resolve_nested_path() {
    let r = resolve(Path::new(ROOT), "/docs/guide.txt").unwrap();
    assert_eq!(r.path, PathBuf::from("/srv/pub/docs/guide.txt"));
    assert_eq!(r.uri, "/docs/guide.txt");
}

#[test]
fn test_resolve_strips_query_and_fragment() {
    let r = resolve(Path::new(ROOT), "/docs/guide.txt?download=1#top").unwrap();
    assert_eq!(r.path, PathBuf::from("/srv/pub/docs/guide.txt"));
}

#[test]
fn test_resolve_collapses_dot_segments() {
    let r = resolve(Path::new(ROOT), "/./docs/./guide.txt").unwrap();
    assert_eq!(r.path, PathBuf::from("/srv/pub/docs/guide.txt"));
}

#[test]
fn test_resolve_dotdot_stays_inside() {
    let r = resolve(Path::new(ROOT), "/a/../b").unwrap();
    assert_eq!(r.path, PathBuf::from("/srv/pub/b"));
    assert_eq!(r.uri, "/b");
}

#[test]
fn test_resolve_rejects_escape_attempts() {
    for target in [
        "/..",
        "/../",
        "/../etc/passwd",
        "/a/../../b",
        "/a/b/../../../c",
        "/%2e%2e/secret",
        "/..%2f..%2fetc/passwd",
    ] {
        assert!(
            resolve(Path::new(ROOT), target).is_none(),
            "{target} should be rejected"
        );
    }
}

#[test]
fn test_resolve_decodes_percent_escapes() {
    let r = resolve(Path::new(ROOT), "/my%20file.txt").unwrap();
    assert_eq!(r.path, PathBuf::from("/srv/pub/my file.txt"));
}

#[test]
fn test_resolve_rejects_undecodable_targets() {
    // Decodes to bytes that are not valid UTF-8.
    assert!(resolve(Path::new(ROOT), "/%FF%FE").is_none());
}

#[test]
fn test_resolve_empty_target() {
    let r = resolve(Path::new(ROOT), "").unwrap();
    assert_eq!(r.path, PathBuf::from(ROOT));
    assert_eq!(r.uri, "/");
}

#[tokio::test]
async fn test_classify_file_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("plain.txt"), "hello").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    assert_eq!(classify(&dir.path().join("plain.txt")).await, Entry::File);
    assert_eq!(classify(&dir.path().join("sub")).await, Entry::Dir);
    assert_eq!(classify(&dir.path().join("absent")).await, Entry::Missing);
}

#[cfg(unix)]
#[tokio::test]
async fn test_classify_dangling_symlink_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink("/no/such/target", dir.path().join("link")).unwrap();

    assert_eq!(classify(&dir.path().join("link")).await, Entry::Missing);
}
