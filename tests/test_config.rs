use std::path::PathBuf;

use dirserve::config::{Config, FilesConfig, ServerConfig};

#[test]
fn test_from_file_parses_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(
        &path,
        "server:\n  listen_addr: \"0.0.0.0:3000\"\nfiles:\n  root: \"/srv/pub\"\n",
    )
    .unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.files.root, PathBuf::from("/srv/pub"));
}

#[test]
fn test_from_file_applies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(&path, "{}\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.files.root, PathBuf::from("."));
}

#[test]
fn test_from_file_missing_file_is_an_error() {
    assert!(Config::from_file(std::path::Path::new("/no/such/config.yml")).is_err());
}

#[test]
fn test_validate_canonicalizes_root() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        server: ServerConfig::default(),
        files: FilesConfig {
            root: dir.path().to_path_buf(),
        },
    };

    let cfg = cfg.validate().unwrap();
    assert!(cfg.files.root.is_absolute());
    assert_eq!(cfg.files.root, dir.path().canonicalize().unwrap());
}

#[test]
fn test_validate_rejects_missing_root() {
    let cfg = Config {
        server: ServerConfig::default(),
        files: FilesConfig {
            root: PathBuf::from("/no/such/directory"),
        },
    };

    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_rejects_file_as_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, "x").unwrap();

    let cfg = Config {
        server: ServerConfig::default(),
        files: FilesConfig { root: file },
    };

    assert!(cfg.validate().is_err());
}

#[test]
fn test_validate_rejects_unparseable_listen_addr() {
    let dir = tempfile::tempdir().unwrap();

    for addr in ["not-an-address", "127.0.0.1:notaport", "127.0.0.1"] {
        let cfg = Config {
            server: ServerConfig {
                listen_addr: addr.to_string(),
            },
            files: FilesConfig {
                root: dir.path().to_path_buf(),
            },
        };
        assert!(cfg.validate().is_err(), "{addr} should not validate");
    }
}

#[test]
fn test_load_applies_env_overrides() {
    let dir = tempfile::tempdir().unwrap();

    unsafe {
        std::env::remove_var("CONFIG");
        std::env::set_var("LISTEN", "127.0.0.1:9090");
        std::env::set_var("ROOT", dir.path());
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9090");
    assert_eq!(cfg.files.root, dir.path().canonicalize().unwrap());

    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("ROOT");
    }
}
