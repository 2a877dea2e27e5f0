use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Process-wide configuration, fixed before the listener starts.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory tree the server is allowed to expose.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `CONFIG` (if set),
    /// applies `LISTEN` and `ROOT` environment overrides, and validates.
    /// Invalid configuration is a startup error, never a request-time one.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Config {
                server: ServerConfig::default(),
                files: FilesConfig::default(),
            },
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("ROOT") {
            cfg.files.root = PathBuf::from(root);
        }

        cfg.validate()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Checks the listen address parses and the root is an existing
    /// directory, and pins the root to its canonical absolute form.
    pub fn validate(mut self) -> anyhow::Result<Self> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid listen address {:?}", self.server.listen_addr))?;

        let root = self
            .files
            .root
            .canonicalize()
            .with_context(|| format!("root directory {} not found", self.files.root.display()))?;
        anyhow::ensure!(root.is_dir(), "root {} is not a directory", root.display());
        self.files.root = root;

        Ok(self)
    }
}
