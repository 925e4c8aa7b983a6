//! Runtime configuration for the web server.
//!
//! Values come from CLI flags, which fall back to `NOTEKEEPER_*`
//! environment variables and then to the defaults below.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default directory served under `/static`.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Name of the directory that marks a project root.
const PROJECT_MARKER: &str = ".notekeeper";

/// Resolved settings for `notekeeper serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Directory holding `.notekeeper/`.
    pub root: PathBuf,
    /// Directory mounted at `/static`.
    pub static_dir: PathBuf,
}

impl ServeConfig {
    pub fn new(bind: SocketAddr, root: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            bind,
            root,
            static_dir,
        }
    }
}

/// Pick the project root: an explicit path wins, otherwise search upward
/// from the current directory.
pub fn resolve_root(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(root) => root,
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            find_project_root(&cwd)
        }
    }
}

/// Walk up from `start` looking for `.notekeeper/` or `.git/`. Falls back to
/// `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start;
    loop {
        if current.join(PROJECT_MARKER).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}
