//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ServeError};

/// Configuration for the file routes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServeConfig {
    /// Address to listen on. Default: "127.0.0.1:3000".
    pub bind: String,
    /// Directory holding the inline pages' html/css/js files.
    pub inline_root: PathBuf,
    /// The only html files `/inline/<name>` will serve. Each page's css and
    /// js share its file stem.
    pub inline_pages: [String; 3],
    /// Directory markdown files may be served from.
    pub markdown_dir: PathBuf,
    /// Bytes per write when streaming a markdown file. Default: 16 KiB.
    pub chunk_size: usize,
    /// Milliseconds a client gets to send its request head before the
    /// connection is answered with 408. Default: 10 000.
    pub request_timeout_ms: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            inline_root: PathBuf::from("public/inline"),
            inline_pages: [
                "index.html".to_string(),
                "grid.html".to_string(),
                "flow.html".to_string(),
            ],
            markdown_dir: PathBuf::from("content"),
            chunk_size: 16 * 1024,
            request_timeout_ms: 10_000,
        }
    }
}

impl ServeConfig {
    /// Load a JSON config file; missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|source| ServeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Check if `name` is one of the allow-listed inline pages
    pub fn is_inline_page(&self, name: &str) -> bool {
        self.inline_pages.iter().any(|page| page == name)
    }
}
