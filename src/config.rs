//! Project configuration loaded from `docsync.toml`
//!
//! Every key is optional; the defaults describe the render-markdown.nvim layout:
//!
//! ```toml
//! source = "lua/render-markdown/init.lua"
//! types = "lua/render-markdown/types.lua"
//! readme = "README.md"
//! module = "render-markdown"
//! marker = "query"
//! strip_prefix = "User"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocsyncError, Result};

/// Name of the optional config file looked up in the project root
pub const CONFIG_FILENAME: &str = "docsync.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Lua source holding the annotations and `default_config`
    pub source: PathBuf,
    /// Generated type annotation file
    pub types: PathBuf,
    /// README containing the setup sample
    pub readme: PathBuf,
    /// Module name used in `require('<module>').setup(...)`
    pub module: String,
    /// Substring identifying the sample code block
    pub marker: String,
    /// Token removed from annotation names
    pub strip_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("lua/render-markdown/init.lua"),
            types: PathBuf::from("lua/render-markdown/types.lua"),
            readme: PathBuf::from("README.md"),
            module: "render-markdown".to_string(),
            marker: "query".to_string(),
            strip_prefix: "User".to_string(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| DocsyncError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocsyncError::io(path, e))?;
        Self::parse(&content)
    }

    /// Loads `docsync.toml` from `root`, falling back to defaults when absent.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(DocsyncError::Config("marker must not be empty".to_string()));
        }
        if self.module.is_empty() {
            return Err(DocsyncError::Config("module must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }

    pub fn types_path(&self, root: &Path) -> PathBuf {
        root.join(&self.types)
    }

    pub fn readme_path(&self, root: &Path) -> PathBuf {
        root.join(&self.readme)
    }
}
