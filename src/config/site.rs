//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Directory
    pub pages_dir: String,
    pub layout_dir: String,
    pub static_dir: String,
    pub output_dir: String,

    // Writing
    pub default_layout: String,
    pub new_post_dir: String,

    /// strftime pattern used for `date` in layouts and listings
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "neverendingloop".to_string(),
            author: "Jan Karlo Dela Cruz".to_string(),

            pages_dir: "src/pages".to_string(),
            layout_dir: "src/layout".to_string(),
            static_dir: "public".to_string(),
            output_dir: "dist".to_string(),

            default_layout: "post".to_string(),
            new_post_dir: "posts".to_string(),

            date_format: "%B %-d, %Y".to_string(),

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to `null`, which serde_yaml rejects for structs
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// syntect theme used to generate the stylesheet
    pub theme: String,
    /// Stylesheet path relative to the output directory
    pub stylesheet: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "InspiredGitHub".to_string(),
            stylesheet: "css/highlight.css".to_string(),
        }
    }
}
