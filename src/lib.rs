//! neverendingloop: a small static site generator for a personal blog
//!
//! Markdown pages with YAML front matter are rendered through Tera layouts
//! into static HTML. Only pages marked `live: true` are written; live pages
//! other than `index` make up the date-sorted post listing handed to the
//! `home` layout.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod templates;
pub mod widgets;

pub use error::{Error, Result};
pub use generator::BuildReport;

use std::path::{Path, PathBuf};

/// Name of the optional site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown pages
    pub pages_dir: PathBuf,
    /// Layout templates
    pub layout_dir: PathBuf,
    /// Static assets copied verbatim
    pub static_dir: PathBuf,
    /// Output directory, cleared on every build
    pub output_dir: PathBuf,
}

impl Site {
    /// Open a site, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        Self {
            pages_dir: base_dir.join(&config.pages_dir),
            layout_dir: base_dir.join(&config.layout_dir),
            static_dir: base_dir.join(&config.static_dir),
            output_dir: base_dir.join(&config.output_dir),
            config,
            base_dir,
        }
    }

    /// Build the whole site
    pub fn build(&self) -> Result<BuildReport> {
        generator::Generator::new(self)?.generate()
    }
}
