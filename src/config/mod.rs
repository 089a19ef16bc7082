//! Site configuration, read from `_config.yml`

mod site;

pub use site::HighlightConfig;
pub use site::SiteConfig;
