//! Content module - handles pages, front matter and markdown rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod page;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use page::{post_listing, NavLink, Page, PostSummary, INDEX_NAME};
