//! `<site-header>`: site title, navigation and the theme toggle

use super::theme::{init_theme, toggle_theme};
use super::{nav_links_html, parse_nav_items, Attributes, Document, Element, Theme, ThemeStorage, Widget};
use crate::helpers::escape_html;

pub(crate) const STYLE: &str = r#"<style>
:host { display: block; }
header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 3rem;
  padding-bottom: 1.5rem;
  border-bottom: 1px solid var(--border-color, #e5e5e5);
}
.header-content { display: flex; align-items: center; gap: 1rem; }
.site-title {
  margin: 0;
  font-size: 1rem;
  font-family: 'IBM Plex Mono', monospace;
  color: var(--text-primary, #1a1a1a);
}
.site-nav { display: flex; gap: 1.5rem; margin-left: auto; }
.site-nav a { color: var(--text-secondary, #666666); text-decoration: none; font-size: 14px; }
.site-nav a:hover { color: var(--accent-color, #667eea); text-decoration: underline; }
.theme-toggle {
  background: none;
  border: none;
  padding: 0.5rem;
  font-size: 1.5rem;
  cursor: pointer;
  color: var(--text-primary, #1a1a1a);
}
:host-context(:root[data-theme="dark"]) header { border-bottom-color: #333333; }
:host-context(:root[data-theme="dark"]) .site-title,
:host-context(:root[data-theme="dark"]) .theme-toggle { color: #ffffff; }
:host-context(:root[data-theme="dark"]) .site-nav a { color: #cccccc; }
</style>"#;

/// Header widget; observes `title` and `nav-items`
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteHeader;

impl Widget for SiteHeader {
    fn tag(&self) -> &'static str {
        "site-header"
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        &["title", "nav-items"]
    }

    fn render(&self, attrs: &Attributes, theme: Theme) -> String {
        let title = attrs.get("title").map(String::as_str).unwrap_or("Blog");
        let nav = nav_links_html(&parse_nav_items(attrs));

        format!(
            r#"{style}<header><div class="header-content"><h1 class="site-title">{title}</h1><nav class="site-nav"><a href="/">Home</a>{nav}</nav></div><button class="theme-toggle" aria-label="Toggle dark mode">{icon}</button></header>"#,
            style = STYLE,
            title = escape_html(title),
            nav = nav,
            icon = theme.icon(),
        )
    }
}

impl Element<SiteHeader> {
    /// Connect and apply the stored (or preferred) theme to the document
    pub fn connect_with_theme(
        &mut self,
        document: &mut Document,
        storage: &dyn ThemeStorage,
    ) -> Theme {
        let theme = init_theme(document, storage);
        self.connect(document);
        theme
    }

    /// Handle a click on the toggle button
    pub fn click_theme_toggle(
        &mut self,
        document: &mut Document,
        storage: &mut dyn ThemeStorage,
    ) -> Theme {
        let theme = toggle_theme(document, storage);
        self.refresh(document);
        theme
    }
}
