//! Light/dark theme state shared by every widget on a page

use indexmap::IndexMap;
use std::collections::HashMap;

/// Document attribute holding the active theme
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Local-storage key holding the persisted theme
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Icon shown on the toggle button: the theme it switches to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

/// Key/value persistence standing in for the browser's local storage
pub trait ThemeStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl ThemeStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// The page's root element: its attributes and the reader's color-scheme preference
#[derive(Debug, Clone, Default)]
pub struct Document {
    attributes: IndexMap<String, String>,
    prefers_dark: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose reader prefers a dark color scheme
    pub fn prefers_dark() -> Self {
        Self {
            prefers_dark: true,
            ..Self::default()
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Active theme; light unless the root says dark
    pub fn theme(&self) -> Theme {
        self.get_attribute(THEME_ATTRIBUTE)
            .and_then(Theme::parse)
            .unwrap_or_default()
    }
}

/// Apply the stored theme, falling back to the color-scheme preference
pub fn init_theme(document: &mut Document, storage: &dyn ThemeStorage) -> Theme {
    let theme = storage
        .get_item(STORAGE_KEY)
        .and_then(|s| Theme::parse(&s))
        .unwrap_or(if document.prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
    document.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    theme
}

/// Flip the document theme and persist the new value
pub fn toggle_theme(document: &mut Document, storage: &mut dyn ThemeStorage) -> Theme {
    let next = match document.get_attribute(THEME_ATTRIBUTE) {
        Some("dark") => Theme::Light,
        _ => Theme::Dark,
    };
    document.set_attribute(THEME_ATTRIBUTE, next.as_str());
    storage.set_item(STORAGE_KEY, next.as_str());
    next
}
