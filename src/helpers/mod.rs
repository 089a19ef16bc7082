//! Helper functions shared by the renderer, layouts and widgets

mod date;
mod html;
mod path;

pub use date::*;
pub use html::*;
pub use path::*;
