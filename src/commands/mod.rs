//! CLI commands; each returns `anyhow::Result` for `main` to report

pub mod build;
pub mod clean;
pub mod init;
pub mod list;
pub mod new;
