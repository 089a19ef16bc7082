//! Build the site, optionally rebuilding on changes

use anyhow::{Context, Result};
use notify::{Event, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::{BuildReport, Site, CONFIG_FILE};

/// Minimum time between two rebuilds in watch mode
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Run one full build
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let report = site.build()?;

    tracing::info!(
        "Generated {} pages ({} skipped) in {:.2}s",
        report.generated.len(),
        report.skipped.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Run one build, logging a failure instead of returning it
pub fn run_or_log(site: &Site) -> Option<BuildReport> {
    match run(site) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::error!("Build failed: {:#}", e);
            None
        }
    }
}

/// Watch the site sources and rebuild on every change until interrupted
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })
    .context("Failed to start file watcher")?;

    for dir in [&site.pages_dir, &site.layout_dir, &site.static_dir] {
        if dir.exists() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {:?}", dir))?;
        }
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher
            .watch(&config_path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {:?}", config_path))?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                if !is_source_change(&event, &site.output_dir) {
                    continue;
                }
                if last_rebuild.elapsed() > DEBOUNCE {
                    tracing::info!("File changed, rebuilding...");
                    // Config edits take effect on the next rebuild
                    match Site::new(&site.base_dir) {
                        Ok(site) => {
                            run_or_log(&site);
                        }
                        Err(e) => tracing::error!("Build failed: {:#}", anyhow::Error::from(e)),
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Whether an event touches anything outside the output directory
fn is_source_change(event: &Event, output_dir: &Path) -> bool {
    event.paths.iter().any(|p| !p.starts_with(output_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_run_reports_pages() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.layout_dir).unwrap();
        fs::write(site.layout_dir.join("post.html"), "{{ title }}").unwrap();
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(site.pages_dir.join("a.md"), "---\nlive: true\n---\n").unwrap();
        fs::write(site.pages_dir.join("b.md"), "---\nlive: false\n---\n").unwrap();

        let report = run(&site).unwrap();
        assert_eq!(report.generated, vec!["a.html"]);
        assert_eq!(report.skipped, vec!["b.html"]);
    }

    #[test]
    fn test_failed_build_is_logged_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(site.pages_dir.join("a.md"), "---\nlayout: gallery\nlive: true\n---\n").unwrap();

        assert!(run(&site).is_err());
        assert!(run_or_log(&site).is_none());

        fs::create_dir_all(&site.layout_dir).unwrap();
        fs::write(site.layout_dir.join("gallery.html"), "{{ title }}").unwrap();
        let report = run_or_log(&site).unwrap();
        assert_eq!(report.generated, vec!["a.html"]);
    }

    #[test]
    fn test_output_events_are_ignored() {
        let output = PathBuf::from("/site/dist");
        let event = |path: &str| Event::new(EventKind::Create(CreateKind::File)).add_path(path.into());

        assert!(!is_source_change(&event("/site/dist/index.html"), &output));
        assert!(is_source_change(&event("/site/src/pages/index.md"), &output));
    }
}
