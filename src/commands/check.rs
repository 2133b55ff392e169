//! Validate every post

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::PathBuf;
use std::time::Duration;

use crate::content::collection::{check_unique_permalinks, DuplicatePermalink};
use crate::content::loader::{ContentLoader, LoadFailure};
use crate::Postlint;

/// Result of a full check over the posts directory
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Posts that passed validation
    pub valid: usize,
    pub failures: Vec<LoadFailure>,
    pub duplicates: Vec<DuplicatePermalink>,
}

impl CheckSummary {
    /// Number of problems found
    pub fn problems(&self) -> usize {
        self.failures.len() + self.duplicates.len()
    }

    /// Whether the collection can be published
    pub fn is_clean(&self) -> bool {
        self.problems() == 0
    }

    /// Human-readable report, one line per problem
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.source, f.error))
            .collect();

        for dup in &self.duplicates {
            lines.push(format!(
                "permalink {:?} is used by {}",
                dup.permalink,
                dup.sources.join(", ")
            ));
        }

        lines
    }
}

/// Validate every post, then check the collection as a whole
pub fn run(app: &Postlint) -> Result<CheckSummary> {
    let start = std::time::Instant::now();

    let report = ContentLoader::new(app).load_posts();
    let duplicates = check_unique_permalinks(&report.posts);
    for dup in &duplicates {
        tracing::warn!(
            "Duplicate permalink {:?} in {}",
            dup.permalink,
            dup.sources.join(", ")
        );
    }

    let summary = CheckSummary {
        valid: report.posts.len(),
        failures: report.failures,
        duplicates,
    };

    let duration = start.elapsed();
    tracing::info!("Checked in {:.2}s", duration.as_secs_f64());

    Ok(summary)
}

/// Print a summary to stdout
pub fn print(summary: &CheckSummary) {
    for line in summary.report_lines() {
        println!("{}", line);
    }
    println!(
        "{} valid, {} invalid, {} duplicate permalinks",
        summary.valid,
        summary.failures.len(),
        summary.duplicates.len()
    );
}

/// Paths to watch for a site.
///
/// While the posts directory is missing, the site root is watched instead so
/// that creating it triggers a re-check.
pub fn watch_targets(app: &Postlint) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = Vec::new();

    if app.source_dir.exists() {
        targets.push((app.source_dir.clone(), RecursiveMode::Recursive));
    } else {
        targets.push((app.base_dir.clone(), RecursiveMode::NonRecursive));
    }

    // Watch config file
    let config_path = app.base_dir.join("_config.yml");
    if config_path.exists() {
        targets.push((config_path, RecursiveMode::NonRecursive));
    }

    targets
}

/// Watch the posts directory and config, re-checking on every change
pub async fn watch(app: &Postlint) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        if res.is_ok() {
            let _ = tx.send(());
        }
    })?;

    for (path, mode) in watch_targets(app) {
        debouncer.watcher().watch(&path, mode)?;
    }
    let mut watching_source = app.source_dir.exists();

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = rx.recv() => {
                if event.is_none() {
                    break;
                }
                if !watching_source && app.source_dir.exists() {
                    debouncer
                        .watcher()
                        .watch(&app.source_dir, RecursiveMode::Recursive)?;
                    watching_source = true;
                    tracing::info!("Now watching {:?}", app.source_dir);
                }
                tracing::info!("File changed, re-checking...");
                // Reload so config edits take effect
                match Postlint::new(&app.base_dir).and_then(|app| run(&app)) {
                    Ok(summary) => print(&summary),
                    Err(e) => tracing::error!("Check failed: {}", e),
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}
