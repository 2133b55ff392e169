//! Create a new post

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::parse_post;
use crate::content::Validator;
use crate::helpers::{format_timestamp, permalink_for_title};
use crate::Postlint;

/// Render front matter for a new post
fn scaffold(title: &str, layout: &str, author: &str, permalink: &str, timestamp: &str) -> Result<String> {
    let mut fm = Mapping::new();
    fm.insert("layout".into(), layout.into());
    fm.insert("title".into(), title.into());
    fm.insert("author".into(), author.into());
    fm.insert("permalink".into(), permalink.into());
    fm.insert("last_modified_at".into(), timestamp.into());
    fm.insert("category".into(), Value::Sequence(Vec::new()));

    let yaml = serde_yaml::to_string(&fm)?;
    Ok(format!("---\n{}---\n\n", yaml))
}

/// Create a new post in the posts directory and return its path.
///
/// The scaffold is validated before it is written, so a freshly created
/// post always passes `check`.
pub fn create_post(
    app: &Postlint,
    title: &str,
    layout: Option<&str>,
    author: Option<&str>,
) -> Result<PathBuf> {
    let layout = layout.unwrap_or(&app.config.default_layout);
    let author = author.unwrap_or(&app.config.default_author);
    if author.trim().is_empty() {
        anyhow::bail!("No author given: pass --author or set default_author in _config.yml");
    }

    let permalink = permalink_for_title(title);
    let slug = permalink.trim_end_matches('/');
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a permalink from title {:?}", title);
    }

    let now = chrono::Utc::now().with_timezone(&app.tz);
    let content = scaffold(title, layout, author, &permalink, &format_timestamp(&now))?;
    parse_post(&content, &Validator::new(app.tz))
        .with_context(|| format!("Scaffold for {:?} does not validate", title))?;

    fs::create_dir_all(&app.source_dir)?;
    let file_path = app
        .source_dir
        .join(format!("{}-{}.md", now.format("%Y-%m-%d"), slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(app: &Postlint, title: &str, layout: Option<&str>, author: Option<&str>) -> Result<()> {
    let path = create_post(app, title, layout, author)?;
    println!("Created: {:?}", path);
    Ok(())
}
