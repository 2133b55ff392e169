//! postlint: front-matter validation for Markdown blog posts
//!
//! This crate checks that every post in a blog repository carries the
//! front matter a static-site generator needs before it renders anything.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use chrono_tz::Tz;
use std::path::Path;

/// The main postlint application
#[derive(Clone)]
pub struct Postlint {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts directory
    pub source_dir: std::path::PathBuf,
    /// Zone for timestamps written without an offset
    pub tz: Tz,
}

impl Postlint {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let tz = config.time_zone()?;
        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            tz,
        })
    }

    /// Validate every post
    pub fn check(&self) -> Result<commands::check::CheckSummary> {
        commands::check::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, author: Option<&str>) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title, None, author)
    }
}
