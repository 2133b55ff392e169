//! Content loader - validates posts from the source directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{frontmatter, FrontMatterError, PostRecord, ValidationError, Validator};
use crate::Postlint;

/// Why a single content file could not become a [`PostRecord`]
#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Split a content file and validate its front matter
pub fn parse_post(content: &str, validator: &Validator) -> Result<PostRecord, PostError> {
    let (raw, body) = frontmatter::split(content)?;
    Ok(validator.validate(&raw, body)?)
}

/// A post that passed validation
#[derive(Debug, Clone)]
pub struct LoadedPost {
    /// Source file path relative to the site root
    pub source: String,
    pub record: PostRecord,
}

/// A post that failed to load or validate
#[derive(Debug)]
pub struct LoadFailure {
    /// Source file path relative to the site root
    pub source: String,
    pub error: PostError,
}

/// Outcome of loading every post in the source directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub posts: Vec<LoadedPost>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Number of files examined
    pub fn total(&self) -> usize {
        self.posts.len() + self.failures.len()
    }
}

/// Loads and validates content from the source directory
pub struct ContentLoader<'a> {
    app: &'a Postlint,
    validator: Validator,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(app: &'a Postlint) -> Self {
        Self {
            app,
            validator: Validator::new(app.tz),
        }
    }

    /// Load every post under the source directory.
    ///
    /// A file that fails never stops the walk; it is recorded in
    /// [`LoadReport::failures`] instead.
    pub fn load_posts(&self) -> LoadReport {
        let mut report = LoadReport::default();

        if !self.app.source_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", self.app.source_dir);
            return report;
        }

        for path in self.post_files() {
            let source = self.source_name(&path);
            match self.load_post(&path) {
                Ok(record) => {
                    tracing::debug!("Validated {}", source);
                    report.posts.push(LoadedPost { source, record });
                }
                Err(error) => {
                    tracing::warn!("Invalid post {}: {}", source, error);
                    report.failures.push(LoadFailure { source, error });
                }
            }
        }

        tracing::info!(
            "Checked {} posts: {} valid, {} invalid",
            report.total(),
            report.posts.len(),
            report.failures.len()
        );

        report
    }

    /// Load and validate a single post file
    pub fn load_post(&self, path: &Path) -> Result<PostRecord, PostError> {
        let content = fs::read_to_string(path)?;
        parse_post(&content, &self.validator)
    }

    /// Post files under the source directory, sorted by path
    fn post_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.app.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_post_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    fn is_post_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.app.config.is_post_extension(e))
            .unwrap_or(false)
    }

    /// Path relative to the site root, for reporting
    fn source_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.app.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}
