//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings read from the site's `_config.yml`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Posts directory, relative to the site root
    pub source_dir: String,
    /// File extensions treated as posts
    pub extensions: Vec<String>,
    /// IANA time zone for timestamps written without an offset
    pub timezone: String,

    // Writing
    pub default_layout: String,
    pub default_author: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "_posts".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            timezone: "UTC".to_string(),

            default_layout: "post".to_string(),
            default_author: String::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file deserializes to null, which means all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured time zone
    pub fn time_zone(&self) -> Result<Tz> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| anyhow!("Unknown timezone in _config.yml: {:?}", self.timezone))
    }

    /// Whether a file extension marks a post
    pub fn is_post_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
