//! Validated post model

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;

/// A blog post whose front matter passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    /// Layout template to use
    pub layout: String,

    /// Post title
    pub title: String,

    /// Post author
    pub author: String,

    /// URL path the post is published under
    pub permalink: String,

    /// Last modification time, with the offset it was written in
    pub last_modified_at: DateTime<FixedOffset>,

    /// Short summary shown in listings
    pub excerpt: Option<String>,

    /// Ordered category tags
    pub category: Vec<String>,

    /// Whether the post is pinned to the front page
    pub featured: bool,

    /// Whether comments are enabled
    pub comments: bool,

    /// Whether a table of contents is rendered
    pub toc: bool,

    /// Header image, relative to the site root
    pub image: Option<String>,

    /// Front-matter keys outside the schema, in source order
    pub extra: IndexMap<String, serde_yaml::Value>,

    /// Raw markup following the front matter
    pub body: String,
}

impl PostRecord {
    /// Default for `featured` when absent
    pub const DEFAULT_FEATURED: bool = false;
    /// Default for `comments` when absent
    pub const DEFAULT_COMMENTS: bool = true;
    /// Default for `toc` when absent
    pub const DEFAULT_TOC: bool = true;
}
