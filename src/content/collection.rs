//! Checks that span every post in the collection

use indexmap::IndexMap;

use super::loader::LoadedPost;
use crate::helpers::normalize_permalink;

/// A permalink claimed by more than one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePermalink {
    /// Permalink as the first claimant wrote it
    pub permalink: String,
    /// Every source claiming it, in load order
    pub sources: Vec<String>,
}

/// Find permalinks shared by several posts.
///
/// `a/`, `/a` and `a` all publish to the same path, so they collide.
pub fn check_unique_permalinks(posts: &[LoadedPost]) -> Vec<DuplicatePermalink> {
    let mut claims: IndexMap<&str, (&str, Vec<String>)> = IndexMap::new();

    for post in posts {
        let permalink = post.record.permalink.as_str();
        claims
            .entry(normalize_permalink(permalink))
            .or_insert_with(|| (permalink, Vec::new()))
            .1
            .push(post.source.clone());
    }

    claims
        .into_values()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(permalink, sources)| DuplicatePermalink {
            permalink: permalink.to_string(),
            sources,
        })
        .collect()
}
