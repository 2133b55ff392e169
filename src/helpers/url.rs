//! URL and path helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Path-safe tokens separated by `/`, with optional leading and trailing slash
    static ref PERMALINK_RE: Regex = Regex::new(r"^/?[a-z0-9-]+(/[a-z0-9-]+)*/?$").unwrap();
}

/// Check that a permalink only uses lowercase letters, digits, hyphens and `/`
///
/// # Examples
/// ```ignore
/// is_valid_permalink("spring-di-without-spring-boot/") // -> true
/// is_valid_permalink("Spring DI!") // -> false
/// ```
pub fn is_valid_permalink(permalink: &str) -> bool {
    PERMALINK_RE.is_match(permalink)
}

/// Normalise a permalink for comparison by stripping outer slashes
///
/// # Examples
/// ```ignore
/// normalize_permalink("/blog/post/") // -> "blog/post"
/// ```
pub fn normalize_permalink(permalink: &str) -> &str {
    permalink.trim_matches('/')
}

/// Check that an asset path is relative to the site root.
///
/// Absolute paths and URLs with a scheme are rejected.
pub fn is_relative_path(path: &str) -> bool {
    let path = path.trim();
    !path.is_empty() && !path.starts_with('/') && !path.starts_with('\\') && !path.contains("://")
}

/// Build the permalink `new` writes for a title
pub fn permalink_for_title(title: &str) -> String {
    format!("{}/", slug::slugify(title))
}
