//! List valid posts

use anyhow::Result;

use crate::content::loader::{ContentLoader, LoadedPost};
use crate::Postlint;

/// Valid posts, most recently modified first
pub fn sorted_posts(app: &Postlint) -> Vec<LoadedPost> {
    let mut posts = ContentLoader::new(app).load_posts().posts;
    posts.sort_by(|a, b| {
        b.record
            .last_modified_at
            .cmp(&a.record.last_modified_at)
            .then_with(|| a.source.cmp(&b.source))
    });
    posts
}

/// List valid posts
pub fn run(app: &Postlint) -> Result<()> {
    let posts = sorted_posts(app);
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {}  {}  [{}]",
            post.record.last_modified_at.format("%Y-%m-%d"),
            post.record.title,
            post.record.permalink
        );
    }
    Ok(())
}
