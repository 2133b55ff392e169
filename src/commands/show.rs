//! Show the validated record for a single post

use anyhow::{Context, Result};
use std::path::Path;

use crate::content::loader::ContentLoader;
use crate::Postlint;

/// Validate one file and render its record as pretty JSON
pub fn render(app: &Postlint, file: &Path, with_body: bool) -> Result<String> {
    let path = if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        app.base_dir.join(file)
    };

    let record = ContentLoader::new(app)
        .load_post(&path)
        .with_context(|| format!("{} is not a valid post", path.display()))?;

    let mut value = serde_json::to_value(&record)?;
    if !with_body {
        if let Some(map) = value.as_object_mut() {
            map.remove("body");
        }
    }

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Print the validated record for one file
pub fn run(app: &Postlint, file: &Path, with_body: bool) -> Result<()> {
    println!("{}", render(app, file, with_body)?);
    Ok(())
}
