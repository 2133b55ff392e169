//! Content module - front matter, validation, and post loading

pub mod collection;
mod frontmatter;
pub mod loader;
mod post;
mod validate;

pub use frontmatter::{split, FrontMatterError};
pub use post::PostRecord;
pub use validate::{validate, ValidationError, Validator, REQUIRED_FIELDS};
