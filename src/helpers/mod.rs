//! Helper functions shared by the validator and the commands

mod date;
mod url;

pub use date::*;
pub use url::*;
