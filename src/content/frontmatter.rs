//! Front-matter splitting

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Marker line that opens and closes the front-matter block
const DELIMITER: &str = "---";

/// Errors raised while separating front matter from the body
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("file does not start with a `---` front-matter line")]
    Missing,

    #[error("front matter is not closed by a `---` line")]
    Unterminated,

    #[error("front matter must be a mapping with string keys")]
    NotAMapping,

    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a content file into its raw front-matter mapping and its body.
///
/// The opening marker must be the very first line. The body is everything
/// after the closing marker line, returned unchanged.
pub fn split(content: &str) -> Result<(Mapping, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first, after_open) = next_line(content).ok_or(FrontMatterError::Missing)?;
    if first != DELIMITER {
        return Err(FrontMatterError::Missing);
    }

    let mut rest = after_open;
    let mut yaml_len = 0;
    let body = loop {
        let (line, after) = next_line(rest).ok_or(FrontMatterError::Unterminated)?;
        if line == DELIMITER {
            break after;
        }
        yaml_len += rest.len() - after.len();
        rest = after;
    };

    let mapping = parse_mapping(&after_open[..yaml_len])?;
    Ok((mapping, body))
}

/// Returns the next line without its terminator, and the remaining input
fn next_line(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    let (line, rest) = match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    };
    Some((line.strip_suffix('\r').unwrap_or(line), rest))
}

fn parse_mapping(yaml: &str) -> Result<Mapping, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        // A block holding only comments
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => {
            if mapping.keys().all(Value::is_string) {
                Ok(mapping)
            } else {
                Err(FrontMatterError::NotAMapping)
            }
        }
        _ => Err(FrontMatterError::NotAMapping),
    }
}
