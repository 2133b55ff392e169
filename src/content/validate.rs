//! Front-matter validation
//!
//! Turns a raw front-matter mapping and a body into a [`PostRecord`], or
//! reports the first field that is missing or malformed. Validation is
//! all-or-nothing and has no side effects.

use chrono_tz::Tz;
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::PostRecord;
use crate::helpers::{is_relative_path, is_valid_permalink, parse_timestamp};

/// Fields every post must declare, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 5] = ["layout", "title", "author", "permalink", "last_modified_at"];

const BOOLEAN_FIELDS: [&str; 3] = ["featured", "comments", "toc"];

const OPTIONAL_FIELDS: [&str; 3] = ["excerpt", "category", "image"];

/// Why a front-matter mapping was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::MalformedField { field, .. } => field,
        }
    }

    fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}

/// Validates front matter against the post schema
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    /// Zone for timestamps written without an offset
    tz: Tz,
}

impl Default for Validator {
    fn default() -> Self {
        Self { tz: chrono_tz::UTC }
    }
}

impl Validator {
    /// Create a validator that places naive timestamps in `tz`
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Validate a front-matter mapping and attach the body
    pub fn validate(&self, raw: &Mapping, body: &str) -> Result<PostRecord, ValidationError> {
        for field in REQUIRED_FIELDS {
            if lookup(raw, field).is_none() {
                return Err(ValidationError::MissingField(field));
            }
        }

        let layout = required_string(raw, "layout")?;
        let title = required_string(raw, "title")?;
        let author = required_string(raw, "author")?;

        let featured = flag(raw, "featured", PostRecord::DEFAULT_FEATURED)?;
        let comments = flag(raw, "comments", PostRecord::DEFAULT_COMMENTS)?;
        let toc = flag(raw, "toc", PostRecord::DEFAULT_TOC)?;

        let last_modified_at = {
            let value = required_string(raw, "last_modified_at")?;
            parse_timestamp(&value, &self.tz).ok_or_else(|| {
                ValidationError::malformed(
                    "last_modified_at",
                    format!("{:?} is not a valid date-time", value),
                )
            })?
        };

        let permalink = required_string(raw, "permalink")?;
        if !is_valid_permalink(&permalink) {
            return Err(ValidationError::malformed(
                "permalink",
                format!(
                    "{:?} may only contain lowercase letters, digits, hyphens and `/`",
                    permalink
                ),
            ));
        }

        let excerpt = optional_string(raw, "excerpt")?;
        let category = categories(raw)?;
        let image = match optional_string(raw, "image")? {
            Some(path) if !is_relative_path(&path) => {
                return Err(ValidationError::malformed(
                    "image",
                    format!("{:?} must be a relative path", path),
                ));
            }
            image => image,
        };

        Ok(PostRecord {
            layout,
            title,
            author,
            permalink,
            last_modified_at,
            excerpt,
            category,
            featured,
            comments,
            toc,
            image,
            extra: extra_fields(raw),
            body: body.to_string(),
        })
    }
}

/// Validate with the default (UTC) validator
pub fn validate(raw: &Mapping, body: &str) -> Result<PostRecord, ValidationError> {
    Validator::default().validate(raw, body)
}

/// Look up a key, treating an explicit `null` as absent
fn lookup<'a>(raw: &'a Mapping, field: &str) -> Option<&'a Value> {
    match raw.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Tagged(tagged)) if tagged.value.is_null() => None,
        Some(value) => Some(value),
    }
}

/// Read a scalar as text.
///
/// Numbers are rejected: YAML normalises them (`1.50`, `0x10`), so the text
/// the author wrote is already lost.
fn scalar_text(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Tagged(tagged) => scalar_text(field, &tagged.value),
        Value::Number(_) => Err(ValidationError::malformed(field, "expected a string, found a number")),
        Value::Bool(_) => Err(ValidationError::malformed(field, "expected a string, found a boolean")),
        Value::Sequence(_) => Err(ValidationError::malformed(field, "expected a string, found a list")),
        Value::Mapping(_) => Err(ValidationError::malformed(field, "expected a string, found a mapping")),
        Value::Null => Err(ValidationError::MissingField(field)),
    }
}

fn required_string(raw: &Mapping, field: &'static str) -> Result<String, ValidationError> {
    let value = lookup(raw, field).ok_or(ValidationError::MissingField(field))?;
    let text = scalar_text(field, value)?;
    if text.trim().is_empty() {
        return Err(ValidationError::malformed(field, "must not be empty"));
    }
    Ok(text)
}

fn optional_string(raw: &Mapping, field: &'static str) -> Result<Option<String>, ValidationError> {
    lookup(raw, field)
        .map(|value| scalar_text(field, value))
        .transpose()
}

/// Coerce a flag to a strict boolean
fn flag(raw: &Mapping, field: &'static str, default: bool) -> Result<bool, ValidationError> {
    let Some(value) = lookup(raw, field) else {
        return Ok(default);
    };

    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ValidationError::malformed(
            field,
            format!("expected true or false, found {}", describe(other)),
        )),
    }
}

/// Categories accept a single string or a list of strings
fn categories(raw: &Mapping) -> Result<Vec<String>, ValidationError> {
    const FIELD: &str = "category";

    let Some(mut value) = lookup(raw, FIELD) else {
        return Ok(Vec::new());
    };
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }

    let items: Vec<&Value> = match value {
        Value::Sequence(seq) => seq.iter().collect(),
        scalar => vec![scalar],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
            Value::String(_) | Value::Null => Err(ValidationError::malformed(
                FIELD,
                format!("tag #{} is empty", i + 1),
            )),
            other => Err(ValidationError::malformed(
                FIELD,
                format!("tag #{} must be a string, found {}", i + 1, describe(other)),
            )),
        })
        .collect()
}

/// Keys outside the schema, preserved in source order
fn extra_fields(raw: &Mapping) -> IndexMap<String, Value> {
    raw.iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?;
            let known = REQUIRED_FIELDS.contains(&key)
                || BOOLEAN_FIELDS.contains(&key)
                || OPTIONAL_FIELDS.contains(&key);
            (!known).then(|| (key.to_string(), value.clone()))
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => describe(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn minimal() -> Mapping {
        mapping(
            r#"
layout: post
title: X
author: asher
permalink: spring-di-without-spring-boot/
last_modified_at: 2020-12-17T00:00:00
"#,
        )
    }

    #[test]
    fn test_minimal_post_gets_defaults() {
        let post = validate(&minimal(), "hello").unwrap();
        assert_eq!(post.layout, "post");
        assert_eq!(post.title, "X");
        assert_eq!(post.author, "asher");
        assert_eq!(post.permalink, "spring-di-without-spring-boot/");
        assert_eq!(post.last_modified_at.to_rfc3339(), "2020-12-17T00:00:00+00:00");
        assert!(!post.featured);
        assert!(post.comments);
        assert!(post.toc);
        assert!(post.category.is_empty());
        assert_eq!(post.excerpt, None);
        assert_eq!(post.image, None);
        assert!(post.extra.is_empty());
        assert_eq!(post.body, "hello");
    }

    #[test]
    fn test_full_post() {
        let raw = mapping(
            r#"
layout: single
title: "Spring DI without Spring Boot"
author: asher
permalink: /java/spring-di/
last_modified_at: 2020-12-17 09:00:00 +0900
excerpt: Wiring beans by hand
category:
  - java
  - spring
featured: true
comments: false
toc: "False"
image: assets/images/spring.png
sidebar: left
"#,
        );
        let post = validate(&raw, "# Body\n").unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("Wiring beans by hand"));
        assert_eq!(post.category, vec!["java", "spring"]);
        assert!(post.featured);
        assert!(!post.comments);
        assert!(!post.toc);
        assert_eq!(post.image.as_deref(), Some("assets/images/spring.png"));
        assert_eq!(post.last_modified_at.hour(), 9);
        assert_eq!(post.extra.get("sidebar"), Some(&Value::from("left")));
        assert_eq!(post.body, "# Body\n");
    }

    #[test]
    fn test_each_required_field_is_reported() {
        for field in REQUIRED_FIELDS {
            let mut raw = minimal();
            raw.remove(field);
            assert_eq!(
                validate(&raw, "").unwrap_err(),
                ValidationError::MissingField(field)
            );
        }
    }

    #[test]
    fn test_missing_author() {
        let mut raw = minimal();
        raw.remove("author");
        let err = validate(&raw, "hello").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("author"));
        assert_eq!(err.to_string(), "missing required field `author`");
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut raw = minimal();
        raw.insert("title".into(), Value::Null);
        assert_eq!(
            validate(&raw, "").unwrap_err(),
            ValidationError::MissingField("title")
        );
    }

    #[test]
    fn test_first_missing_field_wins() {
        let raw = mapping("permalink: Not Valid!\n");
        assert_eq!(
            validate(&raw, "").unwrap_err(),
            ValidationError::MissingField("layout")
        );
    }

    #[test]
    fn test_empty_required_string() {
        let mut raw = minimal();
        raw.insert("title".into(), Value::from("   "));
        let err = validate(&raw, "").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedField { field: "title", .. }));
    }

    #[test]
    fn test_numbers_are_not_rewritten() {
        for field in ["title", "permalink", "layout", "author", "last_modified_at"] {
            for literal in ["1.50", "0x10", "1984"] {
                let mut raw = minimal();
                raw.insert(field.into(), serde_yaml::from_str::<Value>(literal).unwrap());
                let err = validate(&raw, "").unwrap_err();
                assert_eq!(err.field(), field);
                assert!(err.to_string().contains("found a number"), "{}", err);
            }
        }

        let mut raw = minimal();
        raw.insert("excerpt".into(), serde_yaml::from_str::<Value>("1.50").unwrap());
        assert_eq!(validate(&raw, "").unwrap_err().field(), "excerpt");
    }

    #[test]
    fn test_numeric_category_tag() {
        let raw = mapping(
            "layout: post\ntitle: X\nauthor: a\npermalink: x/\nlast_modified_at: 2020-12-17\ncategory: [java, 0x10]\n",
        );
        let err = validate(&raw, "").unwrap_err();
        assert_eq!(err.field(), "category");
        assert!(err.to_string().contains("tag #2"));
    }

    #[test]
    fn test_tagged_category_list() {
        let mut raw = minimal();
        raw.insert(
            "category".into(),
            serde_yaml::from_str::<Value>("!tags [java, spring]").unwrap(),
        );
        assert_eq!(validate(&raw, "").unwrap().category, vec!["java", "spring"]);
    }

    #[test]
    fn test_bad_permalink() {
        let mut raw = minimal();
        raw.insert("permalink".into(), Value::from("Spring DI!"));
        let err = validate(&raw, "").unwrap_err();
        assert_eq!(err.field(), "permalink");
        assert!(matches!(err, ValidationError::MalformedField { .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let mut raw = minimal();
        raw.insert("last_modified_at".into(), Value::from("yesterday"));
        let err = validate(&raw, "").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedField { field: "last_modified_at", .. }
        ));
    }

    #[test]
    fn test_non_boolean_flags() {
        for bad in ["yes", "1", "on"] {
            let mut raw = minimal();
            raw.insert("featured".into(), Value::from(bad));
            let err = validate(&raw, "").unwrap_err();
            assert!(matches!(err, ValidationError::MalformedField { field: "featured", .. }));
        }

        let mut raw = minimal();
        raw.insert("toc".into(), Value::from(1));
        assert_eq!(validate(&raw, "").unwrap_err().field(), "toc");
    }

    #[test]
    fn test_boolean_checked_before_timestamp_and_permalink() {
        let mut raw = minimal();
        raw.insert("permalink".into(), Value::from("Bad Link"));
        raw.insert("last_modified_at".into(), Value::from("never"));
        raw.insert("comments".into(), Value::from("maybe"));
        assert_eq!(validate(&raw, "").unwrap_err().field(), "comments");

        raw.remove("comments");
        assert_eq!(validate(&raw, "").unwrap_err().field(), "last_modified_at");
    }

    #[test]
    fn test_scalar_category() {
        let mut raw = minimal();
        raw.insert("category".into(), Value::from("java"));
        assert_eq!(validate(&raw, "").unwrap().category, vec!["java"]);
    }

    #[test]
    fn test_empty_category_tag() {
        let mut raw = minimal();
        raw.insert(
            "category".into(),
            Value::Sequence(vec![Value::from("java"), Value::from("")]),
        );
        let err = validate(&raw, "").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedField { field: "category", .. }));
        assert!(err.to_string().contains("tag #2"));
    }

    #[test]
    fn test_absolute_image_rejected() {
        let mut raw = minimal();
        raw.insert("image".into(), Value::from("https://cdn.example.com/a.png"));
        assert_eq!(validate(&raw, "").unwrap_err().field(), "image");
    }

    #[test]
    fn test_validator_time_zone() {
        let validator = Validator::new(chrono_tz::Asia::Seoul);
        let post = validator.validate(&minimal(), "").unwrap();
        assert_eq!(post.last_modified_at.to_rfc3339(), "2020-12-17T00:00:00+09:00");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let raw = minimal();
        let first = validate(&raw, "hello").unwrap();
        let second = validate(&raw, "hello").unwrap();
        assert_eq!(first, second);
    }
}
