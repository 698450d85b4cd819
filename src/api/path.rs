//! Path validation for the `/v1/data` URL space.
//!
//! Turns the raw path remainder into a canonical configuration name:
//! one leading and one trailing slash are tolerated and stripped, every
//! segment must be non-empty and limited to alphanumerics, underscores
//! and dashes. Everything here is pure; HTTP method dispatch is the
//! router's job.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Error, Result};

/// Message returned for every name-shape violation
pub const INVALID_NAME_MESSAGE: &str =
    "Name must consist of alphanumeric, underscores, dashes, and forward slashes";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+(/[A-Za-z0-9_\-]+)*$").expect("valid name pattern"));

/// Validate and canonicalize a configuration name taken from the URL.
pub fn canonicalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    if trimmed.is_empty() || !NAME_PATTERN.is_match(trimmed) {
        return Err(Error::validation(INVALID_NAME_MESSAGE));
    }

    Ok(trimmed.to_string())
}
