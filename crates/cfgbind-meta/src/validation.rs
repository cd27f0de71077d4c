//! Identifier validation for record origins

use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Check that `name` is a single identifier (no dots, no whitespace).
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Check that every dot-separated segment of `path` is an identifier.
///
/// The empty string is the root namespace and is valid.
pub fn is_dotted_path(path: &str) -> bool {
    path.is_empty() || path.split('.').all(is_identifier)
}
