// src/assets/name.rs — Validated plugin script names
//
// A name maps to exactly one `<name>.js` file directly under the store
// root, so anything that could escape that directory or collide with
// in-flight temp files is rejected before a path is ever built.

use serde::Serialize;
use std::fmt;

use crate::infra::errors::{LucenceError, Result};

/// File extension of every stored script.
pub const SCRIPT_EXTENSION: &str = "js";

const MAX_NAME_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetName(String);

impl AssetName {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(LucenceError::invalid_name(raw, "name is empty"));
        }
        if raw.len() > MAX_NAME_LEN {
            return Err(LucenceError::invalid_name(
                raw,
                format!("longer than {MAX_NAME_LEN} bytes"),
            ));
        }
        if raw == "." || raw == ".." {
            return Err(LucenceError::invalid_name(raw, "parent-directory reference"));
        }
        if raw.starts_with('.') {
            return Err(LucenceError::invalid_name(raw, "must not start with '.'"));
        }
        if raw.contains(['/', '\\']) {
            return Err(LucenceError::invalid_name(raw, "contains a path separator"));
        }
        if raw.chars().any(|c| c.is_control()) {
            return Err(LucenceError::invalid_name(raw, "contains control characters"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Derive the name from an uploaded file name: `katex-extra.js` -> `katex-extra`.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let stem = filename
            .strip_suffix(".js")
            .ok_or_else(|| LucenceError::invalid_name(filename, "expected a .js file"))?;
        Self::parse(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<name>.js`
    pub fn file_name(&self) -> String {
        format!("{}.{SCRIPT_EXTENSION}", self.0)
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_names() {
        for raw in ["katex-extra", "mermaid_v2", "a", "plugin.min", "日本語"] {
            let name = AssetName::parse(raw).unwrap();
            assert_eq!(name.as_str(), raw);
        }
    }

    #[test]
    fn test_parse_rejects_traversal() {
        for raw in ["..", ".", "../etc/passwd", "a/b", "a\\b", "..\\x", ".hidden"] {
            let err = AssetName::parse(raw).unwrap_err();
            assert!(
                matches!(err, LucenceError::InvalidName { .. }),
                "expected InvalidName for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_and_control() {
        assert!(AssetName::parse("").is_err());
        assert!(AssetName::parse("bad\0name").is_err());
        assert!(AssetName::parse("line\nbreak").is_err());
    }

    #[test]
    fn test_parse_rejects_overlong() {
        let raw = "x".repeat(MAX_NAME_LEN + 1);
        assert!(AssetName::parse(&raw).is_err());
        assert!(AssetName::parse(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_from_filename_strips_extension() {
        let name = AssetName::from_filename("katex-extra.js").unwrap();
        assert_eq!(name.as_str(), "katex-extra");
        assert_eq!(name.file_name(), "katex-extra.js");

        let name = AssetName::from_filename("chart.min.js").unwrap();
        assert_eq!(name.as_str(), "chart.min");
    }

    #[test]
    fn test_from_filename_requires_js() {
        assert!(AssetName::from_filename("style.css").is_err());
        assert!(AssetName::from_filename("noext").is_err());
        assert!(AssetName::from_filename(".js").is_err());
        assert!(AssetName::from_filename("../up.js").is_err());
    }
}
