//! Generator configuration
//!
//! Loaded from an optional TOML file; every key has a default.

use crate::error::{RegistryError, RegistryResult};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_INCLUDE_ROOT: &str = "include/";
pub const DEFAULT_ANNOTATION_LOOKBACK: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Include paths are emitted relative to the last occurrence of this prefix
    pub include_root: String,
    /// Source lines searched above a class for `// @key: value` annotations
    pub annotation_lookback: usize,
    /// Reject (rather than skip) generic types that do not fit their base
    pub generic_arity_strict: bool,
    /// Banner written at the top of the artifact
    pub header_comment: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_root: DEFAULT_INCLUDE_ROOT.to_string(),
            annotation_lookback: DEFAULT_ANNOTATION_LOOKBACK,
            generic_arity_strict: true,
            header_comment: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(input: &str) -> RegistryResult<Self> {
        toml::from_str(input).map_err(|source| RegistryError::ConfigInvalid { source })
    }

    pub fn load(path: &Path) -> RegistryResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|source| {
            RegistryError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&input)
    }

    /// The include spelling for a header path: everything after the last
    /// occurrence of the include root, or the path unchanged
    pub fn include_path<'a>(&self, path: &'a str) -> &'a str {
        if self.include_root.is_empty() {
            return path;
        }
        match path.rfind(&self.include_root) {
            Some(pos) => &path[pos + self.include_root.len()..],
            None => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.include_root, "include/");
        assert_eq!(config.annotation_lookback, 15);
        assert!(config.generic_arity_strict);
        assert_eq!(config.header_comment, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml_str("annotation_lookback = 4\n").unwrap();
        assert_eq!(config.annotation_lookback, 4);
        assert_eq!(config.include_root, "include/");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = GeneratorConfig::from_toml_str("include_roots = \"src/\"\n");
        assert!(matches!(result, Err(RegistryError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_include_path_normalization() {
        let config = GeneratorConfig::default();
        assert_eq!(config.include_path("/work/proj/include/shapes/circle.hpp"), "shapes/circle.hpp");
        assert_eq!(config.include_path("include/a/include/b.hpp"), "b.hpp");
        assert_eq!(config.include_path("src/local.hpp"), "src/local.hpp");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classforge.toml");
        std::fs::write(&path, "include_root = \"src/\"\nheader_comment = \"generated\"\n").unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.include_path("proj/src/x.hpp"), "x.hpp");
        assert_eq!(config.header_comment.as_deref(), Some("generated"));
    }
}
