//! Items loader configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ItemsError, Result};

/// Options controlling how items documents are loaded.
///
/// Options can be built in code or read from TOML:
///
/// ```
/// use trellis_core::LoaderOptions;
///
/// let options = LoaderOptions::from_toml_str("sub_item_separator = \"/\"").unwrap();
/// assert_eq!(options.sub_item_separator, "/");
/// assert!(options.nested_groups);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Joins an enum's name and an option id into the option's qualified name.
    pub sub_item_separator: String,
    /// Whether nested elements load as item groups. When `false` any child
    /// element of `Items` is a schema violation.
    pub nested_groups: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            sub_item_separator: ":".to_string(),
            nested_groups: true,
        }
    }
}

impl LoaderOptions {
    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self =
            toml::from_str(content).map_err(|e| ItemsError::Options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ItemsError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Check option consistency.
    pub fn validate(&self) -> Result<()> {
        if self.sub_item_separator.is_empty() {
            return Err(ItemsError::Options(
                "sub_item_separator must not be empty".to_string(),
            ));
        }
        if self.sub_item_separator.contains('.') {
            return Err(ItemsError::Options(
                "sub_item_separator must not contain the path separator '.'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoaderOptions::from_toml_str("").unwrap();
        assert_eq!(options, LoaderOptions::default());
        assert_eq!(options.sub_item_separator, ":");
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            LoaderOptions::from_toml_str("sub_item_separator = \"\""),
            Err(ItemsError::Options(_))
        ));
        assert!(LoaderOptions::from_toml_str("sub_item_separator = \".\"").is_err());
        assert!(LoaderOptions::from_toml_str("nested_groups = \"yes\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.toml");
        std::fs::write(&path, "nested_groups = false\n").unwrap();

        let options = LoaderOptions::from_file(&path).unwrap();
        assert!(!options.nested_groups);

        assert!(matches!(
            LoaderOptions::from_file(dir.path().join("missing.toml")),
            Err(ItemsError::Io { .. })
        ));
    }
}
