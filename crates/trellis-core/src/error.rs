//! Error types for the item model.

use std::path::PathBuf;

use trellis_sml::DocumentError;

/// Result type alias for item model operations.
pub type Result<T> = std::result::Result<T, ItemsError>;

/// Errors raised while loading or querying items.
#[derive(Debug, thiserror::Error)]
pub enum ItemsError {
    /// The items document violates its schema or is not valid SML.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// An item or group name is not a valid identifier.
    #[error("\"{name}\" is not a valid name")]
    InvalidName { name: String },

    /// An item declaration uses a type tag outside the supported set.
    #[error("Item \"{name}\" has unsupported type \"{tag}\"")]
    UnsupportedType { name: String, tag: String },

    /// An enum option (`*`) does not directly follow an enum declaration.
    #[error("Syntax error: enum option \"{option}\" does not follow an enum item")]
    OrphanEnumOption { option: String },

    /// A group already holds a node with the same case-insensitive name.
    #[error("Group \"{group}\" already contains an item with name \"{name}\"")]
    DuplicateName { group: String, name: String },

    /// Nothing exists at the given path.
    #[error("Does not contain a {expected} with path \"{path}\"")]
    MissingPath { expected: &'static str, path: String },

    /// Something exists at the given path but it is of another kind.
    #[error("Does not contain a {expected} with path \"{path}\" (found {found})")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
        path: String,
    },

    /// A command was executed without a bound action.
    #[error("Command \"{name}\" is not bound")]
    UnboundCommand { name: String },

    /// An items file could not be read.
    #[error("Failed to read items file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loader options could not be parsed or are inconsistent.
    #[error("Invalid loader options: {0}")]
    Options(String),
}

impl ItemsError {
    /// Create a missing-path error.
    pub fn missing(expected: &'static str, path: impl Into<String>) -> Self {
        Self::MissingPath {
            expected,
            path: path.into(),
        }
    }

    /// Create a wrong-kind error.
    pub fn wrong_kind(expected: &'static str, found: &'static str, path: impl Into<String>) -> Self {
        Self::WrongKind {
            expected,
            found,
            path: path.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for path lookup failures (missing or wrong kind).
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::MissingPath { .. } | Self::WrongKind { .. })
    }
}
