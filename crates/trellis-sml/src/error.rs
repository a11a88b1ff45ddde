//! Error types for SML documents.

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors raised while reading or querying an SML document.
///
/// Syntax errors carry the 1-based line number of the offending line. All
/// other variants are schema violations detected while a consumer inspects
/// an element or attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The text is not a well-formed SML document.
    #[error("SML syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// An element has a different name than the one required.
    #[error("Element \"{found}\" was expected to be \"{expected}\"")]
    UnexpectedElementName { expected: String, found: String },

    /// An element carries an attribute outside its allowed set.
    #[error("Element \"{element}\" has unexpected attribute \"{attribute}\"")]
    UnexpectedAttribute { element: String, attribute: String },

    /// An element carries a child element outside its allowed set.
    #[error("Element \"{element}\" has unexpected child element \"{child}\"")]
    UnexpectedElement { element: String, child: String },

    /// A required attribute is absent.
    #[error("Element \"{element}\" is missing required attribute \"{attribute}\"")]
    MissingAttribute { element: String, attribute: String },

    /// A required child element is absent.
    #[error("Element \"{element}\" is missing required element \"{child}\"")]
    MissingElement { element: String, child: String },

    /// A single-valued lookup matched more than one node.
    #[error("Element \"{element}\" has multiple nodes named \"{name}\"")]
    Ambiguous { element: String, name: String },

    /// An element has the wrong number of child elements.
    #[error("Element \"{element}\" must have {expected} child element(s) but has {found}")]
    ElementCount {
        element: String,
        expected: usize,
        found: usize,
    },

    /// An element has attributes although none are allowed.
    #[error("Element \"{element}\" must not have attributes")]
    AttributesNotAllowed { element: String },

    /// An element has child elements although none are allowed.
    #[error("Element \"{element}\" must not have child elements")]
    ElementsNotAllowed { element: String },

    /// An attribute has a value count outside the allowed range.
    #[error("Attribute \"{attribute}\" must have between {min} and {max} value(s) but has {found}")]
    ValueCount {
        attribute: String,
        min: usize,
        max: usize,
        found: usize,
    },

    /// A value could not be coerced to the requested type.
    #[error("Attribute \"{attribute}\" value {index} is not a valid {expected}: {value:?}")]
    InvalidValue {
        attribute: String,
        index: usize,
        expected: &'static str,
        value: Option<String>,
    },
}

impl DocumentError {
    /// Create a syntax error.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Returns true if this error came from reading the document text.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
