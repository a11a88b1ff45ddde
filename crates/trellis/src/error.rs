//! Error types for control compilation and instance lifecycle.

use trellis_core::ItemsError;
use trellis_sml::DocumentError;

/// Result type alias for control operations.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Errors raised while compiling control documents or managing instances.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The control document violates a control schema or is not valid SML.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// An element names no known control.
    #[error("Not supported element \"{name}\"")]
    UnsupportedElement { name: String },

    /// A structural change that the current lifecycle state does not allow.
    #[error("Unsupported mutation of {control}: {message}")]
    UnsupportedMutation {
        control: &'static str,
        message: String,
    },

    /// The render adapter failed to incarnate a control.
    #[error("Render adapter error: {0}")]
    Adapter(String),
}

impl ControlError {
    /// Create an unsupported-mutation error.
    pub fn unsupported_mutation(control: &'static str, message: impl Into<String>) -> Self {
        Self::UnsupportedMutation {
            control,
            message: message.into(),
        }
    }

    /// Create an adapter error.
    pub fn adapter(message: impl Into<String>) -> Self {
        Self::Adapter(message.into())
    }
}

/// Any Trellis error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the SML document layer.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Error from the item model or its loader.
    #[error(transparent)]
    Items(#[from] ItemsError),

    /// Error from control compilation or instances.
    #[error(transparent)]
    Control(#[from] ControlError),
}
