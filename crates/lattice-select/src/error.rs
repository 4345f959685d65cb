//! Error types for the option host element.
//!
//! The controller itself never fails: disabled input is swallowed and absent
//! content resolves to an empty string. Only attribute reflection on the host
//! can be handed names it does not understand.

/// Result type alias for option operations.
pub type Result<T> = std::result::Result<T, OptionError>;

/// Errors that can occur when reflecting attributes onto a [`SelectOption`].
///
/// [`SelectOption`]: crate::SelectOption
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// The attribute is not one the option reflects.
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// The attribute is reflected but cannot be changed by the host.
    #[error("Attribute '{0}' is read-only")]
    ReadOnlyAttribute(&'static str),
}

impl OptionError {
    /// Create an unknown-attribute error.
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute(name.into())
    }
}
