//! Inbound attributes and their declarative form.
//!
//! [`OptionAttributes`] is the initial state a host hands to an option. It
//! deserializes from the same kebab-case names the host reflects, so option
//! lists can be declared in JSON or TOML:
//!
//! ```
//! use lattice_select::OptionAttributes;
//!
//! let attrs: OptionAttributes =
//!     serde_json::from_str(r#"{ "value": "apple", "display-text": "Apple" }"#).unwrap();
//! assert_eq!(attrs.value, "apple");
//! assert_eq!(attrs.display_text.as_deref(), Some("Apple"));
//! assert!(!attrs.disabled);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionError;

/// The attributes a host exposes on an option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OptionAttributes {
    /// Non-interactive and non-selectable when set.
    pub disabled: bool,
    /// Parent-confirmed selection.
    pub selected: bool,
    /// Opaque form value.
    pub value: String,
    /// Explicit typeahead text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typeahead_text: Option<String>,
    /// Explicit display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl OptionAttributes {
    /// Attributes for an enabled, unselected option with `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

/// A reflected attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// `disabled` (boolean).
    Disabled,
    /// `selected` (boolean).
    Selected,
    /// `value`.
    Value,
    /// `typeahead-text`.
    TypeaheadText,
    /// `display-text`.
    DisplayText,
    /// `md-menu-item` (boolean, read-only, always present).
    MenuItem,
}

impl AttributeName {
    /// Every reflected attribute.
    pub const ALL: [AttributeName; 6] = [
        AttributeName::Disabled,
        AttributeName::Selected,
        AttributeName::Value,
        AttributeName::TypeaheadText,
        AttributeName::DisplayText,
        AttributeName::MenuItem,
    ];

    /// The attribute's name on the host.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Selected => "selected",
            Self::Value => "value",
            Self::TypeaheadText => "typeahead-text",
            Self::DisplayText => "display-text",
            Self::MenuItem => "md-menu-item",
        }
    }
}

impl FromStr for AttributeName {
    type Err = OptionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| OptionError::unknown_attribute(name))
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
