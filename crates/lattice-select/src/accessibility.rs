//! Accessibility state for an option.
//!
//! [`compute_aria`] is a pure function of the option's current state. It
//! holds no memory of earlier states, so callers may recompute on every read.
//!
//! Two concerns are kept apart here:
//!
//! - **Structural self-identification**: an option always tells its parent
//!   list that it is a menu item (see [`SelectOption::is_menu_item`]).
//! - **Accessible semantics**: the role assistive technology announces,
//!   chosen by the [`RoleContext`] the option was built for.
//!
//! [`SelectOption::is_menu_item`]: crate::SelectOption::is_menu_item

use accesskit::{Action, Node, Role};
use lattice_select_core::logging::targets;
use serde::{Deserialize, Serialize};

/// The accessible semantics an option is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleContext {
    /// An entry of a listbox (the select's popup).
    #[default]
    Option,
    /// An entry of a menu.
    MenuItem,
}

/// The accessibility role of an option.
///
/// Maps to the more comprehensive AccessKit `Role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibleRole {
    /// An option within a listbox.
    ListBoxOption,
    /// A menu item.
    MenuItem,
}

impl AccessibleRole {
    /// The ARIA `role` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibleRole::ListBoxOption => "option",
            AccessibleRole::MenuItem => "menuitem",
        }
    }

    /// Convert to AccessKit's Role enum.
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AccessibleRole::ListBoxOption => Role::ListBoxOption,
            AccessibleRole::MenuItem => Role::MenuItem,
        }
    }
}

impl From<RoleContext> for AccessibleRole {
    fn from(context: RoleContext) -> Self {
        match context {
            RoleContext::Option => AccessibleRole::ListBoxOption,
            RoleContext::MenuItem => AccessibleRole::MenuItem,
        }
    }
}

/// Inputs to [`compute_aria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AriaState {
    /// Parent-confirmed selection.
    pub selected: bool,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// The fixed role context.
    pub role_context: RoleContext,
}

/// The accessibility attributes to render on an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AriaAttributes {
    /// The accessible role.
    pub role: AccessibleRole,
    /// `aria-selected`. `None` means the attribute must be omitted.
    pub aria_selected: Option<bool>,
    /// `aria-disabled`. `None` means the attribute must be omitted.
    pub aria_disabled: Option<bool>,
    /// `tabindex`: `0` when reachable by sequential navigation, `-1` when not.
    pub tab_index: i32,
}

impl AriaAttributes {
    /// Whether the option takes part in sequential keyboard navigation.
    pub fn is_focusable(&self) -> bool {
        self.tab_index >= 0
    }

    /// `aria-selected` as an attribute string, if present.
    pub fn aria_selected_value(&self) -> Option<&'static str> {
        self.aria_selected.map(bool_attr)
    }

    /// `aria-disabled` as an attribute string, if present.
    pub fn aria_disabled_value(&self) -> Option<&'static str> {
        self.aria_disabled.map(bool_attr)
    }

    /// Build an AccessKit node labelled with `label`.
    pub fn to_accesskit_node(&self, label: &str) -> Node {
        let mut node = Node::new(self.role.to_accesskit_role());

        if !label.is_empty() {
            node.set_label(label);
        }

        if let Some(selected) = self.aria_selected {
            node.set_selected(selected);
        }

        if self.aria_disabled == Some(true) {
            node.set_disabled();
        }
        if self.is_focusable() {
            node.add_action(Action::Click);
            node.add_action(Action::Focus);
        }

        tracing::trace!(
            target: targets::ACCESSIBILITY,
            role = self.role.as_str(),
            selected = ?self.aria_selected,
            disabled = ?self.aria_disabled,
            "built accessibility node"
        );
        node
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Compute an option's accessibility attributes from its current state.
///
/// - `role` follows the role context.
/// - `aria-selected` only applies to listbox options; for menu items it is
///   omitted rather than reported as `"false"`.
/// - A disabled option reports `aria-disabled="true"` and leaves the tab
///   order. An enabled option omits `aria-disabled` and is focusable.
pub fn compute_aria(state: AriaState) -> AriaAttributes {
    let role = AccessibleRole::from(state.role_context);
    let aria_selected = match role {
        AccessibleRole::ListBoxOption => Some(state.selected),
        AccessibleRole::MenuItem => None,
    };

    AriaAttributes {
        role,
        aria_selected,
        aria_disabled: state.disabled.then_some(true),
        tab_index: if state.disabled { -1 } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_role_reports_selection() {
        let aria = compute_aria(AriaState {
            selected: true,
            ..Default::default()
        });
        assert_eq!(aria.role, AccessibleRole::ListBoxOption);
        assert_eq!(aria.role.as_str(), "option");
        assert_eq!(aria.aria_selected_value(), Some("true"));

        let aria = compute_aria(AriaState::default());
        assert_eq!(aria.aria_selected_value(), Some("false"));
    }

    #[test]
    fn test_menu_item_omits_selection() {
        for selected in [false, true] {
            let aria = compute_aria(AriaState {
                selected,
                disabled: false,
                role_context: RoleContext::MenuItem,
            });
            assert_eq!(aria.role.as_str(), "menuitem");
            assert_eq!(aria.aria_selected, None);
        }
    }

    #[test]
    fn test_disabled_leaves_tab_order() {
        let aria = compute_aria(AriaState {
            disabled: true,
            ..Default::default()
        });
        assert_eq!(aria.tab_index, -1);
        assert!(!aria.is_focusable());
        assert_eq!(aria.aria_disabled_value(), Some("true"));

        let aria = compute_aria(AriaState::default());
        assert_eq!(aria.tab_index, 0);
        assert!(aria.is_focusable());
        assert_eq!(aria.aria_disabled, None);
    }

    #[test]
    fn test_compute_is_pure() {
        let state = AriaState {
            selected: true,
            disabled: true,
            role_context: RoleContext::Option,
        };
        let first = compute_aria(state);
        let _ = compute_aria(AriaState::default());
        assert_eq!(compute_aria(state), first);
    }

    #[test]
    fn test_accesskit_node() {
        let aria = compute_aria(AriaState {
            selected: true,
            ..Default::default()
        });
        let node = aria.to_accesskit_node("Apple");
        assert_eq!(node.role(), Role::ListBoxOption);
        assert_eq!(node.label(), Some("Apple"));
        assert_eq!(node.is_selected(), Some(true));
        assert!(!node.is_disabled());
        assert!(node.supports_action(Action::Click));
        assert!(node.supports_action(Action::Focus));

        let aria = compute_aria(AriaState {
            disabled: true,
            role_context: RoleContext::MenuItem,
            ..Default::default()
        });
        let node = aria.to_accesskit_node("");
        assert_eq!(node.role(), Role::MenuItem);
        assert_eq!(node.label(), None);
        assert_eq!(node.is_selected(), None);
        assert!(node.is_disabled());
        assert!(!node.supports_action(Action::Click));
    }
}
